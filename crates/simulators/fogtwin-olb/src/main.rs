use clap::Parser;

use crate::simulation::builder::SimulationBuilder;
use crate::simulation::runner::{evaluate_scenarios, PlacementRunner};

mod simulation;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: String,
}

fn run(args: &CliArgs) -> Result<usize, Box<dyn std::error::Error>> {
    let builder = SimulationBuilder::new(&args.config)?;
    let scenario_twins = builder.build()?;
    let mut scenarios = Vec::with_capacity(scenario_twins.len());
    for scenario_twin in scenario_twins {
        let runner = PlacementRunner::new(
            builder.base_config(),
            scenario_twin.output_path,
            &scenario_twin.twin,
        )?;
        scenarios.push((scenario_twin.label, runner.run()?));
    }
    if scenarios.len() > 1 {
        evaluate_scenarios(builder.base_config(), builder.output_path(), &scenarios)?;
    }
    Ok(scenarios.iter().map(|(_, outcomes)| outcomes.len()).sum())
}

fn main() {
    let args = CliArgs::parse();
    let start = std::time::Instant::now();
    match run(&args) {
        Ok(runs) => {
            let elapsed = start.elapsed();
            println!(
                "{} placement runs finished in {} ms.",
                runs,
                elapsed.as_millis()
            );
        }
        Err(e) => {
            eprintln!("Placement failed: {}", e);
            std::process::exit(1);
        }
    }
}
