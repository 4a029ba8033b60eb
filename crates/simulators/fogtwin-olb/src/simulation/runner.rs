use std::path::PathBuf;

use log::{debug, info, warn};

use fogtwin_core::environment::DigitalTwinEnvironment;
use fogtwin_models::metrics::PerformanceMetrics;
use fogtwin_models::placement::deploy::{Application, TwinPlacement};
use fogtwin_models::placement::PlacementKind;
use fogtwin_output::report::{
    best_performer, comparison_report, cross_scenario_report, most_challenging, performance_report, ranking,
    ScenarioOutcome,
};
use fogtwin_output::writer::{ResultWriter, SimulationMetadata, SimulationResults};

use crate::simulation::config::BaseConfig;
use crate::simulation::engine::DeploymentLog;

const APP_NAME: &str = "HealthcareMonitoring";

/// Runs every configured strategy on the same environment and writes the results.
pub struct PlacementRunner<'a> {
    base_config: &'a BaseConfig,
    twin: &'a DigitalTwinEnvironment,
    writer: ResultWriter,
}

impl<'a> PlacementRunner<'a> {
    pub(crate) fn new(
        base_config: &'a BaseConfig,
        output_path: PathBuf,
        twin: &'a DigitalTwinEnvironment,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let writer = ResultWriter::new(&output_path)?;
        Ok(Self {
            base_config,
            twin,
            writer,
        })
    }

    pub(crate) fn run(&self) -> Result<Vec<(String, PerformanceMetrics)>, Box<dyn std::error::Error>> {
        let app = Application::for_twin(APP_NAME, self.twin);
        let summary = self.twin.summary();
        let output_settings = &self.base_config.output_settings;
        let mut outcomes = Vec::new();

        for settings in &self.base_config.strategies {
            let name = settings.kind.to_string();
            let Some(mut placement) = TwinPlacement::new(&name, *settings, self.twin) else {
                warn!("Strategy {} is not available, skipping", name);
                continue;
            };

            info!("Running {} placement", name);
            let mut engine = DeploymentLog::new();
            let allocation = placement.initial_allocation(&mut engine, &app);
            let metrics = PerformanceMetrics::collect(
                self.twin,
                placement.module_assignments(),
                &self.base_config.metrics,
            );
            for node in self.twin.fog_nodes() {
                let node_name = node.node_name();
                debug!("{}: {} modules on {}", name, engine.modules_on(&node_name), node_name);
            }
            info!(
                "{}: {} modules deployed, overall latency {:.4}, load balance {:.4}",
                name,
                engine.deployments().len(),
                metrics.overall_latency,
                metrics.load_balance_score
            );

            let results = SimulationResults {
                simulation_config: self.base_config,
                environment_info: &summary,
                performance_metrics: &metrics,
                simulation_metadata: SimulationMetadata::new(&name, allocation),
            };
            self.writer.write_results(&name, &results)?;
            if output_settings.write_assignments {
                self.writer
                    .write_assignments(&name, &metrics.detailed_assignments)?;
            }
            if output_settings.write_reports {
                self.writer.write_report(
                    &format!("{}_report", name),
                    &performance_report(&name, &metrics),
                )?;
            }
            outcomes.push((name, metrics));
        }

        if outcomes.is_empty() {
            warn!("No strategy could be run");
            return Ok(outcomes);
        }
        if output_settings.write_reports {
            self.writer
                .write_report("comparison_report", &comparison_report(&outcomes))?;
        }
        info!("Ranking by overall latency: {}", ranking(&outcomes).join(", "));
        Ok(outcomes)
    }
}

/// Summarizes a run over several scenarios. The OLB results are the reference for the most
/// challenging scenario.
pub(crate) fn evaluate_scenarios(
    base_config: &BaseConfig,
    output_path: PathBuf,
    scenarios: &[ScenarioOutcome],
) -> Result<(), Box<dyn std::error::Error>> {
    let reference = PlacementKind::Olb.to_string();
    for (scenario, results) in scenarios {
        if let Some((name, latency)) = best_performer(results) {
            info!("Best performer on {}: {} ({:.4})", scenario, name, latency);
        }
    }
    if let Some((scenario, latency)) = most_challenging(scenarios, &reference) {
        info!("Most challenging scenario for {}: {} ({:.4})", reference, scenario, latency);
    }
    if base_config.output_settings.write_reports {
        let writer = ResultWriter::new(&output_path)?;
        writer.write_report(
            "healthcare_report",
            &cross_scenario_report(scenarios, &reference),
        )?;
    }
    Ok(())
}
