use std::path::{Path, PathBuf};

use log::info;

use fogtwin_core::environment::DigitalTwinEnvironment;
use fogtwin_core::error::TwinError;
use fogtwin_models::device::capacity::apply_forecasts;
use fogtwin_models::scenario::HealthcareScenario;
use fogtwin_output::logger::initiate_logger;

use crate::simulation::config::{BaseConfig, BaseConfigReader, PopulationSettings};

/// A populated environment and the directory its results are written to.
pub(crate) struct ScenarioTwin {
    pub(crate) label: String,
    pub(crate) output_path: PathBuf,
    pub(crate) twin: DigitalTwinEnvironment,
}

pub struct SimulationBuilder {
    base_config: BaseConfig,
    config_path: PathBuf,
}

impl SimulationBuilder {
    pub(crate) fn new(base_config_file: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if !Path::new(base_config_file).exists() {
            return Err(format!("Configuration file {} is not found", base_config_file).into());
        }
        let config_path = Path::new(base_config_file)
            .parent()
            .ok_or("Invalid directory for the configuration file")?
            .to_path_buf();

        let base_config = BaseConfigReader::new(base_config_file)
            .parse()
            .map_err(|e| format!("Error while parsing the base configuration file: {}", e))?;
        Ok(Self {
            base_config,
            config_path,
        })
    }

    pub(crate) fn base_config(&self) -> &BaseConfig {
        &self.base_config
    }

    pub(crate) fn output_path(&self) -> PathBuf {
        self.config_path
            .join(&self.base_config.output_settings.output_path)
    }

    /// Starts the logger and builds the environments the strategies are run on.
    pub(crate) fn build(&self) -> Result<Vec<ScenarioTwin>, Box<dyn std::error::Error>> {
        let log_file = initiate_logger(&self.config_path, &self.base_config.log_settings)?;
        info!("Logging to {}", log_file.display());
        self.build_environments()
    }

    /// One environment per configured population. Only a list of scenarios yields more than
    /// one, each with its own output directory.
    pub(crate) fn build_environments(&self) -> Result<Vec<ScenarioTwin>, Box<dyn std::error::Error>> {
        let output_path = self.output_path();
        let mut scenario_twins = Vec::new();
        match &self.base_config.population {
            PopulationSettings::Random {
                sensor_count,
                fog_node_count,
                seed,
            } => {
                let mut twin = self.empty_twin();
                twin.initialize_sensors(*sensor_count, *seed)?;
                twin.initialize_fog_nodes(*fog_node_count, *seed)?;
                scenario_twins.push(self.finish("random".to_string(), output_path, twin));
            }
            PopulationSettings::Scenario {
                scenario,
                units,
                seed,
            } => {
                let twin = self.scenario_twin(*scenario, *units, *seed)?;
                scenario_twins.push(self.finish(scenario.to_string(), output_path, twin));
            }
            PopulationSettings::Scenarios { runs } => {
                for run in runs {
                    let label = run.scenario.to_string();
                    let twin = self.scenario_twin(run.scenario, run.units, run.seed)?;
                    let run_path = output_path.join(&label);
                    scenario_twins.push(self.finish(label, run_path, twin));
                }
            }
        }
        Ok(scenario_twins)
    }

    fn empty_twin(&self) -> DigitalTwinEnvironment {
        let env_settings = &self.base_config.environment;
        DigitalTwinEnvironment::new(env_settings.width, env_settings.height)
    }

    fn scenario_twin(
        &self,
        scenario: HealthcareScenario,
        units: Option<u32>,
        seed: u64,
    ) -> Result<DigitalTwinEnvironment, TwinError> {
        let mut twin = self.empty_twin();
        let units = units.unwrap_or(scenario.info().typical_units);
        scenario.populate(&mut twin, units, seed)?;
        Ok(twin)
    }

    /// Adds the cloud and applies the forecasts, before any placement decision is made.
    fn finish(&self, label: String, output_path: PathBuf, mut twin: DigitalTwinEnvironment) -> ScenarioTwin {
        if self.base_config.environment.cloud {
            twin.initialize_cloud();
        }
        let adjusted = apply_forecasts(&mut twin, &self.base_config.capacity_forecasts);
        info!(
            "Environment {} ready: {} sensors, {} fog nodes, {} nodes adjusted to forecasts",
            label,
            twin.sensors().len(),
            twin.fog_nodes().len(),
            adjusted
        );
        ScenarioTwin {
            label,
            output_path,
            twin,
        }
    }
}
