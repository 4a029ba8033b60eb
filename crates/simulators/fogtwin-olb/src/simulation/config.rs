use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use fogtwin_core::environment::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use fogtwin_models::device::capacity::CapacityForecast;
use fogtwin_models::metrics::MetricsSettings;
use fogtwin_models::placement::StrategySettings;
use fogtwin_models::scenario::HealthcareScenario;
use fogtwin_output::logger::LogSettings;
use fogtwin_output::writer::OutputSettings;

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EnvironmentSettings {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub cloud: bool,
}

/// One healthcare scenario of an evaluation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    pub scenario: HealthcareScenario,
    /// Beds, patients or ambulances. The typical number of the scenario if absent.
    pub units: Option<u32>,
    #[serde(default)]
    pub seed: u64,
}

/// How the environment is populated: seeded random devices, a healthcare scenario, or a list
/// of scenarios that are evaluated one after the other on fresh environments.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopulationSettings {
    Random {
        sensor_count: u32,
        fog_node_count: u32,
        seed: u64,
    },
    Scenario {
        scenario: HealthcareScenario,
        /// Beds, patients or ambulances. The typical number of the scenario if absent.
        units: Option<u32>,
        #[serde(default)]
        seed: u64,
    },
    Scenarios {
        runs: Vec<ScenarioRun>,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub(crate) struct BaseConfig {
    pub(crate) log_settings: LogSettings,
    pub(crate) environment: EnvironmentSettings,
    pub(crate) population: PopulationSettings,
    #[serde(default)]
    pub(crate) capacity_forecasts: Vec<CapacityForecast>,
    #[serde(default)]
    pub(crate) metrics: MetricsSettings,
    pub(crate) strategies: Vec<StrategySettings>,
    pub(crate) output_settings: OutputSettings,
}

pub struct BaseConfigReader {
    file_path: PathBuf,
}

impl BaseConfigReader {
    pub fn new(file_name: &str) -> Self {
        let file_path = PathBuf::from(file_name);
        Self { file_path }
    }

    pub(crate) fn parse(&self) -> Result<BaseConfig, Box<dyn std::error::Error>> {
        let parsing_result = std::fs::read_to_string(&self.file_path)?;
        let config: BaseConfig = toml::from_str(&parsing_result)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use fogtwin_models::placement::PlacementKind;

    use super::*;

    #[test]
    fn parse_random_config() {
        let config: BaseConfig = toml::from_str(include_str!("../../configs/healthcare.toml")).unwrap();
        assert!(config.environment.cloud);
        assert!(matches!(
            config.population,
            PopulationSettings::Random {
                sensor_count: 50,
                fog_node_count: 5,
                seed: 42
            }
        ));
        assert_eq!(config.capacity_forecasts.len(), 2);
        let kinds: Vec<PlacementKind> = config.strategies.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PlacementKind::Olb,
                PlacementKind::Random,
                PlacementKind::NearestDistance,
                PlacementKind::LeastLoaded,
                PlacementKind::Fnpa,
            ]
        );
        assert_eq!(config.metrics.cost_weights.latency, 0.1);
    }

    #[test]
    fn parse_scenario_config() {
        let config: BaseConfig = toml::from_str(include_str!("../../configs/icu.toml")).unwrap();
        match config.population {
            PopulationSettings::Scenario {
                scenario, units, ..
            } => {
                assert_eq!(scenario, HealthcareScenario::Icu);
                assert_eq!(units, Some(10));
            }
            other => panic!("expected a scenario, got {:?}", other),
        }
        assert!(config.capacity_forecasts.is_empty());
        assert_eq!(config.environment.width, DEFAULT_WIDTH);
    }

    #[test]
    fn parse_evaluation_config() {
        let config: BaseConfig = toml::from_str(include_str!("../../configs/evaluation.toml")).unwrap();
        let PopulationSettings::Scenarios { runs } = config.population else {
            panic!("expected a list of scenarios");
        };
        let scenarios: Vec<HealthcareScenario> = runs.iter().map(|run| run.scenario).collect();
        assert_eq!(
            scenarios,
            vec![
                HealthcareScenario::Icu,
                HealthcareScenario::Ambulatory,
                HealthcareScenario::Emergency
            ]
        );
        assert_eq!(runs[0].units, Some(8));
        assert_eq!(runs[1].seed, 7);
        assert!(config.environment.cloud);
        assert_eq!(config.strategies.len(), 4);
    }
}
