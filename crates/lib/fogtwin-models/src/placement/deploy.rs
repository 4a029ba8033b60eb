//! Glue between the placement strategies and the simulation engine that runs the
//! application. The engine is only known through [ModuleDeployer].

use log::{debug, info, warn};
use serde::Serialize;

use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::SensorId;
use fogtwin_core::environment::DigitalTwinEnvironment;

use crate::placement::{PlacementStrategy, StrategySettings};

pub const PROCESSING_MODULE: &str = "Processing_Module";
pub const CLIENT_MODULE: &str = "Client_Module";
pub const STORAGE_MODULE: &str = "Storage_Module";

/// The part of the simulation engine the placement talks to.
pub trait ModuleDeployer {
    fn deploy_module(
        &mut self,
        app_name: &str,
        module_name: &str,
        services: &[String],
        target_nodes: &[String],
    );
}

/// Name and module list of an application deployed on the twin.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub name: String,
    pub modules: Vec<String>,
}

impl Application {
    pub fn new(name: &str, modules: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            modules,
        }
    }

    /// One client and one processing module per sensor plus a shared storage module.
    pub fn for_twin(name: &str, twin: &DigitalTwinEnvironment) -> Self {
        let mut modules = Vec::with_capacity(twin.sensors().len() * 2 + 1);
        for sensor in twin.sensors() {
            modules.push(format!("{}_Sensor_{}", CLIENT_MODULE, sensor.device_id));
            modules.push(format!("{}_Sensor_{}", PROCESSING_MODULE, sensor.device_id));
        }
        modules.push(STORAGE_MODULE.to_string());
        Self::new(name, modules)
    }

    pub fn processing_modules(&self) -> impl Iterator<Item = &String> {
        self.modules
            .iter()
            .filter(|module| module.contains(PROCESSING_MODULE))
    }
}

/// Extracts the sensor ID from a module name such as `Processing_Module_Sensor_7`.
pub fn parse_sensor_id(module_name: &str) -> Option<SensorId> {
    module_name
        .rsplit('_')
        .find(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        .and_then(|part| part.parse::<SensorId>().ok())
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct AllocationReport {
    pub deployed: usize,
    /// Processing modules whose sensor was not found in the environment.
    pub skipped: Vec<String>,
}

/// A placement policy as seen by the simulation engine: it is built from a name, its
/// settings and the environment, and invoked once per application.
pub struct TwinPlacement<'a> {
    pub name: String,
    pub settings: StrategySettings,
    twin: &'a DigitalTwinEnvironment,
    strategy: Box<dyn PlacementStrategy>,
    module_assignments: AssignmentMap,
}

impl<'a> TwinPlacement<'a> {
    /// Returns `None` when the configured strategy has no implementation.
    pub fn new(
        name: &str,
        settings: StrategySettings,
        twin: &'a DigitalTwinEnvironment,
    ) -> Option<Self> {
        let strategy = settings.build()?;
        Some(Self::with_strategy(name, settings, twin, strategy))
    }

    /// Uses a strategy that is not known to the configuration.
    pub fn with_strategy(
        name: &str,
        settings: StrategySettings,
        twin: &'a DigitalTwinEnvironment,
        strategy: Box<dyn PlacementStrategy>,
    ) -> Self {
        Self {
            name: name.to_string(),
            settings,
            twin,
            strategy,
            module_assignments: AssignmentMap::new(),
        }
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Bindings made by [TwinPlacement::initial_allocation], read by the metrics afterwards.
    pub fn module_assignments(&self) -> &AssignmentMap {
        &self.module_assignments
    }

    pub fn into_assignments(self) -> AssignmentMap {
        self.module_assignments
    }

    /// Deploys every processing module of the application on the fog node chosen by the
    /// strategy. Modules of unknown sensors are skipped and reported. A module whose sensor is
    /// already bound is deployed again on the same node.
    pub fn initial_allocation(
        &mut self,
        sim: &mut dyn ModuleDeployer,
        app: &Application,
    ) -> AllocationReport {
        let mut report = AllocationReport::default();
        for module_name in app.processing_modules() {
            let sensor = parse_sensor_id(module_name).and_then(|id| self.twin.sensor(id));
            let Some(sensor) = sensor else {
                warn!("{}: no sensor found for module {}, skipping", self.name, module_name);
                report.skipped.push(module_name.clone());
                continue;
            };

            // A sensor that is already bound keeps its node.
            let bound = self.module_assignments.node_of(sensor.device_id);
            let chosen = bound.or_else(|| {
                self.strategy
                    .select_node(sensor, self.twin, &self.module_assignments)
            });
            let Some(node_id) = chosen else {
                warn!("{}: no fog node for module {}", self.name, module_name);
                report.skipped.push(module_name.clone());
                continue;
            };
            let Some(node) = self.twin.fog_node(node_id) else {
                warn!("{}: strategy chose unknown node {}", self.name, node_id);
                report.skipped.push(module_name.clone());
                continue;
            };

            if bound.is_some() {
                debug!(
                    "{}: sensor {} already on {}, redeploying {}",
                    self.name, sensor.device_id, node_id, module_name
                );
            } else {
                self.module_assignments.commit(node_id, sensor.device_id);
            }
            sim.deploy_module(&app.name, module_name, &[], &[node.node_name()]);
            report.deployed += 1;
        }
        info!(
            "{}: deployed {} modules of {}, skipped {}",
            self.name,
            report.deployed,
            app.name,
            report.skipped.len()
        );
        report
    }
}
