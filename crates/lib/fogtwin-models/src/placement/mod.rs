//! Placement strategies that bind the processing workload of every sensor to a fog node.
//!
//! | Strategy | Decision | Ignores |
//! |----------|----------|---------|
//! | [OlbPlacement] | minimum queueing latency given the bindings so far | - |
//! | [RandomPlacement] | seeded uniform choice | load, distance |
//! | [NearestPlacement] | minimum Euclidean distance | load |
//! | [LeastLoadedPlacement] | fewest bound sensors | latency, distance |

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::NodeId;
use fogtwin_core::entity::SensorDevice;
use fogtwin_core::environment::DigitalTwinEnvironment;
use fogtwin_core::model::ModelSettings;

pub mod deploy;
pub mod least_loaded;
pub mod nearest;
pub mod olb;
pub mod random;

pub use least_loaded::LeastLoadedPlacement;
pub use nearest::NearestPlacement;
pub use olb::OlbPlacement;
pub use random::RandomPlacement;

/// A strategy that assigns each sensor to exactly one fog node.
///
/// Strategies decide one sensor at a time. The assignment map holding the decisions taken so
/// far is handed in explicitly, so a strategy can make its choice depend on earlier bindings
/// without sharing any state with the caller.
pub trait PlacementStrategy {
    fn name(&self) -> &str;

    /// Picks the fog node for the sensor. `None` only when the environment has no fog node.
    fn select_node(
        &mut self,
        sensor: &SensorDevice,
        twin: &DigitalTwinEnvironment,
        assignments: &AssignmentMap,
    ) -> Option<NodeId>;

    /// Assigns all the sensors of the environment in their creation order.
    fn assign(&mut self, twin: &DigitalTwinEnvironment) -> AssignmentMap {
        let mut assignments = AssignmentMap::new();
        for sensor in twin.sensors() {
            if let Some(node_id) = self.select_node(sensor, twin, &assignments) {
                debug!("{}: sensor {} -> node {}", self.name(), sensor.device_id, node_id);
                assignments.commit(node_id, sensor.device_id);
            }
        }
        assignments
    }
}

/// Names of the strategies known to the configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    Olb,
    Random,
    NearestDistance,
    LeastLoaded,
    /// Referenced by the evaluation but without a known algorithm. Building it yields no
    /// strategy; plug an implementation of [PlacementStrategy] in instead.
    Fnpa,
}

impl fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementKind::Olb => write!(f, "OLB"),
            PlacementKind::Random => write!(f, "Random"),
            PlacementKind::NearestDistance => write!(f, "Distance"),
            PlacementKind::LeastLoaded => write!(f, "LoadBalanced"),
            PlacementKind::Fnpa => write!(f, "FNPA"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct StrategySettings {
    pub kind: PlacementKind,
    #[builder(default)]
    #[serde(default)]
    pub seed: u64,
}

impl ModelSettings for StrategySettings {}

impl StrategySettings {
    /// Builds the strategy, or `None` if the kind has no implementation.
    pub fn build(&self) -> Option<Box<dyn PlacementStrategy>> {
        match self.kind {
            PlacementKind::Olb => Some(Box::new(OlbPlacement::new())),
            PlacementKind::Random => Some(Box::new(RandomPlacement::new(self.seed))),
            PlacementKind::NearestDistance => Some(Box::new(NearestPlacement::new())),
            PlacementKind::LeastLoaded => Some(Box::new(LeastLoadedPlacement::new())),
            PlacementKind::Fnpa => None,
        }
    }
}

/// The strategies that can be built from the configuration.
pub fn available_strategies() -> Vec<PlacementKind> {
    vec![
        PlacementKind::Olb,
        PlacementKind::Random,
        PlacementKind::NearestDistance,
        PlacementKind::LeastLoaded,
    ]
}
