use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::NodeId;
use fogtwin_core::dist::SeededSource;
use fogtwin_core::entity::SensorDevice;
use fogtwin_core::environment::DigitalTwinEnvironment;

use crate::placement::PlacementStrategy;

/// Picks a fog node uniformly at random for every sensor. The random source is owned by the
/// strategy, so two strategies built with the same seed make the same choices.
#[derive(Debug, Clone)]
pub struct RandomPlacement {
    source: SeededSource,
}

impl RandomPlacement {
    pub fn new(seed: u64) -> Self {
        Self {
            source: SeededSource::new(seed),
        }
    }
}

impl PlacementStrategy for RandomPlacement {
    fn name(&self) -> &str {
        "Random"
    }

    fn select_node(
        &mut self,
        _sensor: &SensorDevice,
        twin: &DigitalTwinEnvironment,
        _assignments: &AssignmentMap,
    ) -> Option<NodeId> {
        let index = self.source.index(twin.fog_nodes().len())?;
        Some(twin.fog_nodes()[index].node_id)
    }
}
