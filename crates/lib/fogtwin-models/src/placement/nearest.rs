use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::NodeId;
use fogtwin_core::entity::SensorDevice;
use fogtwin_core::environment::DigitalTwinEnvironment;

use crate::net::channel::distance;
use crate::placement::PlacementStrategy;

/// Binds every sensor to the closest fog node, regardless of how loaded it is.
#[derive(Debug, Clone, Default)]
pub struct NearestPlacement;

impl NearestPlacement {
    pub fn new() -> Self {
        Self
    }
}

impl PlacementStrategy for NearestPlacement {
    fn name(&self) -> &str {
        "Distance"
    }

    fn select_node(
        &mut self,
        sensor: &SensorDevice,
        twin: &DigitalTwinEnvironment,
        _assignments: &AssignmentMap,
    ) -> Option<NodeId> {
        let mut closest: Option<(NodeId, f64)> = None;
        for node in twin.fog_nodes() {
            let d = distance(&sensor.coordinates, &node.coordinates);
            if closest.map_or(true, |(_, min)| d < min) {
                closest = Some((node.node_id, d));
            }
        }
        closest.map(|(node_id, _)| node_id)
    }
}
