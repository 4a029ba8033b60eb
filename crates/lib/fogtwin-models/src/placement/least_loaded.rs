use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::NodeId;
use fogtwin_core::entity::SensorDevice;
use fogtwin_core::environment::DigitalTwinEnvironment;

use crate::placement::PlacementStrategy;

/// Round robin by count: every sensor goes to the node with the fewest sensors so far,
/// ties broken by the lowest node ID. Latency and distance play no role.
#[derive(Debug, Clone, Default)]
pub struct LeastLoadedPlacement;

impl LeastLoadedPlacement {
    pub fn new() -> Self {
        Self
    }
}

impl PlacementStrategy for LeastLoadedPlacement {
    fn name(&self) -> &str {
        "LoadBalanced"
    }

    fn select_node(
        &mut self,
        _sensor: &SensorDevice,
        twin: &DigitalTwinEnvironment,
        assignments: &AssignmentMap,
    ) -> Option<NodeId> {
        twin.fog_nodes()
            .iter()
            .map(|node| (assignments.count_on(node.node_id), node.node_id))
            .min()
            .map(|(_, node_id)| node_id)
    }
}
