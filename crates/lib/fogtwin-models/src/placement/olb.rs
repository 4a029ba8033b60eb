use log::{debug, error, warn};

use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::NodeId;
use fogtwin_core::entity::{FogNodeDevice, SensorDevice};
use fogtwin_core::environment::DigitalTwinEnvironment;
use fogtwin_core::units::Latency;

use crate::net::latency::{communication_latency, computing_latency};
use crate::placement::PlacementStrategy;

/// Optimized Load Balancing.
///
/// Each sensor goes to the fog node with the smallest sum of communication and computing
/// latency, evaluated against the sensors bound to that node at decision time. Decisions are
/// greedy and final, so the outcome depends on the order of the sensors. Ties go to the node
/// that comes first. Nodes whose latency cannot be evaluated are skipped, and if no node is
/// left the sensor falls back to the first fog node.
#[derive(Debug, Clone, Default)]
pub struct OlbPlacement {
    fallbacks: usize,
}

impl OlbPlacement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sensors that were bound through the fallback so far.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }
}

/// Total latency of the sensor on the node, or `None` if the node has to be rejected.
pub fn candidate_latency(
    sensor: &SensorDevice,
    node: &FogNodeDevice,
    twin: &DigitalTwinEnvironment,
    assignments: &AssignmentMap,
) -> Option<Latency> {
    let assigned = twin.sensors_for(assignments.sensors_on(node.node_id));
    let comm = communication_latency(sensor, node, &assigned);
    let comp = computing_latency(sensor, node, &assigned);
    if comm.is_infinite() || comp.is_infinite() {
        return None;
    }
    let total = comm + comp;
    if total.is_infinite() {
        return None;
    }
    Some(total)
}

impl PlacementStrategy for OlbPlacement {
    fn name(&self) -> &str {
        "OLB"
    }

    fn select_node(
        &mut self,
        sensor: &SensorDevice,
        twin: &DigitalTwinEnvironment,
        assignments: &AssignmentMap,
    ) -> Option<NodeId> {
        let mut best: Option<(NodeId, Latency)> = None;
        for node in twin.fog_nodes() {
            let Some(total) = candidate_latency(sensor, node, twin, assignments) else {
                debug!("Node {} rejected for sensor {}", node.node_id, sensor.device_id);
                continue;
            };
            debug!(
                "Sensor {} on node {}: total latency {:.6}",
                sensor.device_id,
                node.node_id,
                total.as_f64()
            );
            if best.map_or(true, |(_, min)| total < min) {
                best = Some((node.node_id, total));
            }
        }

        if let Some((node_id, _)) = best {
            return Some(node_id);
        }
        match twin.fog_nodes().first() {
            Some(fallback) => {
                warn!(
                    "All fog nodes rejected sensor {}, falling back to node {}",
                    sensor.device_id, fallback.node_id
                );
                self.fallbacks += 1;
                Some(fallback.node_id)
            }
            None => {
                error!("No fog node available for sensor {}", sensor.device_id);
                None
            }
        }
    }
}
