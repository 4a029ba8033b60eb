use hashbrown::HashMap;
use indexmap::IndexMap;
use log::warn;

use crate::device::{NodeId, SensorId};

/// The bindings of sensors to fog nodes built up by a placement strategy.
///
/// Nodes appear in the order in which they received their first sensor, and the sensors of
/// each node in the order in which they were committed. A sensor is bound to at most one
/// node and a binding is never moved once committed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentMap {
    assignments: IndexMap<NodeId, Vec<SensorId>>,
    bound_to: HashMap<SensorId, NodeId>,
}

impl AssignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the sensor to the node. Returns false and leaves the map untouched when the
    /// sensor is already bound.
    pub fn commit(&mut self, node_id: NodeId, sensor_id: SensorId) -> bool {
        if let Some(existing) = self.bound_to.get(&sensor_id) {
            warn!(
                "Sensor {} is already bound to node {}, ignoring binding to node {}",
                sensor_id, existing, node_id
            );
            return false;
        }
        self.bound_to.insert(sensor_id, node_id);
        self.assignments.entry(node_id).or_default().push(sensor_id);
        true
    }

    pub fn sensors_on(&self, node_id: NodeId) -> &[SensorId] {
        self.assignments
            .get(&node_id)
            .map(|sensors| sensors.as_slice())
            .unwrap_or(&[])
    }

    pub fn node_of(&self, sensor_id: SensorId) -> Option<NodeId> {
        self.bound_to.get(&sensor_id).copied()
    }

    pub fn count_on(&self, node_id: NodeId) -> usize {
        self.sensors_on(node_id).len()
    }

    /// Sensor counts of the nodes that hold at least one sensor.
    pub fn counts(&self) -> Vec<usize> {
        self.assignments.values().map(|sensors| sensors.len()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Vec<SensorId>)> {
        self.assignments.iter()
    }

    pub fn node_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn total(&self) -> usize {
        self.bound_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound_to.is_empty()
    }
}
