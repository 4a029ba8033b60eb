//! Key performance indicators of a finished placement.
//!
//! The latencies are recomputed against the final bindings: every sensor sees all the other
//! sensors of its node, not just the ones that were bound before it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::{NodeId, Point2D, SensorId};
use fogtwin_core::environment::DigitalTwinEnvironment;
use fogtwin_core::model::{Model, ModelSettings};
use fogtwin_core::units::{Energy, Latency};

use crate::device::energy::{EnergyModel, EnergySettings};
use crate::net::latency::{communication_latency, computing_latency};

fn default_latency_weight() -> f64 {
    0.1
}

fn default_network_weight() -> f64 {
    0.05
}

fn default_energy_weight() -> f64 {
    0.02
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    #[serde(default = "default_latency_weight")]
    pub latency: f64,
    #[serde(default = "default_network_weight")]
    pub network: f64,
    #[serde(default = "default_energy_weight")]
    pub energy: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            latency: default_latency_weight(),
            network: default_network_weight(),
            energy: default_energy_weight(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSettings {
    #[serde(default)]
    pub cost_weights: CostWeights,
    #[serde(default)]
    pub energy: EnergySettings,
}

impl ModelSettings for MetricsSettings {}

/// One sensor bound to one node.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AssignmentRecord {
    pub sensor_id: SensorId,
    pub fog_node_id: NodeId,
    pub comm_latency: Latency,
    pub comp_latency: Latency,
    pub total_latency: Latency,
    pub energy: Energy,
    pub distance: f64,
    pub sensor_coordinates: Point2D,
    pub fog_node_coordinates: Point2D,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct PerformanceMetrics {
    pub overall_latency: f64,
    pub communication_latency: f64,
    pub computing_latency: f64,
    pub network_usage: f64,
    pub execution_time: f64,
    pub energy_consumption: f64,
    pub cost_of_execution: f64,
    pub load_balance_score: f64,
    pub max_utilization: f64,
    pub detailed_assignments: Vec<AssignmentRecord>,
}

impl PerformanceMetrics {
    pub fn collect(
        twin: &DigitalTwinEnvironment,
        assignments: &AssignmentMap,
        settings: &MetricsSettings,
    ) -> Self {
        let energy_model = EnergyModel::with_settings(&settings.energy);
        let mut metrics = PerformanceMetrics::default();

        for (node_id, sensor_ids) in assignments.iter() {
            let Some(node) = twin.fog_node(*node_id) else {
                warn!("Assignments refer to unknown fog node {}, skipping", node_id);
                continue;
            };
            for sensor_id in sensor_ids {
                let Some(sensor) = twin.sensor(*sensor_id) else {
                    warn!("Assignments refer to unknown sensor {}, skipping", sensor_id);
                    continue;
                };
                let others: Vec<_> = twin
                    .sensors_for(sensor_ids)
                    .into_iter()
                    .filter(|other| other.device_id != *sensor_id)
                    .collect();

                let comm_latency = communication_latency(sensor, node, &others);
                let comp_latency = computing_latency(sensor, node, &others);
                let energy = energy_model.measure(sensor, node);
                let distance = sensor.coordinates.distance_to(&node.coordinates);
                debug!(
                    "Sensor {} on node {}: comm={:.4}, comp={:.4}, energy={:.6}",
                    sensor_id,
                    node_id,
                    comm_latency.as_f64(),
                    comp_latency.as_f64(),
                    energy.as_f64()
                );

                metrics.communication_latency += comm_latency.as_f64();
                metrics.computing_latency += comp_latency.as_f64();
                metrics.energy_consumption += energy.as_f64();
                metrics.detailed_assignments.push(AssignmentRecord {
                    sensor_id: *sensor_id,
                    fog_node_id: *node_id,
                    comm_latency,
                    comp_latency,
                    total_latency: comm_latency + comp_latency,
                    energy,
                    distance,
                    sensor_coordinates: sensor.coordinates,
                    fog_node_coordinates: node.coordinates,
                });
            }
        }

        metrics.overall_latency = metrics.communication_latency + metrics.computing_latency;
        metrics.network_usage = twin.sensors().iter().map(|s| s.traffic_demand()).sum();
        let sensor_count = twin.sensors().len();
        if sensor_count > 0 {
            metrics.execution_time = metrics.overall_latency / sensor_count as f64;
        }
        let weights = &settings.cost_weights;
        metrics.cost_of_execution = weights.latency * metrics.overall_latency
            + weights.network * metrics.network_usage
            + weights.energy * metrics.energy_consumption;
        metrics.load_balance_score = load_balance_score(assignments);
        metrics.max_utilization = max_utilization(twin, assignments);
        metrics
    }
}

/// `1 / (1 + variance)` of the number of sensors per used node. Lies in `(0, 1]` and is 1
/// for a perfectly even distribution or when at most one node is used.
pub fn load_balance_score(assignments: &AssignmentMap) -> f64 {
    let counts = assignments.counts();
    if counts.len() <= 1 {
        return 1.0;
    }
    let n = counts.len() as f64;
    let mean = counts.iter().sum::<usize>() as f64 / n;
    let variance = counts
        .iter()
        .map(|&count| (count as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    1.0 / (1.0 + variance)
}

/// Highest computing utilization of a used node, in percent.
pub fn max_utilization(twin: &DigitalTwinEnvironment, assignments: &AssignmentMap) -> f64 {
    assignments
        .iter()
        .filter_map(|(node_id, sensor_ids)| {
            let node = twin.fog_node(*node_id)?;
            let power = node.processing_power.as_f64();
            if power <= 0.0 {
                return None;
            }
            let demand: f64 = twin
                .sensors_for(sensor_ids)
                .iter()
                .map(|sensor| sensor.compute_demand())
                .sum();
            Some(100.0 * demand / power)
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let weights: CostWeights = serde_json::from_str("{}").unwrap();
        assert_eq!(weights, CostWeights::default());
        assert_eq!(weights.latency, 0.1);
        assert_eq!(weights.network, 0.05);
        assert_eq!(weights.energy, 0.02);
    }

    #[test]
    fn empty_map_is_balanced() {
        assert_eq!(load_balance_score(&AssignmentMap::new()), 1.0);
    }
}
