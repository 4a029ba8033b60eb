//! Queueing latency of a sensor on a fog node.
//!
//! Both the radio and the processor of a fog node are modelled as M/M/1 queues whose
//! expected waiting factor is `ρ/(1-ρ)`, `ρ` being the utilization caused by the candidate
//! sensor together with the sensors already bound to the node. Utilizations at or above one
//! are clamped to [MAX_UTILIZATION], so an oversubscribed node yields a large but finite
//! latency. A latency that cannot be evaluated at all is reported as [Latency::INFINITE],
//! which removes the node from the candidates of that sensor.

use fogtwin_core::entity::{FogNodeDevice, SensorDevice};
use fogtwin_core::units::Latency;

use crate::net::channel::{checked_div, finite, link_capacity};

/// Stability boundary of the queue.
pub const MAX_UTILIZATION: f64 = 0.99;

/// Share of the link capacity taken by the sensor.
pub fn traffic_load(sensor: &SensorDevice, device_capacity: f64) -> Option<f64> {
    checked_div(sensor.traffic_demand(), device_capacity)
}

/// Share of the node's processing power taken by the sensor.
pub fn computing_load(sensor: &SensorDevice, node: &FogNodeDevice) -> Option<f64> {
    checked_div(sensor.compute_demand(), node.processing_power.as_f64())
}

/// Waiting factor of a queue with the given utilization, clamped at the stability boundary.
pub fn queue_delay(total_load: f64) -> Option<f64> {
    let load = if total_load >= 1.0 {
        MAX_UTILIZATION
    } else {
        total_load
    };
    checked_div(load, 1.0 - load)
}

/// Communication latency of the sensor on the node given the sensors already bound to it.
///
/// The link capacity is that of the candidate sensor and it is applied to the traffic of
/// every bound sensor as well.
pub fn communication_latency(
    sensor: &SensorDevice,
    node: &FogNodeDevice,
    already_assigned: &[&SensorDevice],
) -> Latency {
    try_communication_latency(sensor, node, already_assigned)
        .map(Latency::new)
        .unwrap_or(Latency::INFINITE)
}

fn try_communication_latency(
    sensor: &SensorDevice,
    node: &FogNodeDevice,
    already_assigned: &[&SensorDevice],
) -> Option<f64> {
    let capacity = link_capacity(sensor, node)?;
    let mut total_load = traffic_load(sensor, capacity)?;
    for assigned in already_assigned {
        total_load = finite(total_load + traffic_load(assigned, capacity)?)?;
    }
    queue_delay(total_load)
}

/// Computing latency of the sensor on the node given the sensors already bound to it.
pub fn computing_latency(
    sensor: &SensorDevice,
    node: &FogNodeDevice,
    already_assigned: &[&SensorDevice],
) -> Latency {
    try_computing_latency(sensor, node, already_assigned)
        .map(Latency::new)
        .unwrap_or(Latency::INFINITE)
}

fn try_computing_latency(
    sensor: &SensorDevice,
    node: &FogNodeDevice,
    already_assigned: &[&SensorDevice],
) -> Option<f64> {
    let mut total_load = computing_load(sensor, node)?;
    for assigned in already_assigned {
        total_load = finite(total_load + computing_load(assigned, node)?)?;
    }
    queue_delay(total_load)
}
