//! Free-space radio model between a sensor and a fog node.
//!
//! The public functions are plain formulas and follow IEEE-754 semantics. The checked
//! variant [link_capacity] is what the latency model uses: it gives up as soon as one of the
//! steps would divide by zero, take the logarithm of a non-positive number or leave the
//! finite range.

use std::f64::consts::PI;

use fogtwin_core::device::Point2D;
use fogtwin_core::entity::{FogNodeDevice, SensorDevice};
use fogtwin_core::units::{GigaHertz, MegaHertz, Watts};

pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

pub fn distance(a: &Point2D, b: &Point2D) -> f64 {
    a.distance_to(b)
}

/// Path gain in dB of the free-space model. A zero distance is treated as one metre.
pub fn channel_gain(distance: f64, carrier_frequency: GigaHertz) -> f64 {
    let distance = if distance == 0.0 { 1.0 } else { distance };
    let wavelength = SPEED_OF_LIGHT / (carrier_frequency.as_f64() * 1e9);
    10.0 * (wavelength.powi(2) / (4.0 * PI * distance).powi(2)).log10()
}

pub fn snr(transmission_power: Watts, gain_db: f64, noise_power: Watts) -> f64 {
    let linear_gain = 10f64.powf(gain_db / 10.0);
    transmission_power.as_f64() * linear_gain / noise_power.as_f64()
}

pub fn device_capacity(bandwidth: MegaHertz, snr: f64) -> f64 {
    bandwidth.as_f64() * (1.0 + snr)
}

pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

pub(crate) fn checked_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    finite(numerator / denominator)
}

fn checked_gain(distance: f64, carrier_frequency: GigaHertz) -> Option<f64> {
    let distance = if distance == 0.0 { 1.0 } else { distance };
    let wavelength = checked_div(SPEED_OF_LIGHT, carrier_frequency.as_f64() * 1e9)?;
    let ratio = checked_div(wavelength.powi(2), (4.0 * PI * distance).powi(2))?;
    if ratio <= 0.0 {
        return None;
    }
    finite(10.0 * ratio.log10())
}

/// Capacity of the link from the sensor to the node, `None` if it cannot be evaluated.
pub fn link_capacity(sensor: &SensorDevice, node: &FogNodeDevice) -> Option<f64> {
    let distance = finite(distance(&sensor.coordinates, &node.coordinates))?;
    let gain_db = checked_gain(distance, node.carrier_frequency)?;
    let linear_gain = finite(10f64.powf(gain_db / 10.0))?;
    let snr = checked_div(
        sensor.transmission_power.as_f64() * linear_gain,
        node.noise_power.as_f64(),
    )?;
    finite(device_capacity(node.bandwidth, snr))
}
