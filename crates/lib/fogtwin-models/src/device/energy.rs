use serde::{Deserialize, Serialize};

use fogtwin_core::entity::{FogNodeDevice, SensorDevice};
use fogtwin_core::model::{Model, ModelSettings};
use fogtwin_core::units::Energy;

fn default_bandwidth_scale() -> f64 {
    1.0
}

fn default_processing_coefficient() -> f64 {
    1e-9
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct EnergySettings {
    /// Multiplies the bandwidth when converting the message size into airtime.
    #[serde(default = "default_bandwidth_scale")]
    pub bandwidth_scale: f64,
    /// Energy spent per MIPS of the node for each second of processing.
    #[serde(default = "default_processing_coefficient")]
    pub processing_coefficient: f64,
}

impl Default for EnergySettings {
    fn default() -> Self {
        Self {
            bandwidth_scale: default_bandwidth_scale(),
            processing_coefficient: default_processing_coefficient(),
        }
    }
}

impl ModelSettings for EnergySettings {}

/// Energy spent for one sensor bound to one node: the sensor transmitting its message and
/// the node processing it.
#[derive(Debug, Clone, Copy)]
pub struct EnergyModel {
    bandwidth_scale: f64,
    processing_coefficient: f64,
}

impl Model for EnergyModel {
    type Settings = EnergySettings;

    fn with_settings(settings: &EnergySettings) -> Self {
        Self {
            bandwidth_scale: settings.bandwidth_scale,
            processing_coefficient: settings.processing_coefficient,
        }
    }
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self::with_settings(&EnergySettings::default())
    }
}

impl EnergyModel {
    pub fn transmission_energy(&self, sensor: &SensorDevice, node: &FogNodeDevice) -> Energy {
        let airtime =
            sensor.flow_traffic_size.as_f64() / (node.bandwidth.as_f64() * self.bandwidth_scale);
        Energy::new(sensor.transmission_power.as_f64() * airtime)
    }

    pub fn processing_energy(&self, sensor: &SensorDevice, node: &FogNodeDevice) -> Energy {
        let processing_power = node.processing_power.as_f64();
        let processing_time = sensor.average_flow_size.as_f64() / processing_power;
        Energy::new(self.processing_coefficient * processing_power * processing_time)
    }

    pub fn measure(&self, sensor: &SensorDevice, node: &FogNodeDevice) -> Energy {
        self.transmission_energy(sensor, node) + self.processing_energy(sensor, node)
    }
}
