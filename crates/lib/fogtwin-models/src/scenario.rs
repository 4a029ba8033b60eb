//! Healthcare deployments with fixed device profiles.
//!
//! Each scenario creates a number of units (beds, patients, ambulances), every unit carrying
//! the same set of devices, plus a fixed fog tier. Sensor IDs are `unit * devices + device`.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use fogtwin_core::device::{NodeId, Point2D, SensorId};
use fogtwin_core::dist::SeededSource;
use fogtwin_core::entity::{FogNodeDevice, SensorDevice};
use fogtwin_core::environment::DigitalTwinEnvironment;
use fogtwin_core::error::TwinError;
use fogtwin_core::units::{GigaHertz, Hertz, MegaBytes, MegaHertz, MegaInstructions, Mips, Watts};

/// Static profile of a device carried by every unit of a scenario.
struct DeviceProfile {
    offset: (f64, f64),
    transmission_power: f64,
    flow_rate: f64,
    traffic_size: f64,
    flow_size: f64,
}

const fn profile(
    offset: (f64, f64),
    transmission_power: f64,
    flow_rate: f64,
    traffic_size: f64,
    flow_size: f64,
) -> DeviceProfile {
    DeviceProfile {
        offset,
        transmission_power,
        flow_rate,
        traffic_size,
        flow_size,
    }
}

/// (id, position, MIPS, MHz, GHz, noise W)
type NodeProfile = (u32, (f64, f64), f64, f64, f64, f64);

// ECG, vital signs, ventilator, IV pump
static ICU_DEVICES: [DeviceProfile; 4] = [
    profile((0.0, 0.0), 0.8, 10.0, 2.0, 1500.0),
    profile((50.0, 0.0), 0.6, 1.0, 0.5, 800.0),
    profile((0.0, 50.0), 0.9, 5.0, 1.0, 1200.0),
    profile((50.0, 50.0), 0.4, 0.2, 0.1, 300.0),
];

static ICU_NODES: [NodeProfile; 3] = [
    (0, (800.0, 800.0), 8000.0, 200.0, 5.0, 1e-11),
    (1, (1200.0, 800.0), 6000.0, 150.0, 2.4, 1e-11),
    (2, (1000.0, 1200.0), 5000.0, 100.0, 2.4, 1e-10),
];

// Fitness tracker, blood glucose monitor, smart inhaler
static AMBULATORY_DEVICES: [DeviceProfile; 3] = [
    profile((0.0, 0.0), 0.2, 0.1, 0.05, 200.0),
    profile((10.0, 10.0), 0.3, 0.05, 0.02, 150.0),
    profile((-10.0, 10.0), 0.25, 0.02, 0.1, 400.0),
];

static AMBULATORY_NODES: [NodeProfile; 6] = [
    (0, (600.0, 600.0), 3000.0, 80.0, 2.4, 1e-10),
    (1, (1500.0, 600.0), 3500.0, 90.0, 2.4, 1e-10),
    (2, (2400.0, 600.0), 3000.0, 80.0, 2.4, 1e-10),
    (3, (600.0, 1400.0), 2500.0, 70.0, 2.4, 1e-10),
    (4, (1500.0, 1400.0), 4000.0, 100.0, 5.0, 1e-11),
    (5, (2400.0, 1400.0), 2500.0, 70.0, 2.4, 1e-10),
];

const AMBULATORY_AREA: ((f64, f64), (f64, f64)) = ((200.0, 2800.0), (200.0, 1800.0));

// Portable ECG, pulse oximeter, blood pressure monitor, temperature sensor, GPS tracker
static EMERGENCY_DEVICES: [DeviceProfile; 5] = [
    profile((0.0, 0.0), 1.0, 20.0, 3.0, 2000.0),
    profile((20.0, 0.0), 0.8, 5.0, 0.8, 600.0),
    profile((0.0, 20.0), 0.7, 1.0, 0.3, 400.0),
    profile((20.0, 20.0), 0.3, 0.5, 0.1, 200.0),
    profile((10.0, 10.0), 0.5, 2.0, 0.05, 100.0),
];

static EMERGENCY_NODES: [NodeProfile; 5] = [
    (0, (1500.0, 1000.0), 10000.0, 300.0, 5.0, 1e-12),
    (1, (800.0, 800.0), 6000.0, 200.0, 5.0, 1e-11),
    (2, (2200.0, 800.0), 6000.0, 200.0, 5.0, 1e-11),
    (3, (1500.0, 400.0), 4000.0, 150.0, 2.4, 1e-10),
    (4, (1500.0, 1600.0), 4000.0, 150.0, 2.4, 1e-10),
];

const AMBULANCE_POSITIONS: [(f64, f64); 5] = [
    (500.0, 300.0),
    (1200.0, 400.0),
    (2000.0, 600.0),
    (800.0, 1600.0),
    (2200.0, 1400.0),
];

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HealthcareScenario {
    Icu,
    Ambulatory,
    Emergency,
}

impl fmt::Display for HealthcareScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthcareScenario::Icu => write!(f, "icu"),
            HealthcareScenario::Ambulatory => write!(f, "ambulatory"),
            HealthcareScenario::Emergency => write!(f, "emergency"),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub devices_per_unit: usize,
    pub typical_units: u32,
    pub fog_nodes: usize,
    pub characteristics: Vec<&'static str>,
}

impl HealthcareScenario {
    pub fn info(&self) -> ScenarioInfo {
        match self {
            HealthcareScenario::Icu => ScenarioInfo {
                name: "Intensive Care Unit",
                description: "High-priority continuous monitoring with ECG, vitals, ventilators",
                devices_per_unit: ICU_DEVICES.len(),
                typical_units: 10,
                fog_nodes: ICU_NODES.len(),
                characteristics: vec!["High frequency", "Critical reliability", "Low latency"],
            },
            HealthcareScenario::Ambulatory => ScenarioInfo {
                name: "Ambulatory Care",
                description: "Mobile patients with wearable health monitors",
                devices_per_unit: AMBULATORY_DEVICES.len(),
                typical_units: 15,
                fog_nodes: AMBULATORY_NODES.len(),
                characteristics: vec!["Low power", "Periodic updates", "Wide coverage"],
            },
            HealthcareScenario::Emergency => ScenarioInfo {
                name: "Emergency Response",
                description: "Mobile ambulances with emergency monitoring equipment",
                devices_per_unit: EMERGENCY_DEVICES.len(),
                typical_units: 5,
                fog_nodes: EMERGENCY_NODES.len(),
                characteristics: vec!["Maximum reliability", "Real-time", "Mobile units"],
            },
        }
    }

    /// Adds the devices of `units` beds, patients or ambulances and the fog tier of the
    /// scenario. The seed only matters for the ambulatory patients, who are placed randomly.
    /// Returns the number of sensors created.
    pub fn populate(
        &self,
        twin: &mut DigitalTwinEnvironment,
        units: u32,
        seed: u64,
    ) -> Result<usize, TwinError> {
        let (devices, nodes): (&[DeviceProfile], &[NodeProfile]) = match self {
            HealthcareScenario::Icu => (&ICU_DEVICES[..], &ICU_NODES[..]),
            HealthcareScenario::Ambulatory => (&AMBULATORY_DEVICES[..], &AMBULATORY_NODES[..]),
            HealthcareScenario::Emergency => (&EMERGENCY_DEVICES[..], &EMERGENCY_NODES[..]),
        };

        let mut source = SeededSource::new(seed);
        let mut created = 0;
        for unit in 0..units {
            let position = self.unit_position(unit, &mut source);
            for (k, device) in devices.iter().enumerate() {
                let id = unit * devices.len() as u32 + k as u32;
                twin.add_sensor(device.build(id, position))?;
                created += 1;
            }
        }
        for node in nodes {
            twin.add_fog_node(build_node(node))?;
        }
        info!(
            "{} scenario created with {} sensors and {} fog nodes",
            self,
            created,
            nodes.len()
        );
        Ok(created)
    }

    fn unit_position(&self, unit: u32, source: &mut SeededSource) -> Point2D {
        match self {
            HealthcareScenario::Icu => {
                // 5x2 grid of beds, filled column by column
                let bed = unit % 10;
                Point2D::new(
                    f64::from(bed / 2) * 300.0 + 500.0,
                    f64::from(bed % 2) * 400.0 + 600.0,
                )
            }
            HealthcareScenario::Ambulatory => {
                let ((min_x, max_x), (min_y, max_y)) = AMBULATORY_AREA;
                Point2D::new(source.uniform(min_x, max_x), source.uniform(min_y, max_y))
            }
            HealthcareScenario::Emergency => {
                let (x, y) = AMBULANCE_POSITIONS[unit as usize % AMBULANCE_POSITIONS.len()];
                Point2D::new(x, y)
            }
        }
    }
}

impl DeviceProfile {
    fn build(&self, id: u32, position: Point2D) -> SensorDevice {
        SensorDevice::builder()
            .device_id(SensorId::from(id))
            .coordinates(position.offset(self.offset.0, self.offset.1))
            .transmission_power(Watts::new(self.transmission_power))
            .average_flow_rate(Hertz::new(self.flow_rate))
            .flow_traffic_size(MegaBytes::new(self.traffic_size))
            .average_flow_size(MegaInstructions::new(self.flow_size))
            .build()
    }
}

fn build_node(&(id, (x, y), mips, bandwidth, carrier, noise): &NodeProfile) -> FogNodeDevice {
    FogNodeDevice::builder()
        .node_id(NodeId::from(id))
        .coordinates(Point2D::new(x, y))
        .processing_power(Mips::new(mips))
        .bandwidth(MegaHertz::new(bandwidth))
        .carrier_frequency(GigaHertz::new(carrier))
        .noise_power(Watts::new(noise))
        .build()
}
