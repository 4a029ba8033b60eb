use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::device::{NodeId, NodeTier, Point2D, SensorId};
use crate::units::{GigaHertz, Hertz, MegaBytes, MegaHertz, MegaInstructions, Mips, Watts};

/// A patient sensor in the IoT tier. It contains everything the latency model needs to know
/// about the workload generated by the sensor. Sensors are never changed once created.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct SensorDevice {
    pub device_id: SensorId,
    pub coordinates: Point2D,
    pub transmission_power: Watts,
    pub average_flow_rate: Hertz,
    /// Size of each message, drives the communication load.
    pub flow_traffic_size: MegaBytes,
    /// Instructions needed per message, drives the computing load.
    pub average_flow_size: MegaInstructions,
}

impl SensorDevice {
    /// Traffic offered to the radio per second (MB/s).
    pub fn traffic_demand(&self) -> f64 {
        self.average_flow_rate.as_f64() * self.flow_traffic_size.as_f64()
    }

    /// Instructions offered to the processor per second (MI/s).
    pub fn compute_demand(&self) -> f64 {
        self.average_flow_rate.as_f64() * self.average_flow_size.as_f64()
    }
}

impl fmt::Display for SensorDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sensor_{} at {}", self.device_id, self.coordinates)
    }
}

/// A compute node of the fog tier. The cloud data center is modelled with the same struct
/// using [NodeTier::Cloud] and a very large capacity.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct FogNodeDevice {
    pub node_id: NodeId,
    pub coordinates: Point2D,
    pub processing_power: Mips,
    pub bandwidth: MegaHertz,
    pub carrier_frequency: GigaHertz,
    pub noise_power: Watts,
    #[builder(default)]
    #[serde(default)]
    pub tier: NodeTier,
}

pub const CLOUD_PROCESSING_POWER: Mips = Mips::new(1e6);
pub const CLOUD_BANDWIDTH: MegaHertz = MegaHertz::new(1000.0);
pub const CLOUD_CARRIER_FREQUENCY: GigaHertz = GigaHertz::new(10.0);
pub const CLOUD_NOISE_POWER: Watts = Watts::new(1e-15);

impl FogNodeDevice {
    /// Builds the singleton cloud node at the given position.
    pub fn cloud(coordinates: Point2D) -> Self {
        Self {
            node_id: NodeId::CLOUD,
            coordinates,
            processing_power: CLOUD_PROCESSING_POWER,
            bandwidth: CLOUD_BANDWIDTH,
            carrier_frequency: CLOUD_CARRIER_FREQUENCY,
            noise_power: CLOUD_NOISE_POWER,
            tier: NodeTier::Cloud,
        }
    }

    pub fn is_cloud(&self) -> bool {
        self.tier == NodeTier::Cloud
    }

    /// Name of the node as known to the simulation engine.
    pub fn node_name(&self) -> String {
        match self.tier {
            NodeTier::Fog => format!("fog_{}", self.node_id),
            NodeTier::Cloud => "cloud".to_string(),
        }
    }
}

impl fmt::Display for FogNodeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tier {
            NodeTier::Fog => write!(f, "FogNode_{} at {}", self.node_id, self.coordinates),
            NodeTier::Cloud => write!(f, "CloudNode at {}", self.coordinates),
        }
    }
}
