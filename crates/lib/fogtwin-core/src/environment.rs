use hashbrown::HashMap;
use log::{debug, info};
use serde::Serialize;

use crate::device::{DeviceKind, NodeId, Point2D, SensorId};
use crate::dist::SeededSource;
use crate::entity::{FogNodeDevice, SensorDevice};
use crate::error::TwinError;
use crate::units::{GigaHertz, Hertz, MegaBytes, MegaHertz, MegaInstructions, Mips, Watts};

pub const DEFAULT_WIDTH: f64 = 3000.0;
pub const DEFAULT_HEIGHT: f64 = 2000.0;

/// Fog nodes keep this distance from the border of the field when placed randomly.
const FOG_MARGIN: f64 = 100.0;
const FOG_MAX_X: f64 = 2500.0;
const FOG_MAX_Y: f64 = 1500.0;
/// Offset between the random stream of the sensors and the one of the fog nodes.
const FOG_SEED_OFFSET: u64 = 100;
/// Distance of the cloud above the upper border of the field.
const CLOUD_OFFSET: f64 = 500.0;

/// The digital twin of the deployment. It owns all the sensors and fog nodes of a run and
/// guarantees that every one of them lies within `[0, width] x [0, height]`.
///
/// The environment is populated once, either by the seeded initializers or by a scenario
/// generator. Both go through [DigitalTwinEnvironment::add_sensor] and
/// [DigitalTwinEnvironment::add_fog_node]. Afterwards it is read-only apart from
/// [DigitalTwinEnvironment::rescale_processing_power].
#[derive(Debug, Clone)]
pub struct DigitalTwinEnvironment {
    width: f64,
    height: f64,
    sensors: Vec<SensorDevice>,
    fog_nodes: Vec<FogNodeDevice>,
    cloud_node: Option<FogNodeDevice>,
    sensor_index: HashMap<SensorId, usize>,
    node_index: HashMap<NodeId, usize>,
}

impl Default for DigitalTwinEnvironment {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl DigitalTwinEnvironment {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            sensors: Vec::new(),
            fog_nodes: Vec::new(),
            cloud_node: None,
            sensor_index: HashMap::new(),
            node_index: HashMap::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn contains(&self, point: &Point2D) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    fn check_bounds(&self, kind: DeviceKind, id: u32, point: &Point2D) -> Result<(), TwinError> {
        if self.contains(point) {
            return Ok(());
        }
        Err(TwinError::BoundsViolation {
            kind,
            id,
            x: point.x,
            y: point.y,
            width: self.width,
            height: self.height,
        })
    }

    pub fn add_sensor(&mut self, sensor: SensorDevice) -> Result<(), TwinError> {
        let id = sensor.device_id.as_u32();
        self.check_bounds(DeviceKind::Sensor, id, &sensor.coordinates)?;
        if self.sensor_index.contains_key(&sensor.device_id) {
            return Err(TwinError::DuplicateId {
                kind: DeviceKind::Sensor,
                id,
            });
        }
        debug!("Adding {}", sensor);
        self.sensor_index.insert(sensor.device_id, self.sensors.len());
        self.sensors.push(sensor);
        Ok(())
    }

    pub fn add_fog_node(&mut self, fog_node: FogNodeDevice) -> Result<(), TwinError> {
        let id = fog_node.node_id.as_u32();
        self.check_bounds(DeviceKind::FogNode, id, &fog_node.coordinates)?;
        if self.node_index.contains_key(&fog_node.node_id) {
            return Err(TwinError::DuplicateId {
                kind: DeviceKind::FogNode,
                id,
            });
        }
        debug!(
            "Adding {} with {} and {}",
            fog_node, fog_node.processing_power, fog_node.bandwidth
        );
        self.node_index.insert(fog_node.node_id, self.fog_nodes.len());
        self.fog_nodes.push(fog_node);
        Ok(())
    }

    /// Creates `count` sensors with attributes drawn uniformly from the documented ranges.
    pub fn initialize_sensors(&mut self, count: u32, seed: u64) -> Result<(), TwinError> {
        info!(
            "Initializing {} sensors in a {}x{} environment",
            count, self.width, self.height
        );
        let mut source = SeededSource::new(seed);
        let first_id = self.sensors.len() as u32;
        for id in first_id..first_id + count {
            let coordinates = Point2D::new(
                source.uniform(0.0, self.width),
                source.uniform(0.0, self.height),
            );
            let sensor = SensorDevice::builder()
                .device_id(SensorId::from(id))
                .coordinates(coordinates)
                .transmission_power(Watts::new(source.uniform(0.1, 1.0)))
                .average_flow_rate(Hertz::new(source.uniform(0.5, 2.0)))
                .flow_traffic_size(MegaBytes::new(source.uniform(0.1, 1.0)))
                .average_flow_size(MegaInstructions::new(source.uniform(100.0, 1000.0)))
                .build();
            self.add_sensor(sensor)?;
        }
        Ok(())
    }

    /// Creates `count` fog nodes with attributes drawn uniformly from the documented ranges.
    /// The nodes are kept away from the border of the field whenever the field is large
    /// enough for it.
    pub fn initialize_fog_nodes(&mut self, count: u32, seed: u64) -> Result<(), TwinError> {
        info!("Initializing {} fog nodes", count);
        let mut source = SeededSource::new(seed.wrapping_add(FOG_SEED_OFFSET));
        let (min_x, max_x) = Self::fog_range(self.width, FOG_MAX_X);
        let (min_y, max_y) = Self::fog_range(self.height, FOG_MAX_Y);
        let first_id = self.fog_nodes.len() as u32;
        for id in first_id..first_id + count {
            let coordinates =
                Point2D::new(source.uniform(min_x, max_x), source.uniform(min_y, max_y));
            let fog_node = FogNodeDevice::builder()
                .node_id(NodeId::from(id))
                .coordinates(coordinates)
                .processing_power(Mips::new(source.uniform(1000.0, 5000.0)))
                .bandwidth(MegaHertz::new(source.uniform(10.0, 100.0)))
                .carrier_frequency(GigaHertz::new(source.uniform(2.4, 5.0)))
                .noise_power(Watts::new(source.uniform(1e-12, 1e-10)))
                .build();
            self.add_fog_node(fog_node)?;
        }
        Ok(())
    }

    fn fog_range(extent: f64, cap: f64) -> (f64, f64) {
        let max = cap.min(extent - FOG_MARGIN);
        if max <= FOG_MARGIN {
            return (0.0, extent);
        }
        (FOG_MARGIN, max)
    }

    /// Places the cloud centered above the field. The cloud is outside the field on
    /// purpose and hence not bounds-checked.
    pub fn initialize_cloud(&mut self) {
        let coordinates = Point2D::new(self.width / 2.0, self.height + CLOUD_OFFSET);
        let cloud = FogNodeDevice::cloud(coordinates);
        info!("Cloud node initialized at {}", coordinates);
        self.cloud_node = Some(cloud);
    }

    /// Scales the processing power of a fog node, e.g. with a factor derived from a
    /// workload forecast. Returns the new capacity, or `None` for an unknown node.
    pub fn rescale_processing_power(&mut self, node_id: NodeId, factor: f64) -> Option<Mips> {
        let index = *self.node_index.get(&node_id)?;
        let fog_node = &mut self.fog_nodes[index];
        fog_node.processing_power = fog_node.processing_power * factor;
        Some(fog_node.processing_power)
    }

    pub fn sensors(&self) -> &[SensorDevice] {
        &self.sensors
    }

    pub fn fog_nodes(&self) -> &[FogNodeDevice] {
        &self.fog_nodes
    }

    pub fn cloud_node(&self) -> Option<&FogNodeDevice> {
        self.cloud_node.as_ref()
    }

    pub fn sensor(&self, sensor_id: SensorId) -> Option<&SensorDevice> {
        self.sensor_index
            .get(&sensor_id)
            .map(|&index| &self.sensors[index])
    }

    pub fn fog_node(&self, node_id: NodeId) -> Option<&FogNodeDevice> {
        self.node_index
            .get(&node_id)
            .map(|&index| &self.fog_nodes[index])
    }

    /// Resolves a list of sensor IDs, silently dropping unknown ones.
    pub fn sensors_for(&self, sensor_ids: &[SensorId]) -> Vec<&SensorDevice> {
        sensor_ids
            .iter()
            .filter_map(|sensor_id| self.sensor(*sensor_id))
            .collect()
    }

    pub fn summary(&self) -> EnvironmentSummary {
        EnvironmentSummary {
            environment_size: (self.width, self.height),
            num_sensors: self.sensors.len(),
            num_fog_nodes: self.fog_nodes.len(),
            sensor_positions: self.sensors.iter().map(|s| s.coordinates).collect(),
            fog_node_positions: self.fog_nodes.iter().map(|f| f.coordinates).collect(),
            cloud_node: CloudSummary {
                exists: self.cloud_node.is_some(),
                coordinates: self.cloud_node.map(|c| c.coordinates),
                processing_power: self.cloud_node.map(|c| c.processing_power),
                bandwidth: self.cloud_node.map(|c| c.bandwidth),
            },
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CloudSummary {
    pub exists: bool,
    pub coordinates: Option<Point2D>,
    pub processing_power: Option<Mips>,
    pub bandwidth: Option<MegaHertz>,
}

/// Serializable snapshot of the environment that accompanies every result file.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EnvironmentSummary {
    pub environment_size: (f64, f64),
    pub num_sensors: usize,
    pub num_fog_nodes: usize,
    pub sensor_positions: Vec<Point2D>,
    pub fog_node_positions: Vec<Point2D>,
    pub cloud_node: CloudSummary,
}
