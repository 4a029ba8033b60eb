use fogtwin_core::entity::{FogNodeDevice, SensorDevice};
use fogtwin_core::environment::DigitalTwinEnvironment;

use crate::devices::{make_fog_node, make_sensor};

pub fn twin_with(sensors: Vec<SensorDevice>, fog_nodes: Vec<FogNodeDevice>) -> DigitalTwinEnvironment {
    let mut twin = DigitalTwinEnvironment::new(3000.0, 2000.0);
    for fog_node in fog_nodes {
        twin.add_fog_node(fog_node).expect("fog node within bounds");
    }
    for sensor in sensors {
        twin.add_sensor(sensor).expect("sensor within bounds");
    }
    twin
}

/// Sensors spread along a line and fog nodes along a parallel line, all with the default
/// workload and capacity.
pub fn line_twin(sensor_count: u32, node_count: u32) -> DigitalTwinEnvironment {
    let sensors = (0..sensor_count)
        .map(|id| make_sensor(id, 100.0 + 50.0 * id as f64, 100.0))
        .collect();
    let fog_nodes = (0..node_count)
        .map(|id| make_fog_node(id, 200.0 + 400.0 * id as f64, 400.0))
        .collect();
    twin_with(sensors, fog_nodes)
}

/// A randomly populated twin as used by the simulator.
pub fn seeded_twin(sensor_count: u32, node_count: u32, seed: u64) -> DigitalTwinEnvironment {
    let mut twin = DigitalTwinEnvironment::new(3000.0, 2000.0);
    twin.initialize_sensors(sensor_count, seed)
        .expect("random sensors within bounds");
    twin.initialize_fog_nodes(node_count, seed)
        .expect("random fog nodes within bounds");
    twin
}
