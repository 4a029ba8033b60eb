use fogtwin_core::device::{NodeId, Point2D, SensorId};
use fogtwin_core::entity::{FogNodeDevice, SensorDevice};
use fogtwin_core::units::{GigaHertz, Hertz, MegaBytes, MegaHertz, MegaInstructions, Mips, Watts};

/// A sensor with the workload used throughout the tests: 0.5 W, 1 Hz, 0.5 MB, 500 MI.
pub fn make_sensor(id: u32, x: f64, y: f64) -> SensorDevice {
    SensorDevice::builder()
        .device_id(SensorId::from(id))
        .coordinates(Point2D::new(x, y))
        .transmission_power(Watts::new(0.5))
        .average_flow_rate(Hertz::new(1.0))
        .flow_traffic_size(MegaBytes::new(0.5))
        .average_flow_size(MegaInstructions::new(500.0))
        .build()
}

pub fn make_sensor_with_load(id: u32, x: f64, y: f64, rate: f64, traffic: f64, size: f64) -> SensorDevice {
    SensorDevice::builder()
        .device_id(SensorId::from(id))
        .coordinates(Point2D::new(x, y))
        .transmission_power(Watts::new(0.5))
        .average_flow_rate(Hertz::new(rate))
        .flow_traffic_size(MegaBytes::new(traffic))
        .average_flow_size(MegaInstructions::new(size))
        .build()
}

/// A fog node with 2000 MIPS, 50 MHz, 2.4 GHz and 1e-10 W of noise.
pub fn make_fog_node(id: u32, x: f64, y: f64) -> FogNodeDevice {
    make_fog_node_with(id, x, y, 2000.0, 50.0)
}

pub fn make_fog_node_with(id: u32, x: f64, y: f64, mips: f64, bandwidth: f64) -> FogNodeDevice {
    FogNodeDevice::builder()
        .node_id(NodeId::from(id))
        .coordinates(Point2D::new(x, y))
        .processing_power(Mips::new(mips))
        .bandwidth(MegaHertz::new(bandwidth))
        .carrier_frequency(GigaHertz::new(2.4))
        .noise_power(Watts::new(1e-10))
        .build()
}
