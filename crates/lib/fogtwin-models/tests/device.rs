use fogtwin_core::device::NodeId;
use fogtwin_core::model::Model;
use fogtwin_models::device::capacity::{apply_forecasts, CapacityForecast};
use fogtwin_models::device::energy::{EnergyModel, EnergySettings};
use fogtwin_testutils::devices::{make_fog_node, make_sensor};
use fogtwin_testutils::twin::line_twin;

fn forecast(node_id: u32, predicted_avg: f64) -> CapacityForecast {
    CapacityForecast {
        node_id: NodeId::from(node_id),
        predicted_avg,
    }
}

#[test]
fn test_adjustment_factor() {
    assert!((forecast(0, 30.0).adjustment_factor() - 0.7).abs() < 1e-12);
    assert_eq!(forecast(0, 0.0).adjustment_factor(), 1.0);
    assert_eq!(forecast(0, 80.0).adjustment_factor(), 0.5);
    assert_eq!(forecast(0, 150.0).adjustment_factor(), 0.5);
}

#[test]
fn test_apply_forecasts_skips_unknown_nodes() {
    let mut twin = line_twin(0, 2);
    let adjusted = apply_forecasts(&mut twin, &[forecast(0, 30.0), forecast(9, 50.0)]);
    assert_eq!(adjusted, 1);
    let node_0 = twin.fog_node(NodeId::from(0)).unwrap();
    let node_1 = twin.fog_node(NodeId::from(1)).unwrap();
    assert!((node_0.processing_power.as_f64() - 1400.0).abs() < 1e-9);
    assert_eq!(node_1.processing_power.as_f64(), 2000.0);
}

#[test]
fn test_energy_model() {
    let sensor = make_sensor(0, 0.0, 0.0);
    let node = make_fog_node(0, 100.0, 0.0);
    let model = EnergyModel::default();
    assert!((model.transmission_energy(&sensor, &node).as_f64() - 0.005).abs() < 1e-15);
    assert!((model.processing_energy(&sensor, &node).as_f64() - 5e-7).abs() < 1e-18);
    assert!((model.measure(&sensor, &node).as_f64() - 0.0050005).abs() < 1e-15);
}

#[test]
fn test_energy_settings() {
    let settings: EnergySettings = serde_json::from_str(r#"{"bandwidth_scale": 2.0}"#).unwrap();
    assert_eq!(settings.processing_coefficient, 1e-9);
    let model = EnergyModel::with_settings(&settings);
    let sensor = make_sensor(0, 0.0, 0.0);
    let node = make_fog_node(0, 100.0, 0.0);
    assert!((model.transmission_energy(&sensor, &node).as_f64() - 0.0025).abs() < 1e-15);
}
