use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::{NodeId, SensorId};
use fogtwin_models::metrics::{load_balance_score, max_utilization, MetricsSettings, PerformanceMetrics};
use fogtwin_models::placement::{OlbPlacement, PlacementStrategy};
use fogtwin_testutils::twin::{line_twin, seeded_twin};

fn manual_assignments(layout: &[(u32, Vec<u32>)]) -> AssignmentMap {
    let mut assignments = AssignmentMap::new();
    for (node_id, sensor_ids) in layout {
        for sensor_id in sensor_ids {
            assignments.commit(NodeId::from(*node_id), SensorId::from(*sensor_id));
        }
    }
    assignments
}

#[test]
fn test_even_split_is_balanced() {
    let assignments = manual_assignments(&[(0, vec![0, 1]), (1, vec![2, 3])]);
    assert_eq!(load_balance_score(&assignments), 1.0);
}

#[test]
fn test_uneven_split_is_penalised() {
    let assignments = manual_assignments(&[(0, vec![0, 1, 2]), (1, vec![3])]);
    let score = load_balance_score(&assignments);
    assert!(score < 1.0);
    assert!((score - 0.5).abs() < 1e-12);
}

#[test]
fn test_single_node_is_balanced() {
    let assignments = manual_assignments(&[(1, vec![0, 1, 2])]);
    assert_eq!(load_balance_score(&assignments), 1.0);
}

#[test]
fn test_latencies_use_final_bindings() {
    let twin = line_twin(4, 2);
    let assignments = manual_assignments(&[(0, vec![0, 1, 2]), (1, vec![3])]);
    let metrics = PerformanceMetrics::collect(&twin, &assignments, &MetricsSettings::default());

    // Three sensors of 500 MI/s on 2000 MIPS load node 0 to 0.75, the lone one node 1 to 0.25.
    let expected = 3.0 * 3.0 + 1.0 / 3.0;
    assert!((metrics.computing_latency - expected).abs() < 1e-9);
    assert!(
        (metrics.overall_latency - (metrics.communication_latency + metrics.computing_latency))
            .abs()
            < 1e-12
    );
    assert!((metrics.execution_time - metrics.overall_latency / 4.0).abs() < 1e-12);
    assert!((metrics.max_utilization - 75.0).abs() < 1e-9);
    assert!((metrics.load_balance_score - 0.5).abs() < 1e-12);
    assert_eq!(metrics.detailed_assignments.len(), 4);
}

#[test]
fn test_energy_and_cost() {
    let twin = line_twin(1, 1);
    let assignments = manual_assignments(&[(0, vec![0])]);
    let metrics = PerformanceMetrics::collect(&twin, &assignments, &MetricsSettings::default());

    // 0.5 W for 0.5 MB over 50 MHz, plus 1e-9 * 2000 MIPS * 0.25 s
    let energy = 0.5 * 0.5 / 50.0 + 1e-9 * 2000.0 * 0.25;
    assert!((metrics.energy_consumption - energy).abs() < 1e-15);
    assert!((metrics.network_usage - 0.5).abs() < 1e-12);

    let cost = 0.1 * metrics.overall_latency + 0.05 * 0.5 + 0.02 * energy;
    assert!((metrics.cost_of_execution - cost).abs() < 1e-12);

    let record = &metrics.detailed_assignments[0];
    assert_eq!(record.sensor_id, SensorId::from(0));
    assert_eq!(record.fog_node_id, NodeId::from(0));
    assert!((record.distance - (100.0f64.powi(2) + 300.0f64.powi(2)).sqrt()).abs() < 1e-9);
}

#[test]
fn test_empty_placement() {
    let twin = line_twin(0, 2);
    let metrics =
        PerformanceMetrics::collect(&twin, &AssignmentMap::new(), &MetricsSettings::default());
    assert_eq!(metrics.overall_latency, 0.0);
    assert_eq!(metrics.execution_time, 0.0);
    assert_eq!(metrics.max_utilization, 0.0);
    assert_eq!(metrics.load_balance_score, 1.0);
    assert_eq!(max_utilization(&twin, &AssignmentMap::new()), 0.0);
}

#[test]
fn test_metrics_keys() {
    let twin = seeded_twin(10, 3, 42);
    let assignments = OlbPlacement::new().assign(&twin);
    let metrics = PerformanceMetrics::collect(&twin, &assignments, &MetricsSettings::default());
    let value = serde_json::to_value(&metrics).unwrap();
    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(|key| key.as_str())
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "communication_latency",
            "computing_latency",
            "cost_of_execution",
            "detailed_assignments",
            "energy_consumption",
            "execution_time",
            "load_balance_score",
            "max_utilization",
            "network_usage",
            "overall_latency",
        ]
    );
    assert!(metrics.load_balance_score > 0.0 && metrics.load_balance_score <= 1.0);
    assert_eq!(value["detailed_assignments"].as_array().unwrap().len(), 10);
}
