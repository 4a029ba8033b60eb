use fogtwin_core::assignment::AssignmentMap;
use fogtwin_core::device::{NodeId, SensorId};
use fogtwin_core::environment::DigitalTwinEnvironment;
use fogtwin_models::placement::olb::candidate_latency;
use fogtwin_models::placement::{
    available_strategies, LeastLoadedPlacement, NearestPlacement, OlbPlacement, PlacementKind,
    PlacementStrategy, RandomPlacement, StrategySettings,
};
use fogtwin_testutils::devices::{make_fog_node, make_fog_node_with, make_sensor};
use fogtwin_testutils::twin::{line_twin, seeded_twin, twin_with};

fn assert_full_coverage(twin: &DigitalTwinEnvironment, assignments: &AssignmentMap) {
    assert_eq!(assignments.total(), twin.sensors().len());
    for sensor in twin.sensors() {
        let node_id = assignments.node_of(sensor.device_id).expect("sensor is bound");
        assert!(twin.fog_node(node_id).is_some());
    }
}

#[test]
fn test_olb_prefers_nearer_node() {
    let twin = twin_with(
        vec![make_sensor(0, 0.0, 0.0)],
        vec![make_fog_node(0, 100.0, 0.0), make_fog_node(1, 1000.0, 0.0)],
    );
    let assignments = OlbPlacement::new().assign(&twin);
    assert_eq!(assignments.node_of(SensorId::from(0)), Some(NodeId::from(0)));
}

#[test]
fn test_olb_covers_every_sensor() {
    let twin = seeded_twin(50, 5, 42);
    let assignments = OlbPlacement::new().assign(&twin);
    assert_full_coverage(&twin, &assignments);
}

#[test]
fn test_olb_is_deterministic() {
    let twin = seeded_twin(40, 4, 7);
    let first = OlbPlacement::new().assign(&twin);
    let second = OlbPlacement::new().assign(&twin);
    assert_eq!(first, second);
}

#[test]
fn test_olb_choice_is_locally_optimal() {
    let twin = line_twin(12, 3);
    let mut olb = OlbPlacement::new();
    let mut assignments = AssignmentMap::new();
    for sensor in twin.sensors() {
        let chosen = olb.select_node(sensor, &twin, &assignments).unwrap();
        let node = twin.fog_node(chosen).unwrap();
        let best = candidate_latency(sensor, node, &twin, &assignments).unwrap();
        for other in twin.fog_nodes() {
            let latency = candidate_latency(sensor, other, &twin, &assignments).unwrap();
            assert!(best <= latency);
        }
        assignments.commit(chosen, sensor.device_id);
    }
    assert_eq!(olb.fallbacks(), 0);
}

#[test]
fn test_olb_spreads_load() {
    // Identical nodes at the same place: the queue on the busier node breaks the tie.
    let twin = twin_with(
        (0..4).map(|id| make_sensor(id, 100.0, 100.0)).collect(),
        vec![make_fog_node(0, 500.0, 500.0), make_fog_node(1, 500.0, 500.0)],
    );
    let assignments = OlbPlacement::new().assign(&twin);
    assert_eq!(assignments.counts(), vec![2, 2]);
    assert_eq!(assignments.sensors_on(NodeId::from(0)), &[SensorId::from(0), SensorId::from(2)]);
}

#[test]
fn test_olb_falls_back_to_first_node() {
    let twin = twin_with(
        vec![make_sensor(0, 10.0, 10.0), make_sensor(1, 20.0, 20.0)],
        vec![
            make_fog_node_with(0, 500.0, 500.0, 0.0, 50.0),
            make_fog_node_with(1, 100.0, 100.0, 0.0, 50.0),
        ],
    );
    let mut olb = OlbPlacement::new();
    let assignments = olb.assign(&twin);
    assert_eq!(assignments.count_on(NodeId::from(0)), 2);
    assert_eq!(olb.fallbacks(), 2);
}

#[test]
fn test_no_fog_nodes_leaves_sensors_unassigned() {
    let twin = twin_with(vec![make_sensor(0, 10.0, 10.0)], vec![]);
    let mut olb = OlbPlacement::new();
    assert!(olb.select_node(&twin.sensors()[0], &twin, &AssignmentMap::new()).is_none());
    assert!(olb.assign(&twin).is_empty());
    assert!(RandomPlacement::new(1).assign(&twin).is_empty());
    assert!(NearestPlacement::new().assign(&twin).is_empty());
    assert!(LeastLoadedPlacement::new().assign(&twin).is_empty());
}

#[test]
fn test_random_is_seeded() {
    let twin = seeded_twin(30, 5, 3);
    let first = RandomPlacement::new(11).assign(&twin);
    let second = RandomPlacement::new(11).assign(&twin);
    assert_eq!(first, second);
    assert_full_coverage(&twin, &first);
}

#[test]
fn test_nearest_picks_closest_node() {
    let twin = twin_with(
        vec![make_sensor(0, 100.0, 100.0), make_sensor(1, 900.0, 100.0), make_sensor(2, 650.0, 500.0)],
        vec![
            make_fog_node(0, 200.0, 400.0),
            make_fog_node(1, 600.0, 400.0),
            make_fog_node(2, 1000.0, 400.0),
        ],
    );
    let assignments = NearestPlacement::new().assign(&twin);
    assert_eq!(assignments.node_of(SensorId::from(0)), Some(NodeId::from(0)));
    assert_eq!(assignments.node_of(SensorId::from(1)), Some(NodeId::from(2)));
    assert_eq!(assignments.node_of(SensorId::from(2)), Some(NodeId::from(1)));
}

#[test]
fn test_least_loaded_round_robin() {
    let twin = line_twin(7, 3);
    let assignments = LeastLoadedPlacement::new().assign(&twin);
    for sensor in twin.sensors() {
        let expected = NodeId::from(sensor.device_id.as_u32() % 3);
        assert_eq!(assignments.node_of(sensor.device_id), Some(expected));
    }
    assert_eq!(assignments.counts(), vec![3, 2, 2]);
}

#[test]
fn test_strategy_names() {
    let names: Vec<String> = available_strategies()
        .into_iter()
        .map(|kind| {
            let strategy = StrategySettings::builder().kind(kind).build().build().unwrap();
            assert_eq!(strategy.name(), kind.to_string());
            kind.to_string()
        })
        .collect();
    assert_eq!(names, vec!["OLB", "Random", "Distance", "LoadBalanced"]);
}

#[test]
fn test_fnpa_has_no_implementation() {
    let settings = StrategySettings::builder().kind(PlacementKind::Fnpa).build();
    assert!(settings.build().is_none());
    assert!(!available_strategies().contains(&PlacementKind::Fnpa));
}
