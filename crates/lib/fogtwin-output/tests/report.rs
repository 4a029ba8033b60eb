use fogtwin_models::metrics::{MetricsSettings, PerformanceMetrics};
use fogtwin_models::placement::{LeastLoadedPlacement, NearestPlacement, PlacementStrategy};
use fogtwin_output::report::{
    best_performer, comparison_report, cross_scenario_report, most_challenging, performance_report, ranking,
    ScenarioOutcome,
};
use fogtwin_testutils::twin::line_twin;

fn metrics_with_latency(overall_latency: f64) -> PerformanceMetrics {
    PerformanceMetrics {
        overall_latency,
        ..PerformanceMetrics::default()
    }
}

#[test]
fn test_report_lists_every_node() {
    let twin = line_twin(4, 2);
    let assignments = LeastLoadedPlacement::new().assign(&twin);
    let metrics = PerformanceMetrics::collect(&twin, &assignments, &MetricsSettings::default());
    let report = performance_report("LoadBalanced", &metrics);

    assert!(report.starts_with("=== LoadBalanced PLACEMENT PERFORMANCE REPORT ==="));
    assert!(report.contains("Fog Node 0: 2 sensors assigned"));
    assert!(report.contains("Fog Node 1: 2 sensors assigned"));
    assert!(report.contains("  Sensor 3: Total Latency = "));
    assert!(report.find("Fog Node 0").unwrap() < report.find("Fog Node 1").unwrap());
}

#[test]
fn test_ranking_by_overall_latency() {
    let results = vec![
        ("OLB".to_string(), metrics_with_latency(3.0)),
        ("Random".to_string(), metrics_with_latency(9.5)),
        ("Distance".to_string(), metrics_with_latency(1.25)),
        ("LoadBalanced".to_string(), metrics_with_latency(3.0)),
    ];
    assert_eq!(ranking(&results), vec!["Distance", "OLB", "LoadBalanced", "Random"]);

    let report = comparison_report(&results);
    assert!(report.contains("1. Distance\n"));
    assert!(report.contains("4. Random\n"));
    assert!(report.contains("Random Algorithm Results:\n  Overall Latency: 9.5000"));
}

#[test]
fn test_comparison_of_real_runs() {
    let twin = line_twin(6, 3);
    let settings = MetricsSettings::default();
    let results: Vec<(String, PerformanceMetrics)> = vec![
        Box::new(NearestPlacement::new()) as Box<dyn PlacementStrategy>,
        Box::new(LeastLoadedPlacement::new()),
    ]
    .into_iter()
    .map(|mut strategy| {
        let assignments = strategy.assign(&twin);
        (
            strategy.name().to_string(),
            PerformanceMetrics::collect(&twin, &assignments, &settings),
        )
    })
    .collect();
    assert_eq!(ranking(&results).len(), 2);
}

fn scenario(name: &str, latencies: &[(&str, f64)]) -> ScenarioOutcome {
    let results = latencies
        .iter()
        .map(|(strategy, latency)| (strategy.to_string(), metrics_with_latency(*latency)))
        .collect();
    (name.to_string(), results)
}

#[test]
fn test_best_performer_per_scenario() {
    let icu = scenario("icu", &[("OLB", 4.0), ("Random", 7.0), ("Distance", 4.0)]);
    assert_eq!(best_performer(&icu.1), Some(("OLB", 4.0)));
    assert_eq!(best_performer(&[]), None);
}

#[test]
fn test_most_challenging_scenario() {
    let scenarios = vec![
        scenario("icu", &[("OLB", 4.0), ("Random", 7.0)]),
        scenario("ambulatory", &[("OLB", 2.5), ("Random", 30.0)]),
        scenario("emergency", &[("OLB", 11.0), ("Random", 12.0)]),
        scenario("empty", &[("Random", 99.0)]),
    ];
    assert_eq!(most_challenging(&scenarios, "OLB"), Some(("emergency", 11.0)));
    assert_eq!(most_challenging(&scenarios, "Random"), Some(("empty", 99.0)));
    assert_eq!(most_challenging(&scenarios, "FNPA"), None);
}

#[test]
fn test_cross_scenario_report() {
    let scenarios = vec![
        scenario("icu", &[("OLB", 4.0), ("Random", 7.0)]),
        scenario("emergency", &[("Random", 3.0), ("OLB", 11.0)]),
    ];
    let report = cross_scenario_report(&scenarios, "OLB");

    assert!(report.starts_with("=== HEALTHCARE SCENARIOS EVALUATION REPORT ==="));
    assert!(report.contains("ICU SCENARIO\n"));
    assert!(report.contains("Best Performer: OLB (4.0000)"));
    assert!(report.contains("Best Performer: Random (3.0000)"));
    assert!(report.contains("  emergency: 11.0000\n"));
    assert!(report.contains("Most Challenging Scenario: emergency\n"));
    assert!(report.find("ICU SCENARIO").unwrap() < report.find("EMERGENCY SCENARIO").unwrap());
}
