use std::fs;
use std::path::PathBuf;

use fogtwin_models::metrics::{MetricsSettings, PerformanceMetrics};
use fogtwin_models::placement::deploy::AllocationReport;
use fogtwin_models::placement::{OlbPlacement, PlacementStrategy};
use fogtwin_output::writer::{ResultWriter, SimulationMetadata, SimulationResults};
use fogtwin_testutils::twin::line_twin;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fogtwin-output-{}-{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    dir
}

#[test]
fn test_results_file_layout() {
    let dir = scratch_dir("json");
    let twin = line_twin(5, 2);
    let assignments = OlbPlacement::new().assign(&twin);
    let metrics = PerformanceMetrics::collect(&twin, &assignments, &MetricsSettings::default());
    let summary = twin.summary();
    let config = serde_json::json!({ "sensor_count": 5 });
    let results = SimulationResults {
        simulation_config: &config,
        environment_info: &summary,
        performance_metrics: &metrics,
        simulation_metadata: SimulationMetadata::new("OLB", AllocationReport::default()),
    };

    let writer = ResultWriter::new(&dir).unwrap();
    let path = writer.write_results("OLB", &results).unwrap();
    assert_eq!(path, dir.join("data").join("olb_results.json"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for key in [
        "simulation_config",
        "environment_info",
        "performance_metrics",
        "simulation_metadata",
    ] {
        assert!(written.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(written["environment_info"]["num_sensors"], 5);
    assert_eq!(written["simulation_metadata"]["algorithm"], "OLB");
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_assignment_table() {
    let dir = scratch_dir("csv");
    let twin = line_twin(3, 1);
    let assignments = OlbPlacement::new().assign(&twin);
    let metrics = PerformanceMetrics::collect(&twin, &assignments, &MetricsSettings::default());

    let writer = ResultWriter::new(&dir).unwrap();
    let path = writer
        .write_assignments("Load Balanced", &metrics.detailed_assignments)
        .unwrap();
    assert_eq!(path, dir.join("data").join("load_balanced_assignments.csv"));

    let table = fs::read_to_string(&path).unwrap();
    let mut lines = table.lines();
    assert!(lines.next().unwrap().starts_with("sensor_id,fog_node_id,comm_latency"));
    assert_eq!(lines.count(), 3);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_text_report() {
    let dir = scratch_dir("txt");
    let writer = ResultWriter::new(&dir).unwrap();
    let path = writer.write_report("comparison_report", "ranking").unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "ranking");
    fs::remove_dir_all(&dir).unwrap();
}
