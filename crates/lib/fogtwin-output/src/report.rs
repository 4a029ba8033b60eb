//! Plain-text reports of the placement runs.

use std::fmt::Write;

use fogtwin_core::device::NodeId;
use fogtwin_core::indexmap::IndexMap;
use fogtwin_models::metrics::{AssignmentRecord, PerformanceMetrics};

const RULE: &str = "========================================";

/// Report of a single strategy, listing the sensors of every node.
pub fn performance_report(name: &str, metrics: &PerformanceMetrics) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "=== {} PLACEMENT PERFORMANCE REPORT ===\n", name);
    let _ = writeln!(report, "KEY PERFORMANCE INDICATORS:");
    let _ = writeln!(report, "Overall Latency (L): {:.4}", metrics.overall_latency);
    let _ = writeln!(report, "  - Communication Latency: {:.4}", metrics.communication_latency);
    let _ = writeln!(report, "  - Computing Latency: {:.4}", metrics.computing_latency);
    let _ = writeln!(report, "Network Usage: {:.4} MB/s", metrics.network_usage);
    let _ = writeln!(report, "Execution Time: {:.4}", metrics.execution_time);
    let _ = writeln!(report, "Energy Consumption: {:.6} J", metrics.energy_consumption);
    let _ = writeln!(report, "Cost of Execution: {:.4}", metrics.cost_of_execution);
    let _ = writeln!(report, "Load Balance Score: {:.4}", metrics.load_balance_score);
    let _ = writeln!(report, "Max Utilization: {:.2} %", metrics.max_utilization);
    let _ = writeln!(report, "\nDETAILED ASSIGNMENT ANALYSIS:");

    for (node_id, records) in group_by_node(&metrics.detailed_assignments) {
        let _ = writeln!(report, "\nFog Node {}: {} sensors assigned", node_id, records.len());
        for record in records {
            let _ = writeln!(
                report,
                "  Sensor {}: Total Latency = {:.4}",
                record.sensor_id,
                record.total_latency.as_f64()
            );
            let _ = writeln!(report, "    - Communication Latency: {:.4}", record.comm_latency.as_f64());
            let _ = writeln!(report, "    - Computing Latency: {:.4}", record.comp_latency.as_f64());
            let _ = writeln!(report, "    - Distance: {:.2}", record.distance);
            let _ = writeln!(report, "    - Sensor Position: {}", record.sensor_coordinates);
            let _ = writeln!(report, "    - Fog Node Position: {}", record.fog_node_coordinates);
        }
    }
    let _ = writeln!(report, "\n{}", RULE);
    report
}

/// Records grouped by node, in the order in which the nodes first appear.
fn group_by_node(records: &[AssignmentRecord]) -> IndexMap<NodeId, Vec<&AssignmentRecord>> {
    let mut groups: IndexMap<NodeId, Vec<&AssignmentRecord>> = IndexMap::new();
    for record in records {
        groups.entry(record.fog_node_id).or_default().push(record);
    }
    groups
}

/// Side by side summary of the strategies, ranked by overall latency.
pub fn comparison_report(results: &[(String, PerformanceMetrics)]) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "=== ALGORITHM COMPARISON REPORT ===\n");
    for (name, metrics) in results {
        let _ = writeln!(report, "{} Algorithm Results:", name);
        let _ = writeln!(report, "  Overall Latency: {:.4}", metrics.overall_latency);
        let _ = writeln!(report, "  Energy Consumption: {:.6} J", metrics.energy_consumption);
        let _ = writeln!(report, "  Network Usage: {:.4} MB/s", metrics.network_usage);
        let _ = writeln!(report, "  Cost of Execution: {:.4}", metrics.cost_of_execution);
        let _ = writeln!(report, "  Load Balance Score: {:.4}\n", metrics.load_balance_score);
    }

    let _ = writeln!(report, "PERFORMANCE RANKING (lowest latency first):");
    for (rank, name) in ranking(results).into_iter().enumerate() {
        let _ = writeln!(report, "{}. {}", rank + 1, name);
    }
    report
}

/// Strategy names ordered by overall latency. Equal latencies keep their input order.
pub fn ranking(results: &[(String, PerformanceMetrics)]) -> Vec<&str> {
    let mut ranked: Vec<_> = results.iter().collect();
    ranked.sort_by(|a, b| a.1.overall_latency.total_cmp(&b.1.overall_latency));
    ranked.into_iter().map(|(name, _)| name.as_str()).collect()
}

/// Strategy results of one scenario, labelled by the scenario name.
pub type ScenarioOutcome = (String, Vec<(String, PerformanceMetrics)>);

/// Strategy with the lowest overall latency. The first one wins a tie.
pub fn best_performer(results: &[(String, PerformanceMetrics)]) -> Option<(&str, f64)> {
    results
        .iter()
        .map(|(name, metrics)| (name.as_str(), metrics.overall_latency))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Scenario in which `strategy` reached its highest overall latency. Scenarios in which the
/// strategy did not run are ignored.
pub fn most_challenging<'a>(scenarios: &'a [ScenarioOutcome], strategy: &str) -> Option<(&'a str, f64)> {
    scenarios
        .iter()
        .filter_map(|(scenario, results)| {
            results
                .iter()
                .find(|(name, _)| name == strategy)
                .map(|(_, metrics)| (scenario.as_str(), metrics.overall_latency))
        })
        .reduce(|worst, next| if next.1 > worst.1 { next } else { worst })
}

/// Results of every strategy per scenario, followed by how `reference` fares across them.
pub fn cross_scenario_report(scenarios: &[ScenarioOutcome], reference: &str) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "=== HEALTHCARE SCENARIOS EVALUATION REPORT ===\n");
    for (scenario, results) in scenarios {
        let _ = writeln!(report, "{} SCENARIO", scenario.to_uppercase());
        let _ = writeln!(report, "{}", "-".repeat(40));
        if results.is_empty() {
            let _ = writeln!(report, "No strategy could be run\n");
            continue;
        }
        let _ = writeln!(report, "Algorithm Performance:");
        for (name, metrics) in results {
            let _ = writeln!(report, "  {}:", name);
            let _ = writeln!(report, "    Overall Latency: {:.4}", metrics.overall_latency);
            let _ = writeln!(report, "    Energy Consumption: {:.6} J", metrics.energy_consumption);
            let _ = writeln!(report, "    Load Balance Score: {:.4}", metrics.load_balance_score);
        }
        if let Some((name, latency)) = best_performer(results) {
            let _ = writeln!(report, "Best Performer: {} ({:.4})\n", name, latency);
        }
    }

    let _ = writeln!(report, "CROSS-SCENARIO ANALYSIS");
    let _ = writeln!(report, "{}", RULE);
    let _ = writeln!(report, "{} Performance Across Scenarios:", reference);
    for (scenario, results) in scenarios {
        if let Some((_, metrics)) = results.iter().find(|(name, _)| name == reference) {
            let _ = writeln!(report, "  {}: {:.4}", scenario, metrics.overall_latency);
        }
    }
    match most_challenging(scenarios, reference) {
        Some((scenario, latency)) => {
            let _ = writeln!(report, "\nMost Challenging Scenario: {}", scenario);
            let _ = writeln!(report, "Reason: Highest latency ({:.4})", latency);
        }
        None => {
            let _ = writeln!(report, "\n{} did not run in any scenario", reference);
        }
    }
    report
}
