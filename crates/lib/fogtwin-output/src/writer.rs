use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use fogtwin_core::environment::EnvironmentSummary;
use fogtwin_models::metrics::{AssignmentRecord, PerformanceMetrics};
use fogtwin_models::placement::deploy::AllocationReport;

use crate::error::OutputError;

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputSettings {
    pub output_path: String,
    #[serde(default = "default_true")]
    pub write_assignments: bool,
    #[serde(default = "default_true")]
    pub write_reports: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationMetadata {
    pub algorithm: String,
    pub framework: &'static str,
    pub generated_at: String,
    pub allocation: AllocationReport,
}

impl SimulationMetadata {
    pub fn new(algorithm: &str, allocation: AllocationReport) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            framework: concat!("fogtwin ", env!("CARGO_PKG_VERSION")),
            generated_at: Utc::now().to_rfc3339(),
            allocation,
        }
    }
}

/// Everything written to the JSON result file of one strategy.
#[derive(Serialize, Debug)]
pub struct SimulationResults<'a, C: Serialize> {
    pub simulation_config: &'a C,
    pub environment_info: &'a EnvironmentSummary,
    pub performance_metrics: &'a PerformanceMetrics,
    pub simulation_metadata: SimulationMetadata,
}

/// Flat version of [AssignmentRecord] for the CSV table.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AssignmentRow {
    pub sensor_id: u32,
    pub fog_node_id: u32,
    pub comm_latency: f64,
    pub comp_latency: f64,
    pub total_latency: f64,
    pub energy: f64,
    pub distance: f64,
    pub sensor_x: f64,
    pub sensor_y: f64,
    pub fog_node_x: f64,
    pub fog_node_y: f64,
}

impl From<&AssignmentRecord> for AssignmentRow {
    fn from(record: &AssignmentRecord) -> Self {
        Self {
            sensor_id: record.sensor_id.as_u32(),
            fog_node_id: record.fog_node_id.as_u32(),
            comm_latency: record.comm_latency.as_f64(),
            comp_latency: record.comp_latency.as_f64(),
            total_latency: record.total_latency.as_f64(),
            energy: record.energy.as_f64(),
            distance: record.distance,
            sensor_x: record.sensor_coordinates.x,
            sensor_y: record.sensor_coordinates.y,
            fog_node_x: record.fog_node_coordinates.x,
            fog_node_y: record.fog_node_coordinates.y,
        }
    }
}

/// Writes the result files below `<output_path>/data` and `<output_path>/reports`.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    data_path: PathBuf,
    report_path: PathBuf,
}

impl ResultWriter {
    pub fn new(output_path: &Path) -> Result<Self, OutputError> {
        let data_path = output_path.join("data");
        let report_path = output_path.join("reports");
        for dir in [&data_path, &report_path] {
            fs::create_dir_all(dir).map_err(|e| OutputError::io(dir, e))?;
        }
        Ok(Self {
            data_path,
            report_path,
        })
    }

    pub fn write_results<C: Serialize>(
        &self,
        name: &str,
        results: &SimulationResults<C>,
    ) -> Result<PathBuf, OutputError> {
        let file_name = self.data_path.join(format!("{}_results.json", file_stem(name)));
        let json = serde_json::to_string_pretty(results)?;
        fs::write(&file_name, json).map_err(|e| OutputError::io(&file_name, e))?;
        info!("Results of {} written to {}", name, file_name.display());
        Ok(file_name)
    }

    pub fn write_assignments(
        &self,
        name: &str,
        records: &[AssignmentRecord],
    ) -> Result<PathBuf, OutputError> {
        let file_name = self
            .data_path
            .join(format!("{}_assignments.csv", file_stem(name)));
        let mut writer = csv::Writer::from_path(&file_name)?;
        for record in records {
            writer.serialize(AssignmentRow::from(record))?;
        }
        writer.flush().map_err(|e| OutputError::io(&file_name, e))?;
        Ok(file_name)
    }

    /// Writes a text report, `name` being the file stem without extension.
    pub fn write_report(&self, name: &str, report: &str) -> Result<PathBuf, OutputError> {
        let file_name = self.report_path.join(format!("{}.txt", file_stem(name)));
        fs::write(&file_name, report).map_err(|e| OutputError::io(&file_name, e))?;
        Ok(file_name)
    }
}

fn file_stem(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
