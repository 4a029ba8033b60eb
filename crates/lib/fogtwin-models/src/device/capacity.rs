use log::{info, warn};
use serde::{Deserialize, Serialize};

use fogtwin_core::device::NodeId;
use fogtwin_core::environment::DigitalTwinEnvironment;

/// The processing power of a node is never reduced below this share.
pub const MIN_ADJUSTMENT_FACTOR: f64 = 0.5;

/// Average load predicted for a fog node by the workload forecaster, in percent.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CapacityForecast {
    pub node_id: NodeId,
    pub predicted_avg: f64,
}

impl CapacityForecast {
    /// Share of the processing power left to the placed workloads.
    pub fn adjustment_factor(&self) -> f64 {
        (1.0 - self.predicted_avg / 100.0).max(MIN_ADJUSTMENT_FACTOR)
    }
}

/// Rescales the fog nodes named in the forecasts. Must be called before placement.
/// Returns the number of nodes that were rescaled.
pub fn apply_forecasts(twin: &mut DigitalTwinEnvironment, forecasts: &[CapacityForecast]) -> usize {
    let mut adjusted = 0;
    for forecast in forecasts {
        let factor = forecast.adjustment_factor();
        match twin.rescale_processing_power(forecast.node_id, factor) {
            Some(power) => {
                info!(
                    "FogNode {} adjusted: power={:.2}, factor={:.2}",
                    forecast.node_id,
                    power.as_f64(),
                    factor
                );
                adjusted += 1;
            }
            None => warn!(
                "Forecast given for unknown fog node {}, skipping",
                forecast.node_id
            ),
        }
    }
    adjusted
}
