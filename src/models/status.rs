// Printer status models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaterState {
    pub temperature: f64,
    pub target: f64,
    pub power: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterStatus {
    /// Klipper print_stats state: standby, printing, paused, complete, cancelled, error.
    pub state: String,
    pub filename: String,
    /// 0.0..=1.0
    pub progress: f64,
    pub print_duration: f64,
    pub message: String,
    pub extruder: HeaterState,
    pub bed: HeaterState,
}
