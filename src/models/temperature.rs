// Temperature history chart payload

use serde::{Deserialize, Serialize};

/// One heater's window. All three sequences have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureChannel {
    pub temperatures: Vec<f64>,
    pub targets: Vec<f64>,
    pub powers: Vec<f64>,
}

impl TemperatureChannel {
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }
}

/// Chart payload; `timestamps` are synthetic `HH:MM` labels, one per kept sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureHistory {
    pub timestamps: Vec<String>,
    pub extruder: TemperatureChannel,
    pub bed: TemperatureChannel,
}
