// Raw Moonraker JSON -> dashboard schema. Pure functions; missing or mistyped fields
// become zero values so the output shape never changes.

pub mod resolution;
mod status;
mod system;
mod temperature;
mod webcams;

pub use status::printer_status;
pub use system::{moonraker_uptime, per_core_usage, system_info, system_stats};
pub use temperature::{MAX_HISTORY_POINTS, temperature_history};
pub use webcams::webcam_list;

use serde_json::Value;

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn f64_at(v: &Value, key: &str) -> f64 {
    v.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub(crate) fn u64_at(v: &Value, key: &str) -> u64 {
    match v.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

pub(crate) fn bool_at(v: &Value, key: &str) -> bool {
    v.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn str_at(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Numeric array, non-numbers dropped as 0.0 so indices stay aligned.
pub(crate) fn f64_array_at(v: &Value, key: &str) -> Vec<f64> {
    v.get(key)
        .and_then(Value::as_array)
        .map(|a| a.iter().map(|x| x.as_f64().unwrap_or(0.0)).collect())
        .unwrap_or_default()
}
