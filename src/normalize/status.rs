// /printer/objects/query -> PrinterStatus

use serde_json::Value;

use super::{f64_at, round1, round2, str_at};
use crate::models::{HeaterState, PrinterStatus};

pub fn printer_status(query: &Value) -> PrinterStatus {
    let status = query.get("status").unwrap_or(query);
    let print_stats = status.get("print_stats").unwrap_or(&Value::Null);
    let display = status.get("display_status").unwrap_or(&Value::Null);
    let sdcard = status.get("virtual_sdcard").unwrap_or(&Value::Null);

    // display_status.progress honours M73; fall back to file position.
    let progress = display
        .get("progress")
        .and_then(Value::as_f64)
        .unwrap_or_else(|| f64_at(sdcard, "progress"));

    PrinterStatus {
        state: match str_at(print_stats, "state") {
            s if s.is_empty() => "unknown".into(),
            s => s,
        },
        filename: str_at(print_stats, "filename"),
        progress: round2(progress.clamp(0.0, 1.0)),
        print_duration: round1(f64_at(print_stats, "print_duration")),
        message: str_at(display, "message"),
        extruder: heater(status.get("extruder")),
        bed: heater(status.get("heater_bed")),
    }
}

fn heater(raw: Option<&Value>) -> HeaterState {
    let raw = raw.unwrap_or(&Value::Null);
    HeaterState {
        temperature: round1(f64_at(raw, "temperature")),
        target: round1(f64_at(raw, "target")),
        power: round2(f64_at(raw, "power")),
    }
}
