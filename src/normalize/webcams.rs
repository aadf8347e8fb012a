// /server/webcams/list -> Vec<WebcamConfig>

use serde_json::Value;

use super::{bool_at, str_at, u64_at};
use crate::models::WebcamConfig;

/// Entries that are not objects are skipped; missing fields take zero values.
pub fn webcam_list(raw: &Value) -> Vec<WebcamConfig> {
    let list = raw
        .get("webcams")
        .and_then(Value::as_array)
        .or_else(|| raw.as_array());
    let Some(list) = list else {
        return Vec::new();
    };
    list.iter()
        .filter(|w| w.is_object())
        .map(|w| WebcamConfig {
            uid: str_at(w, "uid"),
            // Moonraker omits `enabled` for config-file cams; those are live.
            enabled: w.get("enabled").map_or(true, |_| bool_at(w, "enabled")),
            name: str_at(w, "name"),
            location: str_at(w, "location"),
            service: str_at(w, "service"),
            target_fps: as_u32(u64_at(w, "target_fps")),
            target_fps_idle: as_u32(u64_at(w, "target_fps_idle")),
            aspect_ratio: str_at(w, "aspect_ratio"),
            stream_url: str_at(w, "stream_url"),
            snapshot_url: str_at(w, "snapshot_url"),
            flip_horizontal: bool_at(w, "flip_horizontal"),
            flip_vertical: bool_at(w, "flip_vertical"),
            rotation: as_u32(u64_at(w, "rotation")),
        })
        .collect()
}

fn as_u32(v: u64) -> u32 {
    v.min(u32::MAX as u64) as u32
}
