// Webcam config (Moonraker wire format) and camera endpoint payloads

use serde::{Deserialize, Serialize};

/// Entry of `/server/webcams/list`. Snake case on the wire; every field tolerates absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebcamConfig {
    pub uid: String,
    pub enabled: bool,
    pub name: String,
    pub location: String,
    pub service: String,
    pub target_fps: u32,
    pub target_fps_idle: u32,
    pub aspect_ratio: String,
    pub stream_url: String,
    /// Absolute or root-relative.
    pub snapshot_url: String,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub rotation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    pub uid: String,
    pub name: String,
    pub location: String,
    pub service: String,
    pub enabled: bool,
    pub target_fps: u32,
    pub target_fps_idle: u32,
    pub aspect_ratio: String,
    pub stream_url: String,
    pub snapshot_url: String,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub rotation: u32,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraResolution {
    pub width: u32,
    pub height: u32,
    /// Epoch millis at response time.
    pub timestamp: i64,
}
