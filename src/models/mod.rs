// Dashboard output schema (camelCase JSON) and upstream webcam config

mod camera;
mod status;
mod system;
mod temperature;

pub use camera::{CameraInfo, CameraResolution, Resolution, WebcamConfig};
pub use status::{HeaterState, PrinterStatus};
pub use system::{
    CpuUsage, MemoryStats, MoonrakerProcess, NetworkInterface, SystemInfo, SystemStats,
    SystemStatsResponse, ThrottledState,
};
pub use temperature::{TemperatureChannel, TemperatureHistory};
