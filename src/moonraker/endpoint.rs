// Moonraker endpoints used by the dashboard.

/// Printer objects requested for the status view. Empty attribute lists mean "all fields".
pub const STATUS_OBJECTS: &[&str] = &[
    "print_stats",
    "extruder",
    "heater_bed",
    "display_status",
    "virtual_sdcard",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/printer/objects/query` for the given objects.
    ObjectsQuery(&'static [&'static str]),
    /// `/machine/proc_stats`: Moonraker process stats plus host CPU/memory/network.
    ProcStats,
    /// `/machine/system_info`: static host identity.
    SystemInfo,
    /// `/server/temperature_store`: rolling per-heater buffers.
    TemperatureStore,
    /// `/server/webcams/list`.
    WebcamList,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::ObjectsQuery(_) => "objects_query",
            Endpoint::ProcStats => "proc_stats",
            Endpoint::SystemInfo => "system_info",
            Endpoint::TemperatureStore => "temperature_store",
            Endpoint::WebcamList => "webcams_list",
        }
    }

    /// Path plus query string, relative to the Moonraker base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::ObjectsQuery(objects) => {
                format!("/printer/objects/query?{}", objects.join("&"))
            }
            Endpoint::ProcStats => "/machine/proc_stats".into(),
            Endpoint::SystemInfo => "/machine/system_info".into(),
            Endpoint::TemperatureStore => "/server/temperature_store".into(),
            Endpoint::WebcamList => "/server/webcams/list".into(),
        }
    }
}
