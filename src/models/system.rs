// Host and Moonraker process stats

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonrakerProcess {
    pub cpu_usage: f64,
    pub memory_kb: u64,
    /// Seconds; see normalize::system for the short-buffer fallback.
    pub uptime: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuUsage {
    pub total: f64,
    /// Index N holds the usage of core N.
    pub cores: Vec<f64>,
}

/// Host memory in kB, as reported by Moonraker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub bandwidth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottledState {
    pub bits: u64,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub moonraker: MoonrakerProcess,
    pub cpu: CpuUsage,
    pub memory: MemoryStats,
    pub cpu_temp: Option<f64>,
    pub system_uptime: f64,
    pub network: BTreeMap<String, NetworkInterface>,
    pub websocket_connections: u64,
    pub throttled: ThrottledState,
}

/// Static host identity from `/machine/system_info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub cpu_count: u32,
    pub cpu_desc: String,
    pub model: String,
    pub hardware_desc: String,
    pub total_memory_kb: u64,
    pub distribution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatsResponse {
    pub stats: SystemStats,
    pub info: SystemInfo,
}
