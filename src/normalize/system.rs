// /machine/proc_stats + /machine/system_info -> SystemStats / SystemInfo

use serde_json::Value;
use std::collections::BTreeMap;

use super::{f64_at, round1, round2, str_at, u64_at};
use crate::models::{
    CpuUsage, MemoryStats, MoonrakerProcess, NetworkInterface, SystemInfo, SystemStats,
    ThrottledState,
};

/// Below this span the rolling `moonraker_stats` buffer says nothing about real uptime
/// (it only holds the last few minutes), so host uptime is reported instead.
const MIN_BUFFER_SPAN_SECS: f64 = 60.0;

pub fn system_stats(proc_stats: &Value) -> SystemStats {
    let samples: &[Value] = proc_stats
        .get("moonraker_stats")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let latest = samples.last().cloned().unwrap_or(Value::Null);
    let system_uptime = f64_at(proc_stats, "system_uptime");

    let cpu_usage = proc_stats.get("system_cpu_usage").unwrap_or(&Value::Null);
    let memory = proc_stats.get("system_memory").unwrap_or(&Value::Null);
    let throttled = proc_stats.get("throttled_state").unwrap_or(&Value::Null);

    SystemStats {
        moonraker: MoonrakerProcess {
            cpu_usage: round2(f64_at(&latest, "cpu_usage")),
            memory_kb: u64_at(&latest, "memory"),
            uptime: moonraker_uptime(samples, system_uptime),
        },
        cpu: CpuUsage {
            total: round2(f64_at(cpu_usage, "cpu")),
            cores: per_core_usage(cpu_usage),
        },
        memory: MemoryStats {
            total: u64_at(memory, "total"),
            used: u64_at(memory, "used"),
            available: u64_at(memory, "available"),
        },
        cpu_temp: proc_stats
            .get("cpu_temp")
            .and_then(Value::as_f64)
            .map(round1),
        system_uptime,
        network: network(proc_stats.get("network")),
        websocket_connections: u64_at(proc_stats, "websocket_connections"),
        throttled: ThrottledState {
            bits: u64_at(throttled, "bits"),
            flags: throttled
                .get("flags")
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(|f| f.as_str().map(str::to_string)).collect())
                .unwrap_or_default(),
        },
    }
}

/// Span between oldest and newest sample `time`, or `system_uptime` when that span is
/// under a minute.
pub fn moonraker_uptime(samples: &[Value], system_uptime: f64) -> f64 {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return system_uptime;
    };
    let span = f64_at(last, "time") - f64_at(first, "time");
    if span < MIN_BUFFER_SPAN_SECS {
        system_uptime
    } else {
        span
    }
}

/// `cpuN` keys placed at index N; the aggregate `cpu` key and anything else is ignored.
/// Gaps in the core numbering stay 0.0. An index can never reach the key count, so
/// anything at or past it is dropped.
pub fn per_core_usage(cpu_usage: &Value) -> Vec<f64> {
    let Some(map) = cpu_usage.as_object() else {
        return Vec::new();
    };
    let mut cores: Vec<f64> = Vec::new();
    for (key, value) in map {
        let Some(index) = key
            .strip_prefix("cpu")
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|i| *i < map.len())
        else {
            continue;
        };
        if index >= cores.len() {
            cores.resize(index + 1, 0.0);
        }
        cores[index] = round2(value.as_f64().unwrap_or(0.0));
    }
    cores
}

fn network(raw: Option<&Value>) -> BTreeMap<String, NetworkInterface> {
    let Some(map) = raw.and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    map.iter()
        .map(|(name, iface)| {
            (
                name.clone(),
                NetworkInterface {
                    rx_bytes: u64_at(iface, "rx_bytes"),
                    tx_bytes: u64_at(iface, "tx_bytes"),
                    bandwidth: round2(f64_at(iface, "bandwidth")),
                },
            )
        })
        .collect()
}

pub fn system_info(raw: &Value) -> SystemInfo {
    let info = raw.get("system_info").unwrap_or(raw);
    let cpu = info.get("cpu_info").unwrap_or(&Value::Null);
    let distribution = info.get("distribution").unwrap_or(&Value::Null);
    SystemInfo {
        cpu_count: u64_at(cpu, "cpu_count").min(u32::MAX as u64) as u32,
        cpu_desc: str_at(cpu, "cpu_desc"),
        model: str_at(cpu, "model"),
        hardware_desc: str_at(cpu, "hardware_desc"),
        total_memory_kb: u64_at(cpu, "total_memory"),
        distribution: str_at(distribution, "name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proc_stats_fixture() -> Value {
        json!({
            "moonraker_stats": [
                {"time": 1000.0, "cpu_usage": 1.0, "memory": 20000, "mem_units": "kB"},
                {"time": 1150.5, "cpu_usage": 2.456, "memory": 24732, "mem_units": "kB"}
            ],
            "throttled_state": {"bits": 327680, "flags": ["Previously Under-Volted"]},
            "cpu_temp": 45.67,
            "network": {"wlan0": {"rx_bytes": 100, "tx_bytes": 200, "bandwidth": 1234.567}},
            "system_cpu_usage": {"cpu": 12.346, "cpu0": 10.0, "cpu1": 14.691},
            "system_memory": {"total": 8000000, "available": 6000000, "used": 2000000},
            "system_uptime": 99999.5,
            "websocket_connections": 3
        })
    }

    #[test]
    fn maps_full_proc_stats() {
        let s = system_stats(&proc_stats_fixture());
        assert_eq!(s.moonraker.cpu_usage, 2.46);
        assert_eq!(s.moonraker.memory_kb, 24732);
        assert_eq!(s.moonraker.uptime, 150.5);
        assert_eq!(s.cpu.total, 12.35);
        assert_eq!(s.cpu.cores, vec![10.0, 14.69]);
        assert_eq!(s.memory.used, 2000000);
        assert_eq!(s.cpu_temp, Some(45.7));
        assert_eq!(s.system_uptime, 99999.5);
        assert_eq!(s.network["wlan0"].tx_bytes, 200);
        assert_eq!(s.network["wlan0"].bandwidth, 1234.57);
        assert_eq!(s.websocket_connections, 3);
        assert_eq!(s.throttled.bits, 327680);
        assert_eq!(s.throttled.flags, vec!["Previously Under-Volted".to_string()]);
    }

    #[test]
    fn short_buffer_falls_back_to_host_uptime() {
        let samples = vec![json!({"time": 1000.0}), json!({"time": 1059.9})];
        assert_eq!(moonraker_uptime(&samples, 5000.0), 5000.0);
        let samples = vec![json!({"time": 1000.0}), json!({"time": 1060.0})];
        assert_eq!(moonraker_uptime(&samples, 5000.0), 60.0);
        assert_eq!(moonraker_uptime(&[], 42.0), 42.0);
    }

    #[test]
    fn per_core_usage_uses_core_ordinal() {
        let raw = json!({"cpu": 50.0, "cpu2": 3.0, "cpu0": 1.0, "cpufreq": 9.0, "cpu1x": 7.0});
        assert_eq!(per_core_usage(&raw), vec![1.0, 0.0, 3.0]);
        assert!(per_core_usage(&json!({"cpu": 1.0})).is_empty());
        assert!(per_core_usage(&json!(null)).is_empty());
    }

    #[test]
    fn per_core_usage_ignores_out_of_range_ordinals() {
        let raw = json!({
            "cpu": 5.0,
            "cpu0": 1.0,
            "cpu18446744073709551615": 2.0,
            "cpu99999999999999999999999": 3.0,
            "cpu4000000000": 4.0,
        });
        assert_eq!(per_core_usage(&raw), vec![1.0]);

        let s = system_stats(&json!({
            "system_cpu_usage": {"cpu": 5.0, "cpu18446744073709551615": 2.0}
        }));
        assert!(s.cpu.cores.is_empty());
        assert_eq!(s.cpu.total, 5.0);
    }

    #[test]
    fn empty_proc_stats_keeps_schema() {
        let s = system_stats(&json!({}));
        assert_eq!(s, SystemStats::default());
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("cpuTemp").unwrap().is_null());
        assert!(v["cpu"]["cores"].as_array().unwrap().is_empty());
        assert_eq!(v["websocketConnections"], 0);
    }

    #[test]
    fn system_info_reads_nested_cpu_info() {
        let raw = json!({"system_info": {
            "cpu_info": {"cpu_count": 4, "cpu_desc": "ARMv7", "model": "Raspberry Pi 4",
                         "hardware_desc": "BCM2835", "total_memory": 3884512},
            "distribution": {"name": "Debian GNU/Linux 11 (bullseye)"}
        }});
        let info = system_info(&raw);
        assert_eq!(info.cpu_count, 4);
        assert_eq!(info.model, "Raspberry Pi 4");
        assert_eq!(info.total_memory_kb, 3884512);
        assert_eq!(info.distribution, "Debian GNU/Linux 11 (bullseye)");
    }
}
