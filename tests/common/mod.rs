// Shared test helpers: fake Moonraker upstream and app wiring

#![allow(dead_code)]

use axum::{Json, Router, routing::get};
use axum_test::TestServer;
use printdash::cache::ManualClock;
use printdash::config::AppConfig;
use printdash::moonraker::MoonrakerClient;
use printdash::routes;
use printdash::settings_repo::SettingsRepo;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const SNAPSHOT_TIMEOUT_MS: u64 = 300;

/// Serve `router` on an ephemeral localhost port.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn config_for(upstream: Option<SocketAddr>, db_path: &str) -> AppConfig {
    let printer = match upstream {
        Some(addr) => format!(
            r#"
[printer]
host = "127.0.0.1"
port = {port}
request_timeout_ms = 2000

[camera]
host = "127.0.0.1"
port = {port}
snapshot_timeout_ms = {SNAPSHOT_TIMEOUT_MS}
"#,
            port = addr.port()
        ),
        None => String::new(),
    };
    let toml = format!(
        r#"
[server]
port = 8080
host = "127.0.0.1"
{printer}
[database]
path = "{db_path}"
"#
    );
    AppConfig::load_from_str(&toml).unwrap()
}

pub struct TestApp {
    pub server: TestServer,
    pub clock: Arc<ManualClock>,
    _dir: TempDir,
}

pub async fn test_app(upstream: Option<SocketAddr>) -> TestApp {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("settings.db");
    let config = config_for(upstream, db_path.to_str().unwrap());

    let settings_repo = Arc::new(SettingsRepo::connect(&config.database.path).await.unwrap());
    settings_repo.init().await.unwrap();
    let printer = config.printer.base_url().map(|url| {
        Arc::new(
            MoonrakerClient::new(url, Duration::from_millis(config.printer.request_timeout_ms))
                .unwrap(),
        )
    });
    let clock = Arc::new(ManualClock::new(1_000_000));
    let app = routes::app(printer, settings_repo, clock.clone(), config);
    TestApp {
        server: TestServer::new(app),
        clock,
        _dir: dir,
    }
}

/// Moonraker wraps every payload in `{"result": ...}`.
pub fn moonraker_json(result: Value) -> Json<Value> {
    Json(json!({ "result": result }))
}

pub fn proc_stats_fixture() -> Value {
    json!({
        "moonraker_stats": [
            {"time": 1000.0, "cpu_usage": 1.5, "memory": 20000, "mem_units": "kB"},
            {"time": 1030.0, "cpu_usage": 2.0, "memory": 21000, "mem_units": "kB"}
        ],
        "throttled_state": {"bits": 0, "flags": []},
        "cpu_temp": 48.2,
        "network": {"eth0": {"rx_bytes": 10, "tx_bytes": 20, "bandwidth": 0.0}},
        "system_cpu_usage": {"cpu": 20.0, "cpu0": 10.0, "cpu1": 30.0},
        "system_memory": {"total": 1000, "available": 600, "used": 400},
        "system_uptime": 7200.0,
        "websocket_connections": 2
    })
}

pub fn system_info_fixture() -> Value {
    json!({"system_info": {
        "cpu_info": {"cpu_count": 4, "cpu_desc": "ARMv8", "model": "Pi 4",
                     "hardware_desc": "BCM2711", "total_memory": 4000000},
        "distribution": {"name": "Debian 12"}
    }})
}

pub fn webcams_fixture() -> Value {
    json!({"webcams": [
        {"uid": "cam-a", "name": "Nozzle", "enabled": true, "location": "printer",
         "service": "mjpegstreamer", "target_fps": 15, "target_fps_idle": 5,
         "aspect_ratio": "16:9", "stream_url": "/webcam/?action=stream",
         "snapshot_url": "/webcam/snapshot", "flip_horizontal": false,
         "flip_vertical": false, "rotation": 0},
        {"uid": "cam-b", "name": "Room", "enabled": true, "location": "room",
         "service": "webrtc", "target_fps": 30, "target_fps_idle": 5,
         "aspect_ratio": "4:3", "stream_url": "https://cams.local/room/stream",
         "snapshot_url": "/webcam/slow-snapshot", "flip_horizontal": true,
         "flip_vertical": false, "rotation": 180}
    ]})
}

pub fn fake_moonraker() -> Router {
    Router::new()
        .route(
            "/machine/proc_stats",
            get(|| async { moonraker_json(proc_stats_fixture()) }),
        )
        .route(
            "/machine/system_info",
            get(|| async { moonraker_json(system_info_fixture()) }),
        )
        .route(
            "/server/webcams/list",
            get(|| async { moonraker_json(webcams_fixture()) }),
        )
}
