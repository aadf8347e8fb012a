// HTTP routes

mod camera;
mod http;
mod printer;
mod settings;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::cache::{Clock, TtlCache};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::{SystemStatsResponse, TemperatureHistory};
use crate::moonraker::MoonrakerClient;
use crate::settings_repo::SettingsRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    /// None when no printer host is configured.
    pub(crate) printer: Option<Arc<MoonrakerClient>>,
    pub(crate) settings_repo: Arc<SettingsRepo>,
    pub(crate) system_stats_cache: Arc<TtlCache<SystemStatsResponse>>,
    pub(crate) temperature_cache: Arc<TtlCache<TemperatureHistory>>,
    pub(crate) config: AppConfig,
}

impl AppState {
    pub(crate) fn printer(&self) -> AppResult<&MoonrakerClient> {
        self.printer.as_deref().ok_or(AppError::ConfigurationMissing)
    }

    pub(crate) fn camera_base_url(&self) -> AppResult<String> {
        self.config
            .camera_base_url()
            .ok_or(AppError::ConfigurationMissing)
    }
}

pub fn app(
    printer: Option<Arc<MoonrakerClient>>,
    settings_repo: Arc<SettingsRepo>,
    clock: Arc<dyn Clock>,
    config: AppConfig,
) -> Router {
    let state = AppState {
        printer,
        settings_repo,
        system_stats_cache: Arc::new(TtlCache::new(clock.clone())),
        temperature_cache: Arc::new(TtlCache::new(clock)),
        config,
    };
    Router::new()
        .route("/", get(|| async { "printdash is running" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/printer/status", get(printer::status)) // GET /printer/status
        .route("/printer/system-stats", get(printer::system_stats)) // GET /printer/system-stats
        .route(
            "/printer/temperature-history",
            get(printer::temperature_history),
        ) // GET /printer/temperature-history
        .route("/camera/list", get(camera::list)) // GET /camera/list
        .route("/camera/info", get(camera::info)) // GET /camera/info?uid=
        .route("/camera/snapshot", get(camera::snapshot)) // GET /camera/snapshot?uid=
        .route("/camera/resolution", get(camera::resolution)) // GET /camera/resolution?uid=
        .route(
            "/settings/camera",
            get(settings::get_camera).put(settings::put_camera),
        ) // GET/PUT /settings/camera
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
