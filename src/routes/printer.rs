// Printer telemetry: status, system stats (cached), temperature history (cached)

use axum::{Json, extract::State};
use std::time::Duration;

use super::AppState;
use crate::cache::CacheKey;
use crate::error::{AppError, AppResult};
use crate::models::{PrinterStatus, SystemStatsResponse, TemperatureHistory};
use crate::moonraker::{Endpoint, STATUS_OBJECTS, UpstreamError};
use crate::normalize;

/// GET /printer/status
pub(super) async fn status(State(state): State<AppState>) -> AppResult<Json<PrinterStatus>> {
    let client = state.printer()?;
    let raw = client
        .fetch_endpoint(Endpoint::ObjectsQuery(STATUS_OBJECTS))
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "printer status fetch failed"))?;
    Ok(Json(normalize::printer_status(&raw)))
}

/// GET /printer/system-stats. Process stats and host info are fetched concurrently.
/// Any upstream failure is a 503.
pub(super) async fn system_stats(
    State(state): State<AppState>,
) -> AppResult<Json<SystemStatsResponse>> {
    let client = state.printer()?;
    let ttl = Duration::from_millis(state.config.cache.system_stats_ttl_ms);
    let response = state
        .system_stats_cache
        .get_or_fetch(CacheKey::SystemStats, ttl, || async move {
            let (proc_stats, info) = tokio::try_join!(
                client.fetch_endpoint(Endpoint::ProcStats),
                client.fetch_endpoint(Endpoint::SystemInfo),
            )?;
            Ok::<_, UpstreamError>(SystemStatsResponse {
                stats: normalize::system_stats(&proc_stats),
                info: normalize::system_info(&info),
            })
        })
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "system stats fetch failed");
            AppError::UpstreamUnreachable("Failed to fetch system stats".into())
        })?;
    Ok(Json(response))
}

/// GET /printer/temperature-history. Always 200: an unreachable or unconfigured printer
/// yields empty arrays so charts never see an error shape.
pub(super) async fn temperature_history(State(state): State<AppState>) -> Json<TemperatureHistory> {
    let Ok(client) = state.printer() else {
        return Json(TemperatureHistory::default());
    };
    let ttl = Duration::from_millis(state.config.cache.temperature_ttl_ms);
    let result = state
        .temperature_cache
        .get_or_fetch(CacheKey::TemperatureHistory, ttl, || async move {
            let raw = client.fetch_endpoint(Endpoint::TemperatureStore).await?;
            Ok::<_, UpstreamError>(normalize::temperature_history(&raw, chrono::Local::now()))
        })
        .await;
    match result {
        Ok(history) => Json(history),
        Err(e) => {
            tracing::warn!(error = %e, "temperature history fetch failed, serving empty");
            Json(TemperatureHistory::default())
        }
    }
}
