// Webcam endpoints: list, info, snapshot passthrough, resolution

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use std::time::Duration;

use super::AppState;
use crate::camera::{absolute_url, resolve_camera};
use crate::error::{AppError, AppResult};
use crate::models::{CameraInfo, CameraResolution, WebcamConfig};
use crate::moonraker::{Endpoint, MoonrakerClient, UpstreamError};
use crate::normalize::{
    self,
    resolution::{info_resolution, stream_resolution},
};

/// Aspect ratio rarely changes; let browsers keep it for an hour.
const RESOLUTION_CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Debug, Deserialize)]
pub(super) struct CameraQuery {
    uid: Option<String>,
}

impl CameraQuery {
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

async fn webcams(client: &MoonrakerClient) -> AppResult<Vec<WebcamConfig>> {
    let raw = client
        .fetch_endpoint(Endpoint::WebcamList)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "webcam list fetch failed"))?;
    Ok(normalize::webcam_list(&raw))
}

/// Persisted selection; a database failure only loses the preference.
async fn selected_uid(state: &AppState) -> Option<String> {
    match state.settings_repo.get_selected_camera_uid().await {
        Ok(uid) => uid,
        Err(e) => {
            tracing::warn!(error = %e, "could not read selected camera, using default");
            None
        }
    }
}

async fn pick_camera(state: &AppState, query: &CameraQuery) -> AppResult<WebcamConfig> {
    let client = state.printer()?;
    let cams = webcams(client).await?;
    let selected = selected_uid(state).await;
    let cam = resolve_camera(&cams, query.uid(), selected.as_deref())?;
    Ok(cam.clone())
}

fn camera_info(cam: &WebcamConfig, base: &str) -> CameraInfo {
    CameraInfo {
        uid: cam.uid.clone(),
        name: cam.name.clone(),
        location: cam.location.clone(),
        service: cam.service.clone(),
        enabled: cam.enabled,
        target_fps: cam.target_fps,
        target_fps_idle: cam.target_fps_idle,
        aspect_ratio: cam.aspect_ratio.clone(),
        stream_url: absolute_url(base, &cam.stream_url),
        snapshot_url: absolute_url(base, &cam.snapshot_url),
        flip_horizontal: cam.flip_horizontal,
        flip_vertical: cam.flip_vertical,
        rotation: cam.rotation,
        resolution: info_resolution(&cam.aspect_ratio),
    }
}

/// GET /camera/list
pub(super) async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CameraInfo>>> {
    let client = state.printer()?;
    let base = state.camera_base_url()?;
    let cams = webcams(client).await?;
    Ok(Json(cams.iter().map(|c| camera_info(c, &base)).collect()))
}

/// GET /camera/info?uid=
pub(super) async fn info(
    State(state): State<AppState>,
    Query(query): Query<CameraQuery>,
) -> AppResult<Json<CameraInfo>> {
    let base = state.camera_base_url()?;
    let cam = pick_camera(&state, &query).await?;
    Ok(Json(camera_info(&cam, &base)))
}

/// GET /camera/snapshot?uid= — image bytes passed through under a hard timeout.
pub(super) async fn snapshot(
    State(state): State<AppState>,
    Query(query): Query<CameraQuery>,
) -> AppResult<impl IntoResponse> {
    let base = state.camera_base_url()?;
    let cam = pick_camera(&state, &query).await?;
    if cam.snapshot_url.trim().is_empty() {
        return Err(AppError::NotFound(format!(
            "Camera {} has no snapshot URL",
            cam.uid
        )));
    }
    let url = absolute_url(&base, &cam.snapshot_url);
    let timeout = Duration::from_millis(state.config.camera.snapshot_timeout_ms);

    let fetched = state
        .printer()?
        .fetch_bytes(&url, timeout)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, url = %url, "snapshot fetch failed");
            match e {
                UpstreamError::Timeout(_) => {
                    AppError::UpstreamTimeout("Snapshot request timed out".into())
                }
                UpstreamError::Unreachable(_) => {
                    AppError::UpstreamUnreachable("Camera is unreachable".into())
                }
                other => AppError::from(other),
            }
        })?;

    let content_type = fetched
        .content_type
        .unwrap_or_else(|| "image/jpeg".to_string());
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        fetched.body,
    ))
}

/// GET /camera/resolution?uid=
pub(super) async fn resolution(
    State(state): State<AppState>,
    Query(query): Query<CameraQuery>,
) -> AppResult<impl IntoResponse> {
    let cam = pick_camera(&state, &query).await?;
    let r = stream_resolution(&cam.aspect_ratio);
    Ok((
        [(header::CACHE_CONTROL, RESOLUTION_CACHE_CONTROL)],
        Json(CameraResolution {
            width: r.width,
            height: r.height,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }),
    ))
}
