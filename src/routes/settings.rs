// Selected-camera preference

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{AppError, AppResult};

const MAX_UID_LEN: usize = 64;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CameraSelection {
    selected_camera_uid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SelectCameraRequest {
    uid: Option<String>,
}

fn validate_uid(uid: &str) -> AppResult<()> {
    if uid.is_empty() || uid.len() > MAX_UID_LEN {
        return Err(AppError::Validation(format!(
            "uid must be 1-{} characters",
            MAX_UID_LEN
        )));
    }
    if !uid
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::Validation(
            "uid may only contain letters, digits, '-' and '_'".into(),
        ));
    }
    Ok(())
}

/// GET /settings/camera
pub(super) async fn get_camera(State(state): State<AppState>) -> AppResult<Json<CameraSelection>> {
    let selected_camera_uid = state.settings_repo.get_selected_camera_uid().await?;
    Ok(Json(CameraSelection {
        selected_camera_uid,
    }))
}

/// PUT /settings/camera {"uid": "..."|null}
pub(super) async fn put_camera(
    State(state): State<AppState>,
    Json(body): Json<SelectCameraRequest>,
) -> AppResult<Json<CameraSelection>> {
    if let Some(uid) = body.uid.as_deref() {
        validate_uid(uid)?;
    }
    state
        .settings_repo
        .set_selected_camera_uid(body.uid.as_deref())
        .await?;
    tracing::info!(uid = ?body.uid, "selected camera updated");
    Ok(Json(CameraSelection {
        selected_camera_uid: body.uid,
    }))
}
