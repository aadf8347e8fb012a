// GET /version

use axum::response::IntoResponse;

use crate::version::{NAME, VERSION};

/// Service name and version from Cargo.toml at build time.
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
