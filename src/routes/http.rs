// GET handlers: version, api/hosts

use axum::{Json, extract::State, response::IntoResponse};
use tracing::error;

use super::AppState;
use super::error::ApiError;
use crate::aggregator::TopologyProvider;
use crate::version::{NAME, VERSION};

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/hosts — hosts charted for scope=ALL, in legend order.
pub(super) async fn hosts_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let hosts = state.aggregator.topology().list_hosts().map_err(|e| {
        error!(error = %e, "failed to list cluster hosts");
        ApiError::Topology(e.to_string())
    })?;
    Ok(Json(serde_json::json!({ "hosts": hosts })))
}
