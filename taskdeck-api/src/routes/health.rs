/// Liveness and health check endpoints
///
/// # Endpoints
///
/// - `GET /` - liveness message
/// - `GET /api/health` - health status including database connectivity
use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Root liveness handler
///
/// Always answers 200 while the process is up; no dependencies probed.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Taskdeck API is running" }))
}

/// Health check handler
///
/// Probes the database with `SELECT 1`; reports "degraded" when the probe
/// fails rather than erroring, so monitoring can still read the body.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Ok(Json(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
    }))
}
