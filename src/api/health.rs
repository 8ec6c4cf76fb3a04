use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Database is unreachable")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, label) = match state.db().ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!("Health check database ping failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
    };

    (
        status,
        Json(json!({
            "status": label,
            "service": "member-search",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
