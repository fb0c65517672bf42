use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET / - service description
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let mount = state.mount_path.as_str();

    Json(json!({
        "name": "Roster API",
        "version": version,
        "description": "Teacher records owned by users",
        "endpoints": {
            "health": "GET /health",
            "show": format!("GET {}/:tid", mount),
            "by_user": format!("GET {}/user/:uid", mount),
            "create": format!("POST {}", mount),
            "update": format!("PATCH {}/:tid", mount),
            "delete": format!("DELETE {}/:tid", mount),
        }
    }))
}

/// GET /health - 503 when the store does not answer
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

/// Any route not matched above
pub async fn fallback() -> ApiError {
    ApiError::not_found("Could not find this route.")
}
