//! System endpoints: service banner, health probe, database check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Service banner response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BannerResponse {
    /// Human-readable service banner.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"` when the process is serving.
    pub status: String,
    /// RFC 3339 timestamp of the probe.
    pub timestamp: String,
    /// Crate version of the running binary.
    pub version: String,
}

/// Database connectivity check response.
///
/// Always served with HTTP 200; the body carries the outcome. The
/// container health probe is `/health`, this endpoint is a diagnostic.
#[derive(Debug, Serialize, ToSchema)]
pub struct DbCheckResponse {
    /// `"connected"` or `"error"`.
    pub db_status: String,
    /// The `SELECT 1` result when connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<i32>,
    /// Failure detail when not connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// `GET /` — Service banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Service banner",
    responses(
        (status = 200, description = "Service is up", body = BannerResponse),
    )
)]
pub async fn banner_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(BannerResponse {
            message: "Football analytics API is live!".to_string(),
        }),
    )
}

/// `GET /health` — Container liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp. \
                   Probed by the container runtime every 30s.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /db-check` — Database connectivity diagnostic.
#[utoipa::path(
    get,
    path = "/db-check",
    tag = "System",
    summary = "Database connectivity check",
    description = "Runs `SELECT 1` against PostgreSQL and reports the outcome in the body.",
    responses(
        (status = 200, description = "Check executed; see `db_status`", body = DbCheckResponse),
    )
)]
pub async fn db_check_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = match state.store.ping().await {
        Ok(result) => DbCheckResponse {
            db_status: "connected".to_string(),
            result: Some(result),
            detail: None,
        },
        Err(e) => DbCheckResponse {
            db_status: "error".to_string(),
            result: None,
            detail: Some(e.to_string()),
        },
    };
    (StatusCode::OK, Json(body))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner_handler))
        .route("/health", get(health_handler))
        .route("/db-check", get(db_check_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_is_always_200() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn banner_is_always_200() {
        let response = banner_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
