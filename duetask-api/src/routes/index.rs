/// Landing page and health check
///
/// # Endpoints
///
/// - `GET /` - Landing page (public)
/// - `GET /health` - Health check (public)

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Landing page response
#[derive(Debug, Serialize)]
pub struct LandingResponse {
    /// Service name
    pub service: &'static str,

    /// Application version
    pub version: &'static str,

    /// Where to log in
    pub login: &'static str,

    /// Where to create an account
    pub register: &'static str,
}

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

/// Landing page handler
///
/// Identifies the service for anonymous visitors; clients follow up with
/// `/register` or `/login`.
pub async fn landing() -> Json<LandingResponse> {
    Json(LandingResponse {
        service: "duetask",
        version: env!("CARGO_PKG_VERSION"),
        login: "/login",
        register: "/register",
    })
}

/// Health check handler
///
/// Returns service health status including database connectivity.
///
/// # Example
///
/// ```text
/// GET /health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match duetask_shared::db::pool::health_check(&state.db).await {
        Ok(()) => "connected",
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
