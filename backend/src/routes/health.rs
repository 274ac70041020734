//! Health endpoints
//!
//! - `/health` answers as long as the process serves requests
//! - `/health/live` answers while the process is alive
//! - `/health/ready` also pings the staff store and answers 503 when it is down

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Alive,
    Ready,
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    Healthy,
    Unhealthy,
}

/// Body of every health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<ReadinessChecks>,
}

#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub store: StoreCheck,
}

#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub status: CheckOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn plain(status: HealthStatus) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain(HealthStatus::Healthy))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain(HealthStatus::Alive))
}

pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = match state.people.ping().await {
        Ok(()) => StoreCheck {
            status: CheckOutcome::Healthy,
            message: None,
        },
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            StoreCheck {
                status: CheckOutcome::Unhealthy,
                message: Some("staff store unavailable".to_string()),
            }
        }
    };

    let ready = store.status == CheckOutcome::Healthy;
    let (code, status) = if ready {
        (StatusCode::OK, HealthStatus::Ready)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::NotReady)
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: Some(ReadinessChecks { store }),
    };
    (code, Json(body))
}
