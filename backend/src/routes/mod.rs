//! Route definitions for the hotel API
//!
//! `/person` carries staff accounts (signup, login and the protected staff
//! endpoints), `/menu` the restaurant menu and `/health` the health checks.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod extract;
mod health;
mod menu;
mod person;


pub use menu::menu_routes;
pub use person::person_routes;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Largest accepted JSON body
const MAX_BODY_BYTES: usize = 64 * 1024;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/live", get(health::liveness_check));

    Router::new()
        .route("/", get(|| async { "Hotel Management API" }))
        .nest("/health", health_routes)
        .nest("/person", person_routes(state.clone()))
        .nest("/menu", menu_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
