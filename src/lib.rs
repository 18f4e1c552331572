// src/lib.rs
use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use handlers::{
    create_trip, delete_trip, get_trip, health_handler, hello_handler, list_trips,
    metrics_handler, root_handler, update_trip,
};

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod error;
mod handlers;
mod infrastructure;
mod middleware;

// Hoist up only the public symbol(s)
pub use app_state::AppState;
pub use config::*;
pub use error::ApiError;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_mongo_repository, // ---
    create_noop_metrics,
    create_prom_metrics,
};

/// Build the HTTP router over the supplied state.
///
/// The caller decides what goes into [`AppState`]; production wires MongoDB
/// and Prometheus, tests wire an in-memory store and a fresh registry. All
/// routes sit behind the metrics middleware, so every response lands in the
/// histogram and counter, handler errors included.
///
/// `allowed_origins` feeds the CORS layer; an origin that is not a valid
/// header value is a configuration error and fails router construction.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    // ---
    let cors = cors_layer(allowed_origins)?;

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/hello", get(hello_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/trip", get(list_trips).post(create_trip))
        .route(
            "/trip/{id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::track_metrics,
        ))
        .layer(cors)
        .with_state(state);

    Ok(router)
}

/// CORS for the browser frontend: explicit origin list, credentials
/// allowed, the four verbs the API serves, JSON bodies.
fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    // ---
    let origins = allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}
