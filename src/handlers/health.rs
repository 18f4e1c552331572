//! Health check handler for monitoring and readiness probes.

use axum::{http::StatusCode, response::Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Response payload for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Fixed "OK" marker; the process answering at all is the signal.
    pub status: String,

    /// Server time at the moment of the probe, RFC 3339 with milliseconds.
    pub timestamp: String,
}

/// Handler for GET /health.
///
/// Reports liveness only. The store is deliberately not probed here; a trip
/// request will surface store trouble on its own, while monitors polling
/// this route stay cheap.
#[tracing::instrument]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    // ---
    let response = HealthResponse {
        status: "OK".to_owned(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    (StatusCode::OK, Json(response))
}

// ---
