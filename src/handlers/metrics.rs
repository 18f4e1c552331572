use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::AppState;

/// Handler for the `/metrics` endpoint.
///
/// Returns metrics in Prometheus text exposition format for scraping.
/// Uses the metrics implementation from AppState, which could be either
/// Prometheus or no-op depending on how the router was assembled.
pub async fn metrics_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    // ---

    let metrics_text = state.metrics().render();

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        metrics_text,
    ))
}
