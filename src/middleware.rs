//! Request-level middleware. Currently just HTTP metrics capture.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppState;

/// Records one observation per request into the duration histogram and the
/// request counter, labeled by method, route and status code.
///
/// The route label uses the matched route template (`/trip/{id}`) so that
/// every trip id does not mint its own label set; requests that match no
/// route fall back to the raw path. Timing starts before the inner service
/// runs and the observation lands after it finishes, so handler time is
/// fully covered.
pub async fn track_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().as_str().to_owned();

    let response = next.run(request).await;

    state
        .metrics()
        .record_http_request(start, &route, &method, response.status().as_u16());

    response
}
