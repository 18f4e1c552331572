use axum::{http::StatusCode, response::IntoResponse};

/// Handler for GET /.
///
/// Replies with a nonstandard 234 status, kept from the service this one
/// replaces; external probes key on that exact code to tell the trip API
/// apart from a stock reverse-proxy answer.
pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    // 234 sits inside the valid 100..=599 range, so the conversion holds.
    let status = StatusCode::from_u16(234).expect("234 is a valid status code");

    (
        status,
        format!(
            r#"Welcome to the Trip Journal API 👋
Version: {version}

Available endpoints:
  - GET    /trip        - List all trips, newest first
  - GET    /trip/{{id}}   - Fetch a trip by id
  - POST   /trip        - Create a trip entry
  - PUT    /trip/{{id}}   - Update a trip entry by id
  - DELETE /trip/{{id}}   - Delete a trip entry by id
  - GET    /health      - Liveness check
  - GET    /metrics     - Prometheus metrics
"#
        ),
    )
}

/// Handler for GET /hello. Fixed greeting used as a smoke probe.
pub async fn hello_handler() -> impl IntoResponse {
    "Hello World!"
}
