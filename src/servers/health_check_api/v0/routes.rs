//! Health Check API routes.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::HeaderName;
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::propagate_header::PropagateHeaderLayer;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{instrument, Level, Span};

use super::handlers::{health_handler, liveness_handler, readiness_handler};
use crate::core::health::checker::HealthChecker;
use crate::servers::health_check_api::HEALTH_CHECK_API_LOG_TARGET;

/// It builds the router with the endpoints mounted under `base_path`.
#[instrument(skip(checker))]
pub fn router(checker: Arc<HealthChecker>, base_path: &str, addr: SocketAddr) -> Router {
    let endpoints = Router::new()
        .route("/", get(health_handler))
        .route("/ready", get(readiness_handler))
        .route("/live", get(liveness_handler))
        .with_state(checker);

    let base_path = base_path.trim_end_matches('/');

    // `nest` does not accept the root path
    let router = if base_path.is_empty() {
        endpoints
    } else {
        Router::new().nest(base_path, endpoints)
    };

    router
        .layer(CompressionLayer::new())
        .layer(PropagateHeaderLayer::new(HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(move |request: &Request, _span: &Span| {
                    let method = request.method().to_string();
                    let uri = request.uri().to_string();
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();

                    tracing::span!(
                        target: HEALTH_CHECK_API_LOG_TARGET,
                        tracing::Level::INFO, "request", socket_addr = %addr, method = %method, uri = %uri, request_id = %request_id);
                })
                .on_response(move |response: &axum::response::Response, latency: Duration, _span: &Span| {
                    let status_code = response.status();
                    let request_id = response
                        .headers()
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();
                    let latency_ms = latency.as_millis();

                    tracing::span!(
                        target: HEALTH_CHECK_API_LOG_TARGET,
                        tracing::Level::INFO, "response", socket_addr = %addr, latency = %latency_ms, status = %status_code, request_id = %request_id);
                }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
