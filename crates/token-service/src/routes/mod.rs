//! HTTP routes for the token service.

use crate::handlers::{self, AppState};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use crate::observability::metrics::init_metrics_recorder;

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/token` - Token issuance (browser-callable, CORS enabled)
/// - `/health` - Liveness probe (simple "OK")
/// - `/metrics` - Prometheus metrics endpoint
/// - TraceLayer for request logging
/// - 30 second request timeout
///
/// `cors_allowed_origin` of `None` allows any origin.
pub fn build_routes(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    cors_allowed_origin: Option<HeaderValue>,
) -> Router {
    let allow_origin = match cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(allow_origin);

    let token_routes = Router::new()
        .route("/token", get(handlers::handle_token))
        .layer(cors)
        .with_state(state);

    // Operational endpoints, unversioned
    let health_routes = Router::new().route("/health", get(handlers::health_check));

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    token_routes
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
