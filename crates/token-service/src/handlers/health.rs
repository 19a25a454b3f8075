//! Liveness probe.
//!
//! The service has no dependencies to check, so liveness is readiness.

/// Handler for GET /health
#[tracing::instrument(skip_all, name = "ti.health.check")]
pub async fn health_check() -> &'static str {
    "OK"
}
