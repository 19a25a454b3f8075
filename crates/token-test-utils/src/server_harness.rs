//! Test server harness for E2E testing
//!
//! Provides TestTokenServer for spawning real token server instances in tests.

use crate::crypto_fixtures::test_secret_box;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use token_service::handlers::AppState;
use token_service::routes;
use token_service::services::token_service::TokenIssuer;

/// Seed of the secret used by [`TestTokenServer::spawn`].
pub const DEFAULT_SECRET_SEED: u8 = 1;

/// Test harness for spawning the token server in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_issue_e2e() -> Result<(), anyhow::Error> {
///     let server = TestTokenServer::spawn().await?;
///
///     let response = server.request_token(Some("alice")).await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestTokenServer {
    addr: SocketAddr,
    issuer: TokenIssuer,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestTokenServer {
    /// Spawn a server signing with `test_secret(DEFAULT_SECRET_SEED)`
    /// on the wall clock, allowing any CORS origin.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_issuer(TokenIssuer::new(&test_secret_box(DEFAULT_SECRET_SEED))).await
    }

    /// Spawn a server around a caller-built issuer.
    pub async fn spawn_with_issuer(issuer: TokenIssuer) -> Result<Self, anyhow::Error> {
        Self::spawn_with(issuer, None).await
    }

    /// Spawn a server around `issuer` with an optional fixed CORS origin.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn_with(
        issuer: TokenIssuer,
        cors_allowed_origin: Option<HeaderValue>,
    ) -> Result<Self, anyhow::Error> {
        let state = Arc::new(AppState {
            issuer: issuer.clone(),
        });

        // Initialize metrics recorder for test server
        // Note: This may fail if already installed in the test process.
        // In that case, we create a new recorder without installing it globally.
        let metrics_handle = match routes::init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        let app = routes::build_routes(state, metrics_handle, cors_allowed_origin);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, make_service).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            issuer,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The issuer the server was built with, for verifying returned tokens.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Shared HTTP client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// `GET /token`, percent-encoding `user_id` when present.
    pub async fn request_token(
        &self,
        user_id: Option<&str>,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let base = format!("{}/token", self.url());
        let url = match user_id {
            Some(id) => reqwest::Url::parse_with_params(&base, &[("user_id", id)])?,
            None => reqwest::Url::parse(&base)?,
        };

        Ok(self.client.get(url).send().await?)
    }
}

impl Drop for TestTokenServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
