//! Fault injection tests for signing failures
//!
//! The server is built around `FailingSigner`, so every issuance attempt
//! fails inside the signing step.

use reqwest::StatusCode;
use token_test_utils::{failing_issuer, TestTokenServer};

/// A signing failure is reported as 500 with a generic message.
#[tokio::test]
async fn test_signing_failure_returns_500() -> Result<(), anyhow::Error> {
    // Arrange
    let (issuer, signer) = failing_issuer();
    let server = TestTokenServer::spawn_with_issuer(issuer).await?;

    // Act
    let response = server.request_token(Some("alice")).await?;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await?;
    assert_eq!(body, "Failed to generate token");
    assert!(
        !body.contains("injected"),
        "Internal error detail must not reach the client"
    );
    assert_eq!(signer.attempts(), 1);

    Ok(())
}

/// Validation runs before signing, so a missing identifier stays a 400.
#[tokio::test]
async fn test_missing_user_id_does_not_reach_signer() -> Result<(), anyhow::Error> {
    let (issuer, signer) = failing_issuer();
    let server = TestTokenServer::spawn_with_issuer(issuer).await?;

    let response = server.request_token(None).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(signer.attempts(), 0);

    Ok(())
}

/// The server keeps serving after a failed issuance.
#[tokio::test]
async fn test_server_survives_signing_failures() -> Result<(), anyhow::Error> {
    let (issuer, signer) = failing_issuer();
    let server = TestTokenServer::spawn_with_issuer(issuer).await?;

    for _ in 0..3 {
        let response = server.request_token(Some("alice")).await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    let health = server
        .client()
        .get(format!("{}/health", server.url()))
        .send()
        .await?;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(signer.attempts(), 3);

    Ok(())
}
