//! Integration tests for `GET /token`
//!
//! Each test spawns a real server on a random port and talks to it over HTTP.

use reqwest::StatusCode;
use std::time::Duration;
use token_service::crypto::verify_jwt;
use token_service::models::TokenResponse;
use token_service::services::token_service::{TokenIssuer, TOKEN_EXPIRY_SECONDS};
use token_test_utils::{
    test_issuer, test_secret, test_secret_box, TestTokenServer, TokenAssertions,
    DEFAULT_SECRET_SEED, TEST_NOW,
};

// ============================================================================
// Issuance
// ============================================================================

#[tokio::test]
async fn test_issue_token_for_user() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestTokenServer::spawn().await?;

    // Act
    let response = server.request_token(Some("alice")).await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "Expected JSON response, got '{}'",
        content_type
    );

    let body: serde_json::Value = response.json().await?;
    let object = body.as_object().expect("body should be a JSON object");
    assert_eq!(object.len(), 1, "Response should only carry the token");

    let token = body["token"]
        .as_str()
        .expect("token should be a string")
        .to_string();
    token
        .assert_valid_jwt()
        .assert_for_subject("alice")
        .assert_expires_in(TOKEN_EXPIRY_SECONDS);

    Ok(())
}

#[tokio::test]
async fn test_issued_token_verifies_with_shared_secret() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response: TokenResponse = server.request_token(Some("alice")).await?.json().await?;

    let now = chrono::Utc::now().timestamp();
    let claims = verify_jwt(&response.token, &test_secret(DEFAULT_SECRET_SEED), now)?;
    assert_eq!(claims.sub, "alice");

    let other = verify_jwt(&response.token, &test_secret(DEFAULT_SECRET_SEED + 1), now);
    assert!(other.is_err(), "Token must not verify under another secret");

    Ok(())
}

#[tokio::test]
async fn test_identifier_with_reserved_characters() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    for identifier in ["a b&c=d", "user@example.com", "ümlaut-ü", "/path?x"] {
        let response = server.request_token(Some(identifier)).await?;
        assert_eq!(response.status(), StatusCode::OK, "identifier {identifier:?}");

        let body: TokenResponse = response.json().await?;
        let claims = server.issuer().verify(&body.token)?;
        assert_eq!(claims.sub, identifier);
    }

    Ok(())
}

#[tokio::test]
async fn test_tokens_for_same_user_differ_across_seconds() -> Result<(), anyhow::Error> {
    let (issuer, clock) = test_issuer(DEFAULT_SECRET_SEED);
    let server = TestTokenServer::spawn_with_issuer(issuer).await?;

    let first: TokenResponse = server.request_token(Some("alice")).await?.json().await?;
    clock.advance(Duration::from_secs(1));
    let second: TokenResponse = server.request_token(Some("alice")).await?.json().await?;

    assert_ne!(first.token, second.token);
    first.token.assert_expires_at(TEST_NOW + TOKEN_EXPIRY_SECONDS);
    second.token.assert_expires_at(TEST_NOW + 1 + TOKEN_EXPIRY_SECONDS);

    Ok(())
}

#[tokio::test]
async fn test_issued_token_expires_after_one_hour() -> Result<(), anyhow::Error> {
    let (issuer, clock) = test_issuer(DEFAULT_SECRET_SEED);
    let server = TestTokenServer::spawn_with_issuer(issuer).await?;

    let body: TokenResponse = server.request_token(Some("alice")).await?.json().await?;

    clock.advance(Duration::from_secs(3599));
    assert!(server.issuer().verify(&body.token).is_ok());

    clock.advance(Duration::from_secs(1));
    assert!(server.issuer().verify(&body.token).is_err());

    Ok(())
}

#[tokio::test]
async fn test_concurrent_requests() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let mut handles = Vec::new();
    for i in 0..16 {
        let client = server.client().clone();
        let url = reqwest::Url::parse_with_params(
            &format!("{}/token", server.url()),
            &[("user_id", format!("user-{i}"))],
        )?;
        handles.push(tokio::spawn(async move {
            let body: TokenResponse = client.get(url).send().await?.json().await?;
            Ok::<_, anyhow::Error>((i, body.token))
        }));
    }

    for handle in handles {
        let (i, token) = handle.await??;
        token.assert_for_subject(&format!("user-{i}"));
    }

    Ok(())
}

// ============================================================================
// Missing identifier
// ============================================================================

#[tokio::test]
async fn test_missing_user_id_returns_400() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = server.request_token(None).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.text().await?;
    assert!(!body.is_empty(), "400 response should carry a message");
    assert!(!body.contains("token\""), "No token should be returned");

    Ok(())
}

#[tokio::test]
async fn test_empty_user_id_returns_400() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = server.request_token(Some("")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "user_id is required");

    Ok(())
}

#[tokio::test]
async fn test_other_parameters_are_ignored() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/token?name=alice", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .client()
        .get(format!("{}/token?user_id=alice&extra=1", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_repeated_user_id_uses_first_value() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/token?user_id=alice&user_id=bob", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: TokenResponse = response.json().await?;
    body.token.assert_for_subject("alice");

    let response = server
        .client()
        .get(format!("{}/token?user_id=&user_id=bob", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "user_id is required");

    Ok(())
}

// ============================================================================
// Browser access
// ============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/token?user_id=alice", server.url()))
        .header("origin", "http://localhost:5173")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    Ok(())
}

#[tokio::test]
async fn test_cors_restricted_origin() -> Result<(), anyhow::Error> {
    let issuer = TokenIssuer::new(&test_secret_box(DEFAULT_SECRET_SEED));
    let origin = axum::http::HeaderValue::from_static("https://app.example.com");
    let server = TestTokenServer::spawn_with(issuer, Some(origin)).await?;

    let response = server
        .client()
        .get(format!("{}/token?user_id=alice", server.url()))
        .header("origin", "https://app.example.com")
        .send()
        .await?;

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://app.example.com")
    );

    Ok(())
}
