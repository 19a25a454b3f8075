//! Integration tests for operational endpoints

use reqwest::StatusCode;
use token_test_utils::TestTokenServer;

/// `/health` returns 200 OK with body "OK" while the process is serving.
#[tokio::test]
async fn test_health_endpoint_returns_ok() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestTokenServer::spawn().await?;

    // Act
    let response = server
        .client()
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_is_served() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/metrics", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_unknown_path_returns_404() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/tokens", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
