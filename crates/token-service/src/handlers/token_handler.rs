use crate::errors::TiError;
use crate::models::{TokenQuery, TokenResponse};
use crate::observability::metrics::record_error;
use crate::observability::ErrorCategory;
use crate::services::token_service::TokenIssuer;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub issuer: TokenIssuer,
}

/// Handle token request
///
/// GET /token?user_id=<identifier>
///
/// - 200 `{"token": "..."}` on success
/// - 400 when `user_id` is absent or empty
///
/// Pairs are extracted as a list so a repeated `user_id` is not a
/// deserialization error; the first occurrence wins.
/// - 500 when signing fails
#[instrument(skip_all, name = "ti.token.issue")]
pub async fn handle_token(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TokenResponse>, TiError> {
    issue_for_query(&state.issuer, TokenQuery::from_pairs(pairs))
        .map(|token| Json(TokenResponse { token }))
        .inspect_err(|e| {
            record_error(
                "issue_token",
                ErrorCategory::from(e).as_str(),
                e.status_code().as_u16(),
            );
        })
}

fn issue_for_query(issuer: &TokenIssuer, query: TokenQuery) -> Result<String, TiError> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or(TiError::MissingIdentifier)?;

    issuer.issue_token(&user_id)
}
