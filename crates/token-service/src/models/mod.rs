use serde::{Deserialize, Serialize};

/// Query parameters accepted by `GET /token`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TokenQuery {
    pub user_id: Option<String>,
}

impl TokenQuery {
    /// Build from decoded query pairs. A repeated `user_id` keeps its first
    /// value; other parameters are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let user_id = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "user_id").then_some(value));

        Self { user_id }
    }
}

/// Body of a successful `GET /token` response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
