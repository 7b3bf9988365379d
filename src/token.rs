//! OAuth2 refresh-token grant types.

use serde::{Deserialize, Serialize};

use crate::{config::Credentials, Key};

/// Body of the refresh-token grant. Sent as JSON.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    #[allow(missing_docs)]
    pub client_id: &'a str,
    #[allow(missing_docs)]
    pub client_secret: &'a Key,
    #[allow(missing_docs)]
    pub refresh_token: &'a Key,
    /// Always `refresh_token`.
    pub grant_type: &'static str,
}

impl<'a> From<&'a Credentials> for TokenRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            refresh_token: &credentials.refresh_token,
            grant_type: "refresh_token",
        }
    }
}

/// Successful token response. Fields other than the token are ignored.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Short-lived bearer token for the model call.
    pub access_token: Key,
}

/// Error body from the token endpoint, such as
/// `{"error": "invalid_grant", "error_description": "Bad Request"}`.
#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq, Eq)]
#[error(
    "{error}{}",
    .error_description
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
)]
pub struct OAuthError {
    /// Error code.
    pub error: String,
    /// Human readable detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}
