//! [`Client`] for Vertex AI `generateContent` and related types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    sanitize, token, Config, GenerationRequest, Key, Prompt, Response,
};

/// Result type for the client. See also [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Client for the token endpoint and the Vertex AI `generateContent` API.
///
/// Cloning is cheap; the [`Config`] is shared. Every [`Self::generate`] call
/// performs a fresh token exchange. Tokens are never cached.
#[derive(Clone)]
pub struct Client {
    /// Inner [`reqwest::Client`]. It is **not necessary** to set an
    /// `Authorization` header on a custom client; the bearer token is added
    /// to each model request.
    pub inner: reqwest::Client,
    config: Arc<Config>,
}

static_assertions::assert_impl_all!(Client: Send, Sync, Clone);

impl Client {
    /// Our user agent.
    pub const USER_AGENT: &'static str =
        concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

    /// Create a new client from a [`Config`].
    pub fn new(config: Config) -> Result<Self> {
        #[cfg(feature = "log")]
        {
            log::info!(concat!(
                "Creating ",
                env!("CARGO_PKG_NAME"),
                " client..."
            ));
            log::debug!(concat!("Crate version: ", env!("CARGO_PKG_VERSION")));
            log::debug!("Model endpoint: {}", config.endpoint());
        }

        // Headers for all requests.
        let mut headers = reqwest::header::HeaderMap::new();

        // Both endpoints take JSON.
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(Self::USER_AGENT)
            .build()?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// The [`Config`] this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Exchange the configured refresh token for a short-lived access token.
    pub async fn access_token(&self) -> Result<Key> {
        let body = token::TokenRequest::from(&self.config.credentials);

        #[cfg(feature = "log")]
        {
            log::debug!("POST request to {}", self.config.token_url);
        }

        let response = self
            .inner
            .post(&self.config.token_url)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(match serde_json::from_str::<token::OAuthError>(&text) {
                Ok(error) => error.into(),
                Err(_) => Error::UnexpectedResponse { status, body: text },
            });
        }

        let token: token::TokenResponse = response.json().await?;
        if token.access_token.is_empty() {
            return Err(Error::EmptyToken);
        }

        Ok(token.access_token)
    }

    /// Post a [`Prompt`] to `generateContent` with `token` as the bearer.
    pub async fn generate_content(
        &self,
        token: &Key,
        prompt: &Prompt<'_>,
    ) -> Result<Response<'static>> {
        let url = self.config.endpoint();

        #[cfg(feature = "log")]
        {
            log::debug!("POST request to {}", url);
            if let Ok(json) = serde_json::to_string_pretty(prompt) {
                log::debug!("Sending body:\n{}", json);
            } else {
                log::warn!("Could not serialize body. Request will fail.");
            }
        }

        let mut bearer = reqwest::header::HeaderValue::from_str(&format!(
            "Bearer {}",
            token.read()
        ))?;
        bearer.set_sensitive(true);

        let response = self
            .inner
            .post(url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .json(prompt)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(match serde_json::from_str::<GoogleErrorWrapper>(&text)
            {
                // Error was sucessfully parsed from the API.
                Ok(wrapper) => wrapper.error.into(),
                Err(_) => Error::UnexpectedResponse { status, body: text },
            });
        }

        Ok(response.json().await?)
    }

    /// Run the whole pipeline for one [`GenerationRequest`]: token exchange,
    /// model call, then fence stripping. Returns [`Error::Empty`] if nothing
    /// usable came back.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<String> {
        let token = self.access_token().await?;

        let prompt = Prompt::for_flavor(request.flavor, &request.prompt)
            .configure(&self.config);
        let response = self.generate_content(&token, &prompt).await?;

        #[cfg(feature = "log")]
        {
            if let Some(usage) = &response.usage_metadata {
                log::debug!(
                    "Usage: {} prompt tokens, {} candidate tokens",
                    usage.prompt_token_count,
                    usage.candidates_token_count
                );
            }
            if let Some(reason) = response.finish_reason() {
                log::debug!("Finish reason: {}", reason);
            }
        }

        let code = sanitize::strip_fences(response.text());
        if code.is_empty() {
            return Err(Error::Empty);
        }

        Ok(code)
    }
}

/// [`Client`] error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP error.
    #[error("HTTP error: {0}")]
    HTTP(#[from] reqwest::Error),
    /// Data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The token endpoint refused the grant.
    #[error("OAuth error: {0}")]
    OAuth(#[from] token::OAuthError),
    /// The token endpoint answered without a token.
    #[error("Token endpoint returned an empty access token")]
    EmptyToken,
    /// The access token can't be sent as a header.
    #[error("Invalid access token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    /// Vertex AI error.
    #[error("Google error: {0}")]
    Google(#[from] GoogleError),
    /// A non-success status with a body we could not parse.
    #[error("Unexpected response ({status}): {body}")]
    #[allow(missing_docs)]
    UnexpectedResponse {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The model returned no usable text.
    #[error("Model returned no code")]
    Empty,
}

/// Google API error, the `error` object of a non-success response.
#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("{status} ({code}): {message}")]
pub struct GoogleError {
    /// HTTP status code.
    pub code: u16,
    /// Human readable message.
    pub message: String,
    /// Canonical status, such as `INVALID_ARGUMENT` or `UNAUTHENTICATED`.
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize)]
pub(crate) struct GoogleErrorWrapper {
    pub(crate) error: GoogleError,
}
