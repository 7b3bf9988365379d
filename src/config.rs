//! Process-wide [`Config`], read once at start-up.

use std::num::NonZeroU16;

use crate::{key::EmptyKey, Key, Model};

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration error. These surface at start-up, before any request is
/// served.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A required variable is not set.
    #[error("`{var}` is not set")]
    Missing {
        /// Name of the variable.
        var: &'static str,
    },
    /// A required variable is set but empty.
    #[error("`{var}` is empty")]
    Empty {
        /// Name of the variable.
        var: &'static str,
    },
    /// A variable holds a value we can't use.
    #[error("`{var}` is invalid: {value:?}")]
    Invalid {
        /// Name of the variable.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// OAuth2 client credentials used for the refresh-token grant.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// OAuth2 client id. Not a secret.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: Key,
    /// Long-lived refresh token.
    pub refresh_token: Key,
}

/// Everything the generation proxy needs. Built once and shared read-only
/// between requests.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Cloud project id.
    pub project_id: String,
    /// Vertex AI region, such as `us-central1`.
    pub location: String,
    /// [`Model`] to call.
    pub model: Model,
    /// OAuth2 [`Credentials`].
    pub credentials: Credentials,
    /// Token endpoint for the refresh-token grant.
    pub token_url: String,
    /// Base URL of the Vertex AI API. When `None` the regional host for
    /// [`Self::location`] is used.
    pub api_base: Option<String>,
    /// Cap on generated tokens.
    pub max_output_tokens: NonZeroU16,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Config {
    /// Project used when `GOOGLE_PROJECT_ID` is unset.
    pub const DEFAULT_PROJECT_ID: &'static str = "gen-lang-client-0811420861";
    /// Region used when `GOOGLE_LOCATION` is unset.
    pub const DEFAULT_LOCATION: &'static str = "us-central1";
    /// Google's OAuth2 token endpoint.
    pub const DEFAULT_TOKEN_URL: &'static str =
        "https://oauth2.googleapis.com/token";
    /// Output cap sent with every generation.
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u16 = 8000;
    /// Temperature sent with every generation.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Environment variable names.
    pub const PROJECT_ID_VAR: &'static str = "GOOGLE_PROJECT_ID";
    #[allow(missing_docs)]
    pub const LOCATION_VAR: &'static str = "GOOGLE_LOCATION";
    #[allow(missing_docs)]
    pub const MODEL_VAR: &'static str = "GOOGLE_MODEL";
    #[allow(missing_docs)]
    pub const CLIENT_ID_VAR: &'static str = "GOOGLE_CLIENT_ID";
    #[allow(missing_docs)]
    pub const CLIENT_SECRET_VAR: &'static str = "GOOGLE_CLIENT_SECRET";
    #[allow(missing_docs)]
    pub const REFRESH_TOKEN_VAR: &'static str = "GOOGLE_REFRESH_TOKEN";
    #[allow(missing_docs)]
    pub const TOKEN_URL_VAR: &'static str = "GOOGLE_TOKEN_URL";
    #[allow(missing_docs)]
    pub const API_BASE_VAR: &'static str = "GOOGLE_API_BASE";

    /// Older names for the project and region, read when the `GOOGLE_*`
    /// names are unset.
    pub const LEGACY_PROJECT_ID_VAR: &'static str =
        "NEXT_PUBLIC_GOOGLE_PROJECT_ID";
    #[allow(missing_docs)]
    pub const LEGACY_LOCATION_VAR: &'static str = "NEXT_PUBLIC_GOOGLE_LOCATION";

    /// Create a config with default project, region, model and endpoints.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            project_id: Self::DEFAULT_PROJECT_ID.to_string(),
            location: Self::DEFAULT_LOCATION.to_string(),
            model: Model::default(),
            credentials,
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            api_base: None,
            max_output_tokens: NonZeroU16::new(
                Self::DEFAULT_MAX_OUTPUT_TOKENS,
            )
            .unwrap_or(NonZeroU16::MAX),
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }

    /// Read the config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the config through `lookup`, which maps a variable name to its
    /// value. Project, region and model fall back to defaults; the credential
    /// triple is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |var: &str| {
            lookup(var).filter(|value| !value.trim().is_empty())
        };
        let required = |var: &'static str| -> Result<String> {
            let value = lookup(var).ok_or(Error::Missing { var })?;
            if value.trim().is_empty() {
                return Err(Error::Empty { var });
            }
            Ok(value.trim().to_string())
        };
        let secret = |var: &'static str| -> Result<Key> {
            let value = lookup(var).ok_or(Error::Missing { var })?;
            Key::try_from(value).map_err(|EmptyKey| Error::Empty { var })
        };

        let credentials = Credentials {
            client_id: required(Self::CLIENT_ID_VAR)?,
            client_secret: secret(Self::CLIENT_SECRET_VAR)?,
            refresh_token: secret(Self::REFRESH_TOKEN_VAR)?,
        };

        let mut config = Self::new(credentials);
        if let Some(project_id) = optional(Self::PROJECT_ID_VAR)
            .or_else(|| optional(Self::LEGACY_PROJECT_ID_VAR))
        {
            config.project_id = project_id;
        }
        if let Some(location) = optional(Self::LOCATION_VAR)
            .or_else(|| optional(Self::LEGACY_LOCATION_VAR))
        {
            config.location = location;
        }
        if let Some(model) = optional(Self::MODEL_VAR) {
            let parsed: Model =
                model.trim().parse().map_err(|_| Error::Invalid {
                    var: Self::MODEL_VAR,
                    value: model.clone(),
                })?;
            config = config.model(parsed);
        }
        if let Some(token_url) = optional(Self::TOKEN_URL_VAR) {
            config.token_url = token_url;
        }
        config.api_base = optional(Self::API_BASE_VAR);

        #[cfg(feature = "log")]
        {
            log::debug!(
                "Config: project={} location={} model={}",
                config.project_id,
                config.location,
                config.model
            );
        }

        Ok(config)
    }

    /// Set the [`Model`].
    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Set the token endpoint.
    pub fn token_url<S>(mut self, url: S) -> Self
    where
        S: Into<String>,
    {
        self.token_url = url.into();
        self
    }

    /// Set the API base URL.
    pub fn api_base<S>(mut self, url: S) -> Self
    where
        S: Into<String>,
    {
        self.api_base = Some(url.into());
        self
    }

    /// Full URL of the `generateContent` endpoint.
    pub fn endpoint(&self) -> String {
        let base = match &self.api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => {
                format!("https://{}-aiplatform.googleapis.com", self.location)
            }
        };

        format!(
            "{base}/v1/projects/{}/locations/{}/publishers/google/models/{}\
             :generateContent",
            self.project_id, self.location, self.model
        )
    }
}
