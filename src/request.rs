//! Wire types for `POST /api/generate`, shared by the page and the proxy.

use serde::{Deserialize, Serialize};

use crate::Flavor;

/// What the page sends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Free-text description of what to build.
    pub prompt: String,
    /// Requested [`Flavor`]. Named `language` on the wire.
    #[serde(rename = "language")]
    pub flavor: Flavor,
}

/// Request body as it arrives, before validation. Either field may be
/// missing or empty.
#[derive(Debug, Default, Deserialize)]
pub struct RawRequest {
    #[allow(missing_docs)]
    #[serde(default)]
    pub prompt: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub language: Option<String>,
}

/// A request is missing its prompt or its language.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Prompt and language are required")]
pub struct MissingField;

impl TryFrom<RawRequest> for GenerationRequest {
    type Error = MissingField;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        match (raw.prompt, raw.language) {
            (Some(prompt), Some(language))
                if !prompt.is_empty() && !language.is_empty() =>
            {
                Ok(Self {
                    prompt,
                    flavor: Flavor::from_token(&language),
                })
            }
            _ => Err(MissingField),
        }
    }
}

/// Successful response: the cleaned code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResult {
    /// Generated code with fences and surrounding whitespace removed.
    pub code: String,
}

/// Error response body. The message is always one of a few fixed strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[allow(missing_docs)]
    pub error: String,
}

/// Whatever the page may get back: `{code}` on success, `{error}` otherwise.
/// Both are optional so a malformed body still parses.
#[derive(Debug, Default, Deserialize)]
pub struct ReplyBody {
    #[allow(missing_docs)]
    #[serde(default)]
    pub code: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub error: Option<String>,
}
