//! [`Model`] to use for inference.
use serde::{Deserialize, Serialize};

/// Gemini model served from Vertex AI. The id goes into the endpoint path,
/// not the request body.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    derive_more::Display,
)]
pub enum Model {
    /// Gemini 3 Pro (preview). This is the default model.
    #[default]
    #[serde(rename = "gemini-3-pro-preview")]
    #[display("gemini-3-pro-preview")]
    Gemini3ProPreview,
    /// Gemini 2.5 Pro
    #[serde(rename = "gemini-2.5-pro")]
    #[display("gemini-2.5-pro")]
    Gemini25Pro,
    /// Gemini 2.5 Flash
    #[serde(rename = "gemini-2.5-flash")]
    #[display("gemini-2.5-flash")]
    Gemini25Flash,
}

impl Model {
    /// All models, default first.
    pub const ALL: [Self; 3] =
        [Self::Gemini3ProPreview, Self::Gemini25Pro, Self::Gemini25Flash];
}

/// A model id that isn't one of [`Model::ALL`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown model: `{0}`")]
pub struct UnknownModel(pub String);

impl std::str::FromStr for Model {
    type Err = UnknownModel;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.to_string() == id)
            .ok_or_else(|| UnknownModel(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        assert_eq!(Model::default().to_string(), "gemini-3-pro-preview");
    }

    #[test]
    fn test_serde_matches_display() {
        for model in Model::ALL {
            assert_eq!(
                serde_json::to_string(&model).unwrap(),
                format!("\"{model}\"")
            );
        }
    }

    #[test]
    fn test_from_str() {
        for model in Model::ALL {
            assert_eq!(model.to_string().parse::<Model>().unwrap(), model);
        }
        assert_eq!(
            "gemini-1.0-pro".parse::<Model>(),
            Err(UnknownModel("gemini-1.0-pro".to_string()))
        );
    }
}
