//! Vertex AI `generateContent` request type. We call it [`Prompt`] since in
//! actual usage this makes the code more readable.

use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};

use crate::{Config, Flavor};

pub mod message;
pub use message::{Message, Part, Role};

// The instruction placed ahead of the user's description is
// `PREAMBLE_HEAD`, then `Flavor::describe`, then `PREAMBLE_TAIL`.
const PREAMBLE_HEAD: &str = "You are an expert web developer. Generate ";
const PREAMBLE_TAIL: &str = " code based on the user's description.\n\
Only return the code, nothing else. No markdown, no explanations, no backticks. Just pure code.";

/// Sampling settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Cap on generated tokens.
    pub max_output_tokens: NonZeroU16,
    /// Temperature for sampling. Higher values mean more randomness.
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: NonZeroU16::new(
                Config::DEFAULT_MAX_OUTPUT_TOKENS,
            )
            .unwrap_or(NonZeroU16::MAX),
            temperature: Config::DEFAULT_TEMPERATURE,
        }
    }
}

/// Request body for `generateContent`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prompt<'a> {
    /// Input [`Message`]s. We always send a single user turn.
    pub contents: Vec<Message<'a>>,
    /// [`GenerationConfig`] for the call.
    pub generation_config: GenerationConfig,
}

impl<'a> Prompt<'a> {
    /// The single-turn prompt for `flavor`: the instruction preamble, then
    /// the user's description under "Build this:".
    pub fn for_flavor(flavor: Flavor, description: &str) -> Self {
        Self::default().add_message((
            Role::User,
            format!("{}\n\nBuild this: {description}", preamble(flavor)),
        ))
    }

    /// Add a [`Message`] to [`contents`].
    ///
    /// [`contents`]: Prompt::contents
    pub fn add_message<M>(mut self, message: M) -> Self
    where
        M: Into<Message<'a>>,
    {
        self.contents.push(message.into());
        self
    }

    /// Set the [`max_output_tokens`].
    ///
    /// [`max_output_tokens`]: GenerationConfig::max_output_tokens
    pub fn max_output_tokens(mut self, max_output_tokens: NonZeroU16) -> Self {
        self.generation_config.max_output_tokens = max_output_tokens;
        self
    }

    /// Set the [`temperature`].
    ///
    /// [`temperature`]: GenerationConfig::temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config.temperature = temperature;
        self
    }

    /// Apply the sampling settings from a [`Config`].
    pub fn configure(self, config: &Config) -> Self {
        self.max_output_tokens(config.max_output_tokens)
            .temperature(config.temperature)
    }
}

/// System-role instruction selecting the output style for `flavor`.
pub fn preamble(flavor: Flavor) -> String {
    format!("{PREAMBLE_HEAD}{}{PREAMBLE_TAIL}", flavor.describe())
}
