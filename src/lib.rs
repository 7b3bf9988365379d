#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! `builderai` turns a plain-language description into a web page.
//!
//! The page (served from `/`) posts a prompt and an output [`Flavor`] to the
//! generation proxy at `POST /api/generate`. The proxy exchanges OAuth2
//! refresh credentials for an access token, calls Gemini on [Vertex AI]
//! once, strips Markdown fences from the answer and hands the code back to
//! be shown in the editor and a sandboxed preview.
//!
//! To use the pipeline directly, build a [`Config`] (usually with
//! [`Config::from_env`]), wrap it in a [`Client`] and call
//! [`Client::generate`]. With the `server` feature, [`server::router`] gives
//! the whole HTTP surface.
//!
//! [Vertex AI]: <https://cloud.google.com/vertex-ai/generative-ai/docs/model-reference/inference>

pub mod key;
pub use key::Key;

pub mod config;
pub use config::Config;

pub mod client;
pub use client::Client;

pub mod flavor;
pub use flavor::Flavor;

pub mod model;
pub use model::Model;

pub mod prompt;
pub use prompt::Prompt;

pub mod response;
pub use response::Response;

pub mod request;
pub use request::{GenerationRequest, GenerationResult};

pub mod sanitize;

pub mod token;

pub mod ui;
pub use ui::Workbench;

#[cfg(feature = "server")]
pub mod server;

/// Re-exports of commonly used crates to avoid version conflicts and reduce
/// dependency bloat.
pub mod exports {
    #[cfg(feature = "server")]
    pub use axum;
    #[cfg(feature = "log")]
    pub use log;
    pub use reqwest;
    pub use serde;
    pub use serde_json;
}
