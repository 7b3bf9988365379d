//! [`Flavor`] of code to generate.
use serde::{Deserialize, Serialize};

/// Output flavor requested from the model. On the wire this is the
/// `language` field and is one of `"html"`, `"jsx"` or `"typescript"`.
///
/// Any other token maps to [`Flavor::FALLBACK`], see [`Flavor::from_token`].
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[serde(from = "String")]
pub enum Flavor {
    /// Plain HTML with inline CSS and JavaScript. The only flavor the preview
    /// can render directly.
    #[default]
    #[display("html")]
    Html,
    /// React component markup.
    #[display("jsx")]
    Jsx,
    /// TypeScript source.
    #[display("typescript")]
    TypeScript,
}

impl Flavor {
    /// What an unrecognized `language` token is treated as.
    pub const FALLBACK: Self = Self::TypeScript;

    /// All flavors, in the order the selector lists them.
    pub const ALL: [Self; 3] = [Self::Html, Self::Jsx, Self::TypeScript];

    /// Map a wire token to a [`Flavor`]. Matching is exact.
    pub fn from_token(token: &str) -> Self {
        match token {
            "html" => Self::Html,
            "jsx" => Self::Jsx,
            "typescript" => Self::TypeScript,
            _ => Self::FALLBACK,
        }
    }

    /// Wire token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Jsx => "jsx",
            Self::TypeScript => "typescript",
        }
    }

    /// How the instruction preamble names the kind of code wanted.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Html => "HTML/CSS/JavaScript",
            Self::Jsx => "React JSX",
            Self::TypeScript => "TypeScript",
        }
    }

    /// Label for the flavor selector.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Html => "HTML/CSS/JS",
            Self::Jsx => "React",
            Self::TypeScript => "TypeScript",
        }
    }

    /// Syntax mode for the code editor.
    pub const fn editor_language(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Jsx => "javascript",
            Self::TypeScript => "typescript",
        }
    }

    /// File extension for exports. There are two buckets: markup gets `html`
    /// and both non-markup flavors share `jsx`.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Jsx | Self::TypeScript => "jsx",
        }
    }

    /// Name of the exported file, `website.<ext>`.
    pub fn export_filename(&self) -> String {
        format!("website.{}", self.extension())
    }
}

impl From<String> for Flavor {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl From<&str> for Flavor {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}
