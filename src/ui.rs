//! The page's state machine.
//!
//! [`Workbench`] owns everything the page shows: the prompt, the selected
//! [`Flavor`], the code in the editor, the preview document and the "in
//! flight" flag. The embedded page (`assets/index.html`) implements the same
//! transitions in the browser.

use std::{borrow::Cow, future::Future};

use crate::{
    request::ReplyBody, Flavor, GenerationRequest, GenerationResult,
};

/// What the editor shows before anything has been generated.
pub const DEFAULT_CODE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>AI Builder</title>
  <style>
    * { margin: 0; padding: 0; }
    body { font-family: sans-serif; background: #f0f0f0; }
    .container { max-width: 1200px; margin: 50px auto; padding: 20px; }
  </style>
</head>
<body>
  <div class="container">
    <h1>Welcome to AI Website Builder</h1>
    <p>Describe what you want to build, then click Generate!</p>
  </div>
</body>
</html>"#;

/// A transient notification.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::IsVariant,
)]
pub enum Notice {
    /// Something worked.
    #[display("{_0}")]
    Success(Cow<'static, str>),
    /// Something didn't.
    #[display("{_0}")]
    Error(Cow<'static, str>),
}

impl Notice {
    /// Message text.
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }
}

/// Why a generation failed, from the page's point of view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The proxy answered with an error payload, or with no code.
    #[error("{0}")]
    Server(String),
    /// The request never got an answer.
    #[error("API Error")]
    Network,
}

impl From<Rejection> for Notice {
    fn from(rejection: Rejection) -> Self {
        Notice::Error(rejection.to_string().into())
    }
}

/// Something that can turn a [`GenerationRequest`] into code. In the
/// browser this is `fetch("/api/generate")`; see [`ProxyClient`].
pub trait Generate {
    /// Generate code for `request`.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationResult, Rejection>> + Send;
}

/// The sandboxed preview frame. Every write replaces the whole document,
/// discarding whatever the previous one left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    document: String,
    writes: u64,
}

impl Preview {
    /// The `sandbox` attribute of the frame: scripts only, no same-origin.
    pub const SANDBOX: &'static str = "allow-scripts";

    /// Open, write and close the document.
    pub fn write(&mut self, markup: &str) {
        self.document.clear();
        self.document.push_str(markup);
        self.writes += 1;
    }

    /// Current document.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// How many times the document has been replaced.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

/// A file for the browser to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// `website.html` or `website.jsx`.
    pub filename: String,
    /// MIME type of the data URI.
    pub mime: &'static str,
    /// File contents, the editor text as-is.
    pub contents: String,
}

/// State of the page.
#[derive(Debug, Clone)]
pub struct Workbench {
    /// Text in the prompt box.
    pub prompt: String,
    /// Selected [`Flavor`].
    pub flavor: Flavor,
    code: String,
    loading: bool,
    preview: Preview,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbench {
    /// Label of the submit button while idle.
    pub const SUBMIT_LABEL: &'static str = "Generate";
    /// Label of the submit button while a request is out.
    pub const LOADING_LABEL: &'static str = "Generating...";

    /// A fresh page: [`DEFAULT_CODE`] in the editor and in the preview.
    pub fn new() -> Self {
        let mut preview = Preview::default();
        preview.write(DEFAULT_CODE);
        Self {
            prompt: String::new(),
            flavor: Flavor::default(),
            code: DEFAULT_CODE.to_string(),
            loading: false,
            preview,
        }
    }

    /// Code in the editor.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The preview frame.
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Whether a generation is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Label for the submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            Self::LOADING_LABEL
        } else {
            Self::SUBMIT_LABEL
        }
    }

    /// The editor changed. The preview is left alone until
    /// [`Self::refresh_preview`].
    pub fn edit<S>(&mut self, code: S)
    where
        S: Into<String>,
    {
        self.code = code.into();
    }

    /// Write the editor contents into the preview.
    pub fn refresh_preview(&mut self) {
        self.preview.write(&self.code);
    }

    /// Start a generation. Returns `None` while one is already in flight (the
    /// button is disabled), an error [`Notice`] if the prompt is blank, or the
    /// request to send. On `Some(Ok(_))` the workbench is loading until
    /// [`Self::finish_submit`].
    pub fn begin_submit(
        &mut self,
    ) -> Option<Result<GenerationRequest, Notice>> {
        if self.loading {
            return None;
        }
        if self.prompt.trim().is_empty() {
            return Some(Err(Notice::Error("Please enter a prompt".into())));
        }

        self.loading = true;
        Some(Ok(GenerationRequest {
            prompt: self.prompt.clone(),
            flavor: self.flavor,
        }))
    }

    /// Apply the outcome of a generation. On success the code replaces the
    /// editor contents and the preview is refreshed; on failure both are left
    /// as they were.
    pub fn finish_submit(
        &mut self,
        outcome: Result<GenerationResult, Rejection>,
    ) -> Notice {
        self.loading = false;
        match outcome {
            Ok(GenerationResult { code }) => {
                self.code = code;
                self.refresh_preview();
                Notice::Success("Code generated!".into())
            }
            Err(rejection) => rejection.into(),
        }
    }

    /// [`Self::begin_submit`], call `backend`, then [`Self::finish_submit`].
    /// Returns `None` if a generation was already in flight.
    pub async fn submit<G>(&mut self, backend: &G) -> Option<Notice>
    where
        G: Generate,
    {
        let request = match self.begin_submit()? {
            Ok(request) => request,
            Err(notice) => return Some(notice),
        };

        let outcome = backend.generate(&request).await;
        Some(self.finish_submit(outcome))
    }

    /// Export the editor contents. No validation is done.
    pub fn export(&self) -> (Download, Notice) {
        (
            Download {
                filename: self.flavor.export_filename(),
                mime: "text/plain;charset=utf-8",
                contents: self.code.clone(),
            },
            Notice::Success("Downloaded!".into()),
        )
    }
}

/// [`Generate`] over HTTP against a running proxy.
#[derive(Clone)]
pub struct ProxyClient {
    inner: reqwest::Client,
    url: String,
}

impl ProxyClient {
    /// Talk to the proxy at `base`, such as `http://127.0.0.1:3000`.
    pub fn new<S>(base: S) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            inner: reqwest::Client::new(),
            url: format!(
                "{}/api/generate",
                base.as_ref().trim_end_matches('/')
            ),
        }
    }
}

impl Generate for ProxyClient {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationResult, Rejection>> + Send {
        let send = self.inner.post(&self.url).json(request).send();
        async move {
            let response = send.await.map_err(|_e| {
                #[cfg(feature = "log")]
                log::warn!("Request to the proxy failed: {}", _e);
                Rejection::Network
            })?;
            let reply: ReplyBody =
                response.json().await.map_err(|_| Rejection::Network)?;

            match reply {
                ReplyBody {
                    code: Some(code), ..
                } if !code.is_empty() => Ok(GenerationResult { code }),
                ReplyBody { error, .. } => Err(Rejection::Server(
                    error.unwrap_or_else(|| "Generation failed".to_string()),
                )),
            }
        }
    }
}
