//! [`Response`] type for Vertex AI `generateContent`.

use serde::{Deserialize, Serialize};

use crate::prompt::Message;

/// Successful `generateContent` response. Every level is optional on the
/// wire; missing levels deserialize as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Response<'a> {
    /// Generated [`Candidate`]s. We only ever read the first.
    #[serde(default)]
    pub candidates: Vec<Candidate<'a>>,
    /// Token accounting, if the API sent it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// One generated candidate.
#[derive(Debug, Default, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Candidate<'a> {
    /// Generated [`Message`]. Absent when the candidate was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Message<'a>>,
    /// Why generation stopped, such as `STOP` or `MAX_TOKENS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Usage statistics.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl Response<'_> {
    /// Text of the first candidate's first part. Empty if any level is
    /// missing.
    pub fn text(&self) -> &str {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(Message::first_text)
            .unwrap_or_default()
    }

    /// `finish_reason` of the first candidate.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}
