//! A [`prompt::Message`] (a Gemini `Content`) and associated types.
//!
//! [`prompt::Message`]: crate::prompt::Message

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role of the [`Message`] author.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// From the user.
    #[default]
    User,
    /// From the model.
    Model,
}

/// One text [`Part`] of a [`Message`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Part<'a> {
    /// Text of the part. Absent on non-text parts, which are read as empty.
    #[serde(default)]
    pub text: Cow<'a, str>,
}

impl<'a> From<&'a str> for Part<'a> {
    fn from(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
        }
    }
}

impl From<String> for Part<'_> {
    fn from(text: String) -> Self {
        Self {
            text: Cow::Owned(text),
        }
    }
}

/// A message in a [`Prompt`]. The response carries the same shape inside
/// each candidate.
///
/// [`Prompt`]: crate::Prompt
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Message<'a> {
    /// Who is the message from.
    #[serde(default)]
    pub role: Role,
    /// The [`Part`]s of the message.
    #[serde(default)]
    pub parts: Vec<Part<'a>>,
}

impl Message<'_> {
    /// Text of the first [`Part`], if any.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().map(|part| part.text.as_ref())
    }
}

impl<'a, T> From<(Role, T)> for Message<'a>
where
    T: Into<Part<'a>>,
{
    fn from((role, text): (Role, T)) -> Self {
        Self {
            role,
            parts: vec![text.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        let message: Message = (Role::User, "Hello").into();
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({"role": "user", "parts": [{"text": "Hello"}]})
        );
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let message: Message = serde_json::from_str("{}").unwrap();
        assert_eq!(message.role, Role::User);
        assert!(message.parts.is_empty());
        assert_eq!(message.first_text(), None);

        let message: Message =
            serde_json::from_str(r#"{"role":"model","parts":[{}]}"#).unwrap();
        assert_eq!(message.role, Role::Model);
        assert_eq!(message.first_text(), Some(""));
    }

    #[test]
    fn test_owned_and_borrowed_parts() {
        let message = Message {
            role: Role::Model,
            parts: vec!["Hello, ".into(), String::from("world!").into()],
        };
        assert!(matches!(message.parts[0].text, Cow::Borrowed(_)));
        assert!(matches!(message.parts[1].text, Cow::Owned(_)));
        assert_eq!(message.first_text(), Some("Hello, "));
    }
}
