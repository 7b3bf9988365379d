//! [`Key`] is a wrapper around an OAuth2 secret: a client secret, a refresh
//! token, or a short-lived access token.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Error for when a secret is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Empty key")]
pub struct EmptyKey;

/// Stores a secret. The backing memory is zeroized on drop and the secret is
/// never written out by [`Debug`]. Use [`Key::read`] to get at the value when
/// it has to go on the wire.
///
/// [`Debug`]: std::fmt::Debug
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    inner: String,
}

impl Key {
    /// Read the key.
    pub fn read(&self) -> &str {
        &self.inner
    }

    /// Length of the key in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// A [`Key`] can't be constructed empty, but a deserialized one can be.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl TryFrom<String> for Key {
    type Error = EmptyKey;

    /// Create a new key from a string. Whitespace around the value is
    /// dropped since secrets pasted into `.env` files often carry some.
    fn try_from(mut s: String) -> Result<Self, Self::Error> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            s.zeroize();
            return Err(EmptyKey);
        }

        let inner = trimmed.to_string();
        s.zeroize();

        Ok(Self { inner })
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key(<{} bytes redacted>)", self.inner.len())
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Ok(Self { inner })
    }
}
