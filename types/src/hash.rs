//! SHA-256 content digests of submitted evidence files.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// A SHA-256 digest rendered as 64 lowercase hexadecimal characters.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Length of the hex rendering of a SHA-256 digest.
    pub const HEX_LEN: usize = 64;

    /// Hash raw file contents.
    pub fn of_bytes(contents: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(contents)))
    }

    /// Parse a hex digest. Either case is accepted; the stored form is lowercase.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        if trimmed.len() != Self::HEX_LEN {
            return Err(TypesError::InvalidHash(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LEN,
                trimmed.len()
            )));
        }
        hex::decode(trimmed)
            .map_err(|e| TypesError::InvalidHash(format!("not hexadecimal: {e}")))?;
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", &self.0[..8])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for ContentHash {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ContentHash {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}
