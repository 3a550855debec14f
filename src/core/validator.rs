//! Tracking identifier validation
//!
//! A tracking identifier ("BTT") is 3 to 50 characters of `[A-Za-z0-9_-]`.
//! Rules are checked in order and the first failure wins.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Minimum identifier length in characters
pub const MIN_IDENTIFIER_LEN: usize = 3;

/// Maximum identifier length in characters
pub const MAX_IDENTIFIER_LEN: usize = 50;

/// Reason a token was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidIdentifier {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier is too short ({len} < 3 characters)")]
    TooShort { len: usize },

    #[error("identifier is too long ({len} > 50 characters)")]
    TooLong { len: usize },

    #[error("identifier contains illegal character {ch:?} at position {position}")]
    IllegalCharacter { ch: char, position: usize },
}

/// A validated tracking identifier. Only constructible through [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackingIdentifier(String);

impl TrackingIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrackingIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for TrackingIdentifier {
    type Error = InvalidIdentifier;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        validate(token)
    }
}

impl std::str::FromStr for TrackingIdentifier {
    type Err = InvalidIdentifier;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        validate(token)
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Validate a raw token. Pure; never trims or otherwise coerces its input.
pub fn validate(token: &str) -> Result<TrackingIdentifier, InvalidIdentifier> {
    if token.is_empty() {
        return Err(InvalidIdentifier::Empty);
    }

    let len = token.chars().count();
    if len < MIN_IDENTIFIER_LEN {
        return Err(InvalidIdentifier::TooShort { len });
    }
    if len > MAX_IDENTIFIER_LEN {
        return Err(InvalidIdentifier::TooLong { len });
    }

    if let Some((position, ch)) = token.chars().enumerate().find(|(_, c)| !is_identifier_char(*c))
    {
        return Err(InvalidIdentifier::IllegalCharacter { ch, position });
    }

    Ok(TrackingIdentifier(token.to_string()))
}
