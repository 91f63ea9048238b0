//! Conversion between builds and shareable tokens.
//!
//! A token is the build's JSON text, UTF-8 encoded, then base64 encoded with
//! the standard padded alphabet. The result is a single line of printable
//! ASCII that survives being pasted into chat or a forum post.
//!
//! Decoding is forgiving about what pasting does to a token: ASCII whitespace
//! anywhere is dropped and missing `=` padding is accepted.

use base64::{
    Engine, alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::STANDARD,
    },
};
use derive_more::{Deref, Display};
use thiserror::Error;

use crate::repository::Build;

mod validate;

pub use validate::{UntrustedBuild, ValidationError, validate};

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Failed to serialize build: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid build string format")]
    InvalidFormat(#[source] FormatFault),
}

/// What exactly was wrong with a token that failed to decode.
#[derive(Debug, Error)]
pub enum FormatFault {
    #[error("not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("not valid build data: {0}")]
    Json(#[from] serde_json::Error),
}

/// The shareable text form of a [`Build`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Deref)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

pub fn encode(build: &Build) -> Result<Token, EncodeError> {
    let json = serde_json::to_string(build)?;

    Ok(Token(STANDARD.encode(json.as_bytes())))
}

/// Decode a token straight into a [`Build`], requiring the exact build shape.
///
/// A `modified` earlier than `created` is raised to `created`.
pub fn decode(token: &str) -> Result<Build, DecodeError> {
    let text = decode_text(token)?;

    serde_json::from_str::<Build>(&text)
        .map(Build::clamped)
        .map_err(|e| DecodeError::InvalidFormat(e.into()))
}

/// Decode a token into untyped data, to be checked with [`validate`] before use.
pub fn decode_payload(token: &str) -> Result<UntrustedBuild, DecodeError> {
    let text = decode_text(token)?;

    serde_json::from_str(&text)
        .map(UntrustedBuild::new)
        .map_err(|e| DecodeError::InvalidFormat(e.into()))
}

fn decode_text(token: &str) -> Result<String, DecodeError> {
    let compact: String = token.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT
        .decode(compact)
        .map_err(|e| DecodeError::InvalidFormat(e.into()))?;

    String::from_utf8(bytes).map_err(|e| DecodeError::InvalidFormat(e.into()))
}
