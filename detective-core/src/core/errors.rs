//! Error types for explicit single-format decoding
//!
//! Auto-detection never surfaces these: the classifier and engine
//! recover codec failures locally (score 0, or try the next
//! candidate). Only a caller that names a format gets a typed error.

use crate::core::models::FormatKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid {format} character: '{character}'")]
    InvalidCharacter { format: FormatKind, character: char },

    #[error("malformed {format} length: {detail}")]
    MalformedLength { format: FormatKind, detail: String },

    #[error("{format} decoded to bytes that are not valid UTF-8 text")]
    NotText { format: FormatKind },

    #[error("input is not decodable as {format}")]
    NotDecodable { format: FormatKind },
}

impl DecodeError {
    pub fn malformed_length(format: FormatKind, detail: impl Into<String>) -> Self {
        DecodeError::MalformedLength {
            format,
            detail: detail.into(),
        }
    }
}
