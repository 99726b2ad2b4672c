//! Validation and payload error types for Folio.
//!
//! Domain-specific errors (`StoreError`, `RemoteError`, `AuthError`) are
//! defined in their respective crates. The CLI converges them through
//! `anyhow`.

use thiserror::Error;

use crate::enums::Field;

/// A submitted form field violated one of its rules.
///
/// `reason` is the user-facing message shown inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// An image could not be turned into an encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The MIME type is not an `image/*` type.
    #[error("not an image file: {mime}")]
    NotAnImage { mime: String },

    /// The raw image exceeds the upload limit.
    #[error("image is too large ({size} bytes); maximum is {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// The image has no bytes at all.
    #[error("image is empty")]
    Empty,
}
