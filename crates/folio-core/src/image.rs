//! Encoded image payloads.
//!
//! Project images travel as `data:` URLs (`data:image/png;base64,...`), the
//! same form a browser file reader produces. The core only checks that a
//! payload is present; the rules below mirror the admin upload widget.

use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ImageError;

/// Upload limit for raw image bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An encoded image, opaque to storage.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    /// Encode raw image bytes as a base64 `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] if `mime` is not `image/*`, the bytes are empty,
    /// or they exceed [`MAX_IMAGE_BYTES`].
    pub fn encode(bytes: &[u8], mime: &str) -> Result<Self, ImageError> {
        if !mime.starts_with("image/") {
            return Err(ImageError::NotAnImage {
                mime: mime.to_string(),
            });
        }
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        Ok(Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
    }

    /// Wrap an already-encoded payload (a `data:` URL or a plain image URL,
    /// as the seed projects use).
    #[must_use]
    pub fn from_encoded(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// MIME type of a `data:` URL payload, if it is one.
    #[must_use]
    pub fn mime(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end])
    }
}

// Payloads run to megabytes; keep debug output readable.
impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("mime", &self.mime())
            .field("len", &self.0.len())
            .finish()
    }
}

/// Guess an image MIME type from a file extension.
#[must_use]
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}
