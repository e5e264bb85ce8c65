//! Validation of untrusted image envelopes
//!
//! An envelope is a tagged string: a format marker, a `,` separator and the
//! base64-encoded image bytes (`data:image/png;base64,iVBOR...`). The tag is
//! not trusted; the decoded header decides the format.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

use crate::error::{ClassifyError, ClassifyResult};

/// Largest drawing accepted from the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl ImageLimits {
    pub const DEFAULT_MAX_WIDTH: u32 = 400;
    pub const DEFAULT_MAX_HEIGHT: u32 = 400;

    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Worst-case decoded size: 4 bytes per pixel
    pub fn max_decoded_len(&self) -> usize {
        (self.max_width as usize)
            .saturating_mul(self.max_height as usize)
            .saturating_mul(4)
    }

    /// Worst-case base64 length of [`Self::max_decoded_len`]
    pub fn max_encoded_len(&self) -> usize {
        base64_len(self.max_decoded_len())
    }
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_WIDTH, Self::DEFAULT_MAX_HEIGHT)
    }
}

/// Number of base64 characters needed for `size` bytes (padded)
fn base64_len(size: usize) -> usize {
    (size.saturating_add(2) / 3).saturating_mul(4)
}

/// A submission that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    /// Raw decoded bytes, exactly as submitted
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ValidatedImage {
    /// Fully decode the pixel data
    pub fn decode(&self) -> ClassifyResult<DynamicImage> {
        image::load_from_memory_with_format(&self.bytes, self.format)
            .map_err(|e| ClassifyError::invalid_image(e.to_string()))
    }
}

/// Check an envelope against the configured limits
///
/// The size bound is enforced on the encoded payload before any decoding
/// happens. Only the image header is inspected; pixel data is left alone.
pub fn validate(envelope: &str, limits: ImageLimits) -> ClassifyResult<ValidatedImage> {
    let (_tag, payload) = envelope
        .split_once(',')
        .ok_or(ClassifyError::MalformedEnvelope)?;

    let limit = limits.max_encoded_len();
    if payload.len() > limit {
        return Err(ClassifyError::PayloadTooLarge {
            size: payload.len(),
            limit,
        });
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| ClassifyError::EncodingError {
            message: e.to_string(),
        })?;

    let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| ClassifyError::invalid_image(e.to_string()))?;

    let format = match reader.format() {
        Some(ImageFormat::Png) => ImageFormat::Png,
        Some(other) => {
            return Err(ClassifyError::invalid_image(format!(
                "unsupported image format {other:?}"
            )))
        }
        None => return Err(ClassifyError::invalid_image("unrecognized image format")),
    };

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ClassifyError::invalid_image(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(ClassifyError::invalid_image("image has no pixels"));
    }
    if width > limits.max_width || height > limits.max_height {
        return Err(ClassifyError::invalid_image(format!(
            "{width}x{height} exceeds maximum {}x{}",
            limits.max_width, limits.max_height
        )));
    }

    Ok(ValidatedImage {
        bytes,
        format,
        width,
        height,
    })
}
