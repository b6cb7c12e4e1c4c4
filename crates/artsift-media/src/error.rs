// artsift - Originality screening for artwork uploads
// Copyright (C) 2026 artsift Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Error types for fingerprinting and image analysis

use thiserror::Error;

/// Image analysis errors
///
/// Incomparable inputs (hashes of different length, feature vectors of
/// different shape) are not errors: they surface as sentinel values from
/// the distance and similarity functions instead.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The image bytes could not be decoded
    #[error("Image decode error: {0}")]
    DecodeError(String),

    /// No usable sampling surface could be produced
    #[error("Image render error: {0}")]
    RenderError(String),

    /// A fingerprint string is not 16 hexadecimal characters
    #[error("Invalid perceptual hash: {0}")]
    InvalidHash(String),
}

impl MediaError {
    /// Whether this error came from the rasterization stage
    pub fn is_rasterization(&self) -> bool {
        matches!(self, MediaError::DecodeError(_) | MediaError::RenderError(_))
    }
}

impl From<image::ImageError> for MediaError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Limits(e) => MediaError::RenderError(e.to_string()),
            image::ImageError::Parameter(e) => MediaError::RenderError(e.to_string()),
            other => MediaError::DecodeError(other.to_string()),
        }
    }
}

/// Result type for media operations
pub type Result<T> = std::result::Result<T, MediaError>;
