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

//! Rasterization port: image bytes to pixel buffers
//!
//! The analysis engines never decode images themselves. Callers hand them
//! a [`PixelBuffer`] produced by a [`Rasterizer`], which keeps the core free
//! of any particular codec or drawing surface.

use crate::buffer::PixelBuffer;
use crate::error::{MediaError, Result};
use image::imageops::FilterType;
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Decodes image bytes into a pixel buffer, optionally resampled
pub trait Rasterizer: Send + Sync {
    /// Decode `bytes`, resampling to the requested size when given
    ///
    /// With only one target dimension the other follows the source aspect
    /// ratio. Without either, the buffer keeps its native resolution.
    fn decode(
        &self,
        bytes: &[u8],
        target_width: Option<u32>,
        target_height: Option<u32>,
    ) -> Result<PixelBuffer>;
}

/// Image formats the bundled rasterizer accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportedImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
    /// Graphics Interchange Format
    Gif,
    /// Windows bitmap
    Bmp,
    /// Tagged Image File Format
    Tiff,
    /// WebP
    WebP,
}

impl SupportedImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }
}

/// [`Rasterizer`] backed by the `image` crate
#[derive(Debug, Clone, Copy)]
pub struct ImageRasterizer {
    filter: FilterType,
}

impl ImageRasterizer {
    /// Rasterizer using triangle (bilinear) resampling
    pub fn new() -> Self {
        ImageRasterizer {
            filter: FilterType::Triangle,
        }
    }

    /// Rasterizer with a specific resampling filter
    pub fn with_filter(filter: FilterType) -> Self {
        ImageRasterizer { filter }
    }
}

impl Default for ImageRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ImageRasterizer {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    fn decode(
        &self,
        bytes: &[u8],
        target_width: Option<u32>,
        target_height: Option<u32>,
    ) -> Result<PixelBuffer> {
        if target_width == Some(0) || target_height == Some(0) {
            return Err(MediaError::RenderError(format!(
                "cannot render into a {}x{} surface",
                target_width.unwrap_or_default(),
                target_height.unwrap_or_default()
            )));
        }

        let img = image::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        debug!("Decoded {}x{} image", width, height);

        let (out_w, out_h) = match (target_width, target_height) {
            (None, None) => return PixelBuffer::from_image(&img),
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, scaled(height, w, width)),
            (None, Some(h)) => (scaled(width, h, height), h),
        };

        PixelBuffer::from_image(&img.resize_exact(out_w, out_h, self.filter))
    }
}

/// `value * numerator / denominator`, rounded and never below one pixel
fn scaled(value: u32, numerator: u32, denominator: u32) -> u32 {
    let out = (value as f64 * numerator as f64 / denominator.max(1) as f64).round();
    (out as u32).max(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 5) as u8, 90, 255])
        });
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_native_decode() {
        let buf = ImageRasterizer::new()
            .decode(&png_bytes(20, 10), None, None)
            .unwrap();
        assert_eq!((buf.width(), buf.height()), (20, 10));
    }

    #[test]
    fn test_targeted_decode() {
        let r = ImageRasterizer::new();
        let bytes = png_bytes(20, 10);

        let exact = r.decode(&bytes, Some(32), Some(32)).unwrap();
        assert_eq!((exact.width(), exact.height()), (32, 32));

        let by_width = r.decode(&bytes, Some(40), None).unwrap();
        assert_eq!((by_width.width(), by_width.height()), (40, 20));
    }

    #[test]
    fn test_corrupt_bytes_are_decode_errors() {
        let err = ImageRasterizer::new()
            .decode(b"definitely not an image", None, None)
            .unwrap_err();
        assert!(matches!(err, MediaError::DecodeError(_)));
    }

    #[test]
    fn test_zero_target_is_render_error() {
        let err = ImageRasterizer::new()
            .decode(&png_bytes(4, 4), Some(0), Some(8))
            .unwrap_err();
        assert!(matches!(err, MediaError::RenderError(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SupportedImageFormat::from_extension("JPG"),
            Some(SupportedImageFormat::Jpeg)
        );
        assert_eq!(SupportedImageFormat::from_extension("txt"), None);
    }
}
