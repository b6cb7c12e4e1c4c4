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

//! Decoded RGBA pixel buffers

use crate::error::{MediaError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// BT.601 luma weights
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Immutable RGBA image produced by a [`Rasterizer`](crate::raster::Rasterizer)
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Build a buffer from raw RGBA samples in row-major order
    pub fn from_rgba(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MediaError::RenderError(format!(
                "cannot sample a {}x{} surface",
                width, height
            )));
        }

        let expected = width as usize * height as usize * 4;
        if samples.len() != expected {
            return Err(MediaError::RenderError(format!(
                "expected {} RGBA samples for {}x{}, got {}",
                expected,
                width,
                height,
                samples.len()
            )));
        }

        RgbaImage::from_raw(width, height, samples)
            .map(|image| PixelBuffer { image })
            .ok_or_else(|| MediaError::RenderError("sample buffer rejected".to_string()))
    }

    /// Convert a decoded image into an RGBA buffer
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let rgba = image.to_rgba8();
        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(MediaError::RenderError("decoded image is empty".to_string()));
        }
        Ok(PixelBuffer { image: rgba })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }

    /// RGB triple at (x, y), alpha ignored
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let p = self.image.get_pixel(x, y).0;
        [p[0], p[1], p[2]]
    }

    /// BT.601 luminance at (x, y)
    pub fn luminance(&self, x: u32, y: u32) -> f64 {
        let [r, g, b] = self.rgb(x, y);
        luma(r, g, b)
    }

    /// Row-major luminance plane for the whole buffer
    pub fn luminance_plane(&self) -> Vec<f64> {
        self.image
            .pixels()
            .map(|p| luma(p.0[0], p.0[1], p.0[2]))
            .collect()
    }

    /// Iterate over the RGB triples in row-major order
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.image.pixels().map(|p| [p.0[0], p.0[1], p.0[2]])
    }

    /// Resample to exactly `width`x`height`
    ///
    /// Returns a plain copy when the buffer already has that size.
    pub fn resampled(&self, width: u32, height: u32) -> PixelBuffer {
        if self.width() == width && self.height() == height {
            return self.clone();
        }
        PixelBuffer {
            image: imageops::resize(&self.image, width, height, FilterType::Triangle),
        }
    }

    /// Borrow the underlying image
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}

fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}
