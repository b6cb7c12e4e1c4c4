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

//! Synthetic test images.
//!
//! Every generator is deterministic, so fingerprints and features computed
//! from these images are stable across runs.

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

/// Raw RGBA image with known content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA samples
    pub rgba: Vec<u8>,
}

impl SyntheticImage {
    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Self {
        let img: RgbaImage = ImageBuffer::from_fn(width, height, |x, y| {
            let [r, g, b] = f(x, y);
            Rgba([r, g, b, 255])
        });
        SyntheticImage {
            width,
            height,
            rgba: img.into_raw(),
        }
    }

    /// Encode as PNG bytes.
    pub fn png(&self) -> Vec<u8> {
        self.encode(ImageFormat::Png)
    }

    /// Encode in the given format.
    ///
    /// Panics if the encoder rejects the image; fixtures are always valid.
    pub fn encode(&self, format: ImageFormat) -> Vec<u8> {
        let img = RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .expect("fixture dimensions match sample count");
        let mut out = Vec::new();
        let result = if format == ImageFormat::Jpeg {
            image::DynamicImage::ImageRgba8(img)
                .to_rgb8()
                .write_to(&mut Cursor::new(&mut out), format)
        } else {
            img.write_to(&mut Cursor::new(&mut out), format)
        };
        result.expect("fixture encodes");
        out
    }

    /// Write as PNG into `dir` and return the path.
    pub fn write_png(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, self.png())?;
        Ok(path)
    }
}

/// Synthetic image generators.
pub struct TestFixtures;

impl TestFixtures {
    /// Single flat colour.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> SyntheticImage {
        SyntheticImage::from_fn(width, height, |_, _| rgb)
    }

    /// One-pixel black/white checkerboard: two colours, maximal edges.
    pub fn checkerboard(width: u32, height: u32) -> SyntheticImage {
        SyntheticImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                [0, 0, 0]
            } else {
                [255, 255, 255]
            }
        })
    }

    /// Smooth two-axis gradient where every pixel has a unique colour
    /// (for sides up to 64).
    pub fn gradient(width: u32, height: u32) -> SyntheticImage {
        SyntheticImage::from_fn(width, height, |x, y| {
            [(x * 4 % 256) as u8, (y * 4 % 256) as u8, ((x + y) * 2 % 256) as u8]
        })
    }

    /// Painting-like image: overlapping soft bands of colour.
    pub fn artwork(width: u32, height: u32) -> SyntheticImage {
        let (w, h) = (width.max(1) as f64, height.max(1) as f64);
        SyntheticImage::from_fn(width, height, |x, y| {
            let (fx, fy) = (x as f64 / w, y as f64 / h);
            let r = 128.0 + 100.0 * (fx * 6.0).sin() * (fy * 3.0).cos();
            let g = 128.0 + 90.0 * (fy * 5.0 + fx).sin();
            let b = 128.0 + 80.0 * ((fx - fy) * 4.0).cos();
            [r as u8, g as u8, b as u8]
        })
    }

    /// Horizontally mirrored copy of an image.
    pub fn mirrored(image: &SyntheticImage) -> SyntheticImage {
        let w = image.width;
        SyntheticImage::from_fn(w, image.height, |x, y| {
            let i = ((y * w + (w - 1 - x)) * 4) as usize;
            [image.rgba[i], image.rgba[i + 1], image.rgba[i + 2]]
        })
    }

    /// Bytes that no decoder accepts.
    pub fn corrupt_bytes() -> Vec<u8> {
        b"\x89PNG but not really an image".to_vec()
    }
}
