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

//! Perceptual hashing for near-duplicate artwork detection
//!
//! The fingerprint is a 64-bit DCT hash:
//!
//! 1. Resample to a 32x32 BT.601 luminance grid.
//! 2. Take the 8x8 lowest-frequency DCT-II coefficients.
//! 3. Threshold every coefficient against the value at index 32 of the
//!    sorted non-DC coefficients.
//! 4. Emit one bit per coefficient, most significant first.
//!
//! The threshold index is derived from the full 64-coefficient count while
//! the sorted list only holds the 63 AC terms. Stored fingerprints depend on
//! this, so it must stay as is.
//!
//! # Example
//!
//! ```rust,no_run
//! use artsift_media::{ImageRasterizer, PerceptualHashEngine};
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = PerceptualHashEngine::new();
//! let raster = ImageRasterizer::new();
//!
//! let hash1 = engine.hash_bytes(&raster, &std::fs::read("a.png")?)?;
//! let hash2 = engine.hash_bytes(&raster, &std::fs::read("b.png")?)?;
//!
//! println!("{} vs {}: {} bits apart", hash1, hash2, hash1.distance(&hash2));
//! # Ok(())
//! # }
//! ```

use crate::buffer::PixelBuffer;
use crate::error::{MediaError, Result};
use crate::raster::Rasterizer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Side of the luminance grid the DCT runs over
pub const GRID_SIZE: u32 = 32;

/// Side of the retained low-frequency coefficient block
pub const COEFF_SIZE: usize = 8;

/// Number of bits in a fingerprint
pub const HASH_BITS: u32 = 64;

/// Number of hex characters in a serialized fingerprint
pub const HASH_HEX_LEN: usize = 16;

/// 64-bit perceptual fingerprint
///
/// Serialized as 16 lowercase hex characters, most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PerceptualHash(u64);

impl PerceptualHash {
    /// Wrap raw fingerprint bits
    pub fn from_bits(bits: u64) -> Self {
        PerceptualHash(bits)
    }

    /// Raw fingerprint bits
    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Number of differing bits (0..=64)
    pub fn distance(&self, other: &PerceptualHash) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// 64-character binary expansion, most significant bit first
    pub fn to_bit_string(&self) -> String {
        format!("{:064b}", self.0)
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0.to_be_bytes()))
    }
}

impl FromStr for PerceptualHash {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != HASH_HEX_LEN {
            return Err(MediaError::InvalidHash(format!(
                "expected {} hex characters, got {}",
                HASH_HEX_LEN,
                s.len()
            )));
        }
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| MediaError::InvalidHash(format!("{}: {}", s, e)))?;
        Ok(PerceptualHash(u64::from_be_bytes(bytes)))
    }
}

impl Serialize for PerceptualHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PerceptualHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Bit distance between two hex-encoded fingerprints
///
/// Returns `u32::MAX` when the strings differ in length or are not valid
/// hex, so incomparable pairs never pass a distance threshold.
pub fn hex_distance(a: &str, b: &str) -> u32 {
    if a.len() != b.len() {
        return u32::MAX;
    }

    match (hex::decode(a), hex::decode(b)) {
        (Ok(a), Ok(b)) => a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum(),
        _ => u32::MAX,
    }
}

/// Computes DCT fingerprints from pixel buffers
#[derive(Debug, Clone)]
pub struct PerceptualHashEngine {
    /// `cos((2x+1)uπ/64)` for u in 0..8, x in 0..32
    cosines: Vec<[f64; GRID_SIZE as usize]>,
}

impl PerceptualHashEngine {
    /// Create an engine with a precomputed cosine table
    pub fn new() -> Self {
        let n = GRID_SIZE as f64;
        let cosines = (0..COEFF_SIZE)
            .map(|u| {
                let mut row = [0.0; GRID_SIZE as usize];
                for (x, slot) in row.iter_mut().enumerate() {
                    *slot = ((2.0 * x as f64 + 1.0) * u as f64 * PI / (2.0 * n)).cos();
                }
                row
            })
            .collect();
        PerceptualHashEngine { cosines }
    }

    /// Decode `bytes` at 32x32 and fingerprint the result
    pub fn hash_bytes<R: Rasterizer + ?Sized>(&self, rasterizer: &R, bytes: &[u8]) -> Result<PerceptualHash> {
        let buffer = rasterizer.decode(bytes, Some(GRID_SIZE), Some(GRID_SIZE))?;
        Ok(self.compute_hash(&buffer))
    }

    /// Fingerprint a pixel buffer
    ///
    /// Buffers of any other size are resampled to 32x32 first.
    #[instrument(skip(self, buffer), fields(width = buffer.width(), height = buffer.height()))]
    pub fn compute_hash(&self, buffer: &PixelBuffer) -> PerceptualHash {
        let start = Instant::now();

        let grid = buffer.resampled(GRID_SIZE, GRID_SIZE).luminance_plane();
        let coefficients = self.low_frequency_dct(&grid);
        let hash = PerceptualHash(threshold_bits(&coefficients));

        debug!("Computed perceptual hash {} in {:?}", hash, start.elapsed());
        hash
    }

    /// 8x8 DCT-II coefficients over the 32x32 grid, row-major in (u, v)
    ///
    /// `grid` is row-major, so `grid[y * 32 + x]` is gray(x, y).
    fn low_frequency_dct(&self, grid: &[f64]) -> [f64; COEFF_SIZE * COEFF_SIZE] {
        let side = GRID_SIZE as usize;
        let mut out = [0.0; COEFF_SIZE * COEFF_SIZE];

        for u in 0..COEFF_SIZE {
            for v in 0..COEFF_SIZE {
                let mut sum = 0.0;
                for x in 0..side {
                    let cu = self.cosines[u][x];
                    for y in 0..side {
                        sum += grid[y * side + x] * cu * self.cosines[v][y];
                    }
                }
                out[u * COEFF_SIZE + v] = scale(u) * scale(v) * sum / 4.0;
            }
        }

        out
    }
}

impl Default for PerceptualHashEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn scale(k: usize) -> f64 {
    if k == 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// Pack one bit per coefficient, set when it exceeds the AC median
fn threshold_bits(coefficients: &[f64; COEFF_SIZE * COEFF_SIZE]) -> u64 {
    let mut ac: Vec<f64> = coefficients[1..].to_vec();
    ac.sort_by(|a, b| a.total_cmp(b));

    // Index comes from the 64-coefficient count, not ac.len().
    let threshold = ac[coefficients.len() / 2];
    trace!("DC {:.3}, threshold {:.3}", coefficients[0], threshold);

    coefficients
        .iter()
        .fold(0u64, |acc, &c| (acc << 1) | u64::from(c > threshold))
}
