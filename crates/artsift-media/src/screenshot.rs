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

//! Screenshot-likeness scoring
//!
//! Screen captures and resized UI grabs tend to share a few traits: a
//! display resolution or aspect ratio, a small palette, hard edges and
//! flat compression blocks. Each trait that fires adds its weight to a
//! score; the image is flagged once the score passes the decision
//! threshold.
//!
//! Scoring is advisory. [`ScreenshotDetector::detect_bytes`] never fails:
//! images that cannot be rasterized get [`ScreenshotVerdict::unable`].

use crate::buffer::PixelBuffer;
use crate::raster::Rasterizer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Reason reported when no signal fires
pub const NO_INDICATORS: &str = "no screenshot indicators";

/// Reason reported when the image could not be rasterized
pub const UNABLE_TO_ANALYZE: &str = "unable to analyze image";

/// A screen resolution, matched in either orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Resolution of `width` by `height`
    pub const fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }

    fn matches(&self, width: u32, height: u32) -> bool {
        (self.width == width && self.height == height)
            || (self.width == height && self.height == width)
    }
}

/// Score contribution of each signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotWeights {
    /// Exact screen resolution
    pub resolution: f64,
    /// Common screen aspect ratio
    pub aspect_ratio: f64,
    /// Extremely low color diversity
    pub low_diversity: f64,
    /// Limited palette, checked only when diversity is not extremely low
    pub limited_palette: f64,
    /// Crisp edges on the sampling grid
    pub crisp_edges: f64,
    /// High ratio of sharp pixels
    pub sharp_pixels: f64,
    /// Uniform compression blocks
    pub blockiness: f64,
}

impl Default for ScreenshotWeights {
    fn default() -> Self {
        ScreenshotWeights {
            resolution: 0.20,
            aspect_ratio: 0.15,
            low_diversity: 0.25,
            limited_palette: 0.05,
            crisp_edges: 0.15,
            sharp_pixels: 0.10,
            blockiness: 0.10,
        }
    }
}

/// Tunables for [`ScreenshotDetector`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Common display resolutions
    pub resolutions: Vec<Resolution>,

    /// Common display aspect ratios (width / height)
    pub aspect_ratios: Vec<f64>,

    /// Allowed absolute difference from an aspect ratio
    pub aspect_tolerance: f64,

    /// Unique-colour ratio below which diversity counts as extremely low
    pub low_diversity_ratio: f64,

    /// Unique-colour ratio below which the palette counts as limited
    pub limited_palette_ratio: f64,

    /// Sampling stride of the edge grid, in pixels
    pub edge_stride: u32,

    /// Mean edge strength above which edges count as crisp
    pub crisp_edge_mean: f64,

    /// Edge strength above which a sample counts as sharp
    pub sharp_pixel_strength: f64,

    /// Fraction of sharp samples needed to fire
    pub sharp_pixel_ratio: f64,

    /// Number of random blocks sampled for blockiness
    pub block_samples: u32,

    /// Block side, in pixels
    pub block_size: u32,

    /// Luminance variance below which a block counts as flat
    pub block_variance: f64,

    /// Fraction of flat blocks needed to fire
    pub blocky_ratio: f64,

    /// Score above which an image is flagged
    pub decision_threshold: f64,

    /// Signal weights
    pub weights: ScreenshotWeights,

    /// Seed for block sampling; fresh randomness per call when unset
    pub seed: Option<u64>,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        ScreenshotConfig {
            resolutions: vec![
                Resolution::new(1920, 1080),
                Resolution::new(1366, 768),
                Resolution::new(1536, 864),
                Resolution::new(1440, 900),
                Resolution::new(1280, 720),
                Resolution::new(2560, 1440),
                Resolution::new(3840, 2160),
                Resolution::new(1280, 800),
                Resolution::new(1600, 900),
            ],
            aspect_ratios: vec![16.0 / 9.0, 4.0 / 3.0, 3.0 / 2.0, 16.0 / 10.0],
            aspect_tolerance: 0.01,
            low_diversity_ratio: 0.03,
            limited_palette_ratio: 0.06,
            edge_stride: 5,
            crisp_edge_mean: 180.0,
            sharp_pixel_strength: 80.0,
            sharp_pixel_ratio: 0.25,
            block_samples: 100,
            block_size: 8,
            block_variance: 5.0,
            blocky_ratio: 0.35,
            decision_threshold: 0.70,
            weights: ScreenshotWeights::default(),
            seed: None,
        }
    }
}

/// Outcome of screenshot scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotVerdict {
    /// Whether the score passed the decision threshold
    pub is_screenshot: bool,

    /// `min(1, score)`
    pub confidence: f64,

    /// Raw accumulated score
    pub score: f64,

    /// Triggered signals in evaluation order, or a single placeholder
    pub reasons: Vec<String>,
}

impl ScreenshotVerdict {
    /// Negative verdict used when the image could not be rasterized
    pub fn unable() -> Self {
        ScreenshotVerdict {
            is_screenshot: false,
            confidence: 0.0,
            score: 0.0,
            reasons: vec![UNABLE_TO_ANALYZE.to_string()],
        }
    }

    /// Reasons joined for display
    pub fn reason(&self) -> String {
        self.reasons.join(", ")
    }
}

/// Edge statistics on the sampling grid
struct EdgeStats {
    mean: f64,
    sharp_ratio: f64,
}

/// Multi-signal screenshot scorer
#[derive(Debug, Clone, Default)]
pub struct ScreenshotDetector {
    config: ScreenshotConfig,
}

impl ScreenshotDetector {
    /// Detector with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with an explicit configuration
    pub fn with_config(config: ScreenshotConfig) -> Self {
        ScreenshotDetector { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ScreenshotConfig {
        &self.config
    }

    /// Decode `bytes` at native resolution and score them
    ///
    /// Decode or render failures yield [`ScreenshotVerdict::unable`].
    pub fn detect_bytes<R: Rasterizer + ?Sized>(&self, rasterizer: &R, bytes: &[u8]) -> ScreenshotVerdict {
        match rasterizer.decode(bytes, None, None) {
            Ok(buffer) => self.detect(&buffer, buffer.width(), buffer.height()),
            Err(e) => {
                warn!("Screenshot scoring skipped: {}", e);
                ScreenshotVerdict::unable()
            }
        }
    }

    /// Score `buffer`, treating `width`x`height` as the original size
    ///
    /// Block positions come from a `StdRng` seeded with `config.seed` when
    /// set, otherwise from the thread RNG.
    pub fn detect(&self, buffer: &PixelBuffer, width: u32, height: u32) -> ScreenshotVerdict {
        match self.config.seed {
            Some(seed) => self.detect_with_rng(buffer, width, height, &mut StdRng::seed_from_u64(seed)),
            None => self.detect_with_rng(buffer, width, height, &mut rand::thread_rng()),
        }
    }

    /// Score `buffer` drawing block positions from `rng`
    #[instrument(skip(self, buffer, rng), fields(buffer_width = buffer.width(), buffer_height = buffer.height()))]
    pub fn detect_with_rng<G: Rng + ?Sized>(
        &self,
        buffer: &PixelBuffer,
        width: u32,
        height: u32,
        rng: &mut G,
    ) -> ScreenshotVerdict {
        let cfg = &self.config;
        let w = &cfg.weights;
        let mut score = 0.0;
        let mut reasons = Vec::new();

        if let Some(res) = cfg.resolutions.iter().find(|r| r.matches(width, height)) {
            score += w.resolution;
            reasons.push(format!("exact screen resolution {}x{}", res.width, res.height));
        }

        if height > 0 {
            let ratio = width as f64 / height as f64;
            if cfg
                .aspect_ratios
                .iter()
                .any(|r| (ratio - r).abs() < cfg.aspect_tolerance)
            {
                score += w.aspect_ratio;
                reasons.push(format!("common screen aspect ratio {:.2}", ratio));
            }
        }

        let diversity = color_diversity(buffer);
        if diversity < cfg.low_diversity_ratio {
            score += w.low_diversity;
            reasons.push("extremely low color diversity".to_string());
        } else if diversity < cfg.limited_palette_ratio {
            score += w.limited_palette;
            reasons.push("limited color palette".to_string());
        }

        if let Some(edges) = self.edge_stats(buffer) {
            if edges.mean > cfg.crisp_edge_mean {
                score += w.crisp_edges;
                reasons.push("crisp UI-like edges".to_string());
            }
            if edges.sharp_ratio > cfg.sharp_pixel_ratio {
                score += w.sharp_pixels;
                reasons.push("high ratio of sharp pixels".to_string());
            }
        }

        if let Some(flat) = self.flat_block_ratio(buffer, rng) {
            if flat > cfg.blocky_ratio {
                score += w.blockiness;
                reasons.push("uniform compression blocks".to_string());
            }
        }

        let is_screenshot = score > cfg.decision_threshold;
        debug!(
            "Screenshot score {:.2} (diversity {:.4}) -> {}",
            score, diversity, is_screenshot
        );

        if reasons.is_empty() {
            reasons.push(NO_INDICATORS.to_string());
        }

        ScreenshotVerdict {
            is_screenshot,
            confidence: score.min(1.0),
            score,
            reasons,
        }
    }

    /// Mean and sharp ratio of `|Δx| + |Δy|` luminance on the stride grid
    fn edge_stats(&self, buffer: &PixelBuffer) -> Option<EdgeStats> {
        let (width, height) = (buffer.width(), buffer.height());
        if width < 2 || height < 2 {
            return None;
        }

        let stride = self.config.edge_stride.max(1) as usize;
        let mut total = 0.0;
        let mut sharp = 0usize;
        let mut samples = 0usize;

        for y in (0..height - 1).step_by(stride) {
            for x in (0..width - 1).step_by(stride) {
                let here = buffer.luminance(x, y);
                let strength = (here - buffer.luminance(x + 1, y)).abs()
                    + (here - buffer.luminance(x, y + 1)).abs();
                total += strength;
                if strength > self.config.sharp_pixel_strength {
                    sharp += 1;
                }
                samples += 1;
            }
        }

        Some(EdgeStats {
            mean: total / samples as f64,
            sharp_ratio: sharp as f64 / samples as f64,
        })
    }

    /// Fraction of randomly placed blocks whose luminance is nearly flat
    fn flat_block_ratio<G: Rng + ?Sized>(&self, buffer: &PixelBuffer, rng: &mut G) -> Option<f64> {
        let size = self.config.block_size;
        let samples = self.config.block_samples;
        if size == 0 || samples == 0 || buffer.width() < size || buffer.height() < size {
            return None;
        }

        let mut flat = 0u32;
        for _ in 0..samples {
            let bx = rng.gen_range(0..=buffer.width() - size);
            let by = rng.gen_range(0..=buffer.height() - size);
            if block_variance(buffer, bx, by, size) < self.config.block_variance {
                flat += 1;
            }
        }

        Some(flat as f64 / samples as f64)
    }
}

/// Unique RGB triples divided by pixel count
fn color_diversity(buffer: &PixelBuffer) -> f64 {
    let unique: HashSet<[u8; 3]> = buffer.rgb_pixels().collect();
    unique.len() as f64 / buffer.pixel_count() as f64
}

fn block_variance(buffer: &PixelBuffer, bx: u32, by: u32, size: u32) -> f64 {
    let values: Vec<f64> = (by..by + size)
        .flat_map(|y| (bx..bx + size).map(move |x| (x, y)))
        .map(|(x, y)| buffer.luminance(x, y))
        .collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
