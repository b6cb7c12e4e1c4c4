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

//! Colour, edge and texture features with a weighted cosine comparator

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::raster::Rasterizer;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Side length features are extracted at
pub const FEATURE_SIZE: u32 = 256;

/// Histogram bins per colour channel
pub const COLOR_BINS: usize = 16;

/// Bins in the edge-magnitude histogram
pub const EDGE_BINS: usize = 10;

const SOBEL_X: [f64; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f64; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Content features of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// 16 bins per channel, R then G then B, each channel summing to ~1
    pub color_histogram: Vec<f64>,

    /// 10 Sobel magnitude bins summing to ~1
    pub edge_histogram: Vec<f64>,

    /// Mean and standard deviation of luminance, both divided by 255
    pub texture_features: Vec<f64>,
}

/// Extracts [`FeatureVector`]s from pixel buffers
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Extractor with the default bin and grid layout
    pub fn new() -> Self {
        FeatureExtractor
    }

    /// Decode `bytes` at 256x256 and extract features
    pub fn extract_bytes<R: Rasterizer + ?Sized>(&self, rasterizer: &R, bytes: &[u8]) -> Result<FeatureVector> {
        let buffer = rasterizer.decode(bytes, Some(FEATURE_SIZE), Some(FEATURE_SIZE))?;
        Ok(self.extract(&buffer))
    }

    /// Extract features, resampling to 256x256 first when needed
    #[instrument(skip(self, buffer), fields(width = buffer.width(), height = buffer.height()))]
    pub fn extract(&self, buffer: &PixelBuffer) -> FeatureVector {
        let buffer = buffer.resampled(FEATURE_SIZE, FEATURE_SIZE);
        let luma = buffer.luminance_plane();

        let features = FeatureVector {
            color_histogram: color_histogram(&buffer),
            edge_histogram: edge_histogram(&luma, buffer.width() as usize, buffer.height() as usize),
            texture_features: texture_features(&luma),
        };
        debug!("Extracted features: texture={:?}", features.texture_features);
        features
    }
}

/// Per-channel 16-bin histograms normalised by pixel count
pub fn color_histogram(buffer: &PixelBuffer) -> Vec<f64> {
    let mut counts = vec![0u64; COLOR_BINS * 3];
    for rgb in buffer.rgb_pixels() {
        for (channel, value) in rgb.iter().enumerate() {
            counts[channel * COLOR_BINS + *value as usize / 16] += 1;
        }
    }

    let total = buffer.pixel_count() as f64;
    counts.into_iter().map(|c| c as f64 / total).collect()
}

/// Sobel magnitude histogram over interior pixels
///
/// Bins span `[0, max]` of this image's own magnitudes. A featureless image
/// puts every sample into the first bin.
pub fn edge_histogram(luma: &[f64], width: usize, height: usize) -> Vec<f64> {
    let mut histogram = vec![0.0; EDGE_BINS];
    if width < 3 || height < 3 {
        return histogram;
    }

    let mut magnitudes = Vec::with_capacity((width - 2) * (height - 2));
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let (mut gx, mut gy) = (0.0, 0.0);
            for ky in 0..3 {
                for kx in 0..3 {
                    let v = luma[(y + ky - 1) * width + (x + kx - 1)];
                    gx += v * SOBEL_X[ky * 3 + kx];
                    gy += v * SOBEL_Y[ky * 3 + kx];
                }
            }
            magnitudes.push((gx * gx + gy * gy).sqrt());
        }
    }

    let max = magnitudes.iter().copied().fold(0.0, f64::max);
    for m in &magnitudes {
        let bin = if max > 0.0 {
            ((m / max) * EDGE_BINS as f64) as usize
        } else {
            0
        };
        histogram[bin.min(EDGE_BINS - 1)] += 1.0;
    }

    let total = magnitudes.len() as f64;
    histogram.iter_mut().for_each(|h| *h /= total);
    histogram
}

/// Mean and standard deviation of luminance, each divided by 255
pub fn texture_features(luma: &[f64]) -> Vec<f64> {
    if luma.is_empty() {
        return vec![0.0, 0.0];
    }
    let n = luma.len() as f64;
    let mean = luma.iter().sum::<f64>() / n;
    let variance = luma.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    vec![mean / 255.0, variance.sqrt() / 255.0]
}

/// Cosine of the angle between two vectors
///
/// Zero when either vector has no magnitude or the lengths differ.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Per-feature weights for [`FeatureComparator`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    /// Weight of the color histogram
    pub color: f64,
    /// Weight of the edge histogram
    pub edge: f64,
    /// Weight of the texture descriptors
    pub texture: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        SimilarityWeights {
            color: 0.4,
            edge: 0.4,
            texture: 0.2,
        }
    }
}

/// Weighted cosine similarity between feature vectors
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureComparator {
    weights: SimilarityWeights,
}

impl FeatureComparator {
    /// Comparator with 0.4 / 0.4 / 0.2 weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Comparator with caller-supplied weights
    pub fn with_weights(weights: SimilarityWeights) -> Self {
        FeatureComparator { weights }
    }

    /// Weighted similarity, practically within [0, 1]
    pub fn compare(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        self.weights.color * cosine_similarity(&a.color_histogram, &b.color_histogram)
            + self.weights.edge * cosine_similarity(&a.edge_histogram, &b.edge_histogram)
            + self.weights.texture * cosine_similarity(&a.texture_features, &b.texture_features)
    }

    /// Candidate indices with their similarity to `query`, most similar first
    pub fn rank(&self, query: &FeatureVector, candidates: &[FeatureVector]) -> Vec<(usize, f64)> {
        let mut scored: Vec<(usize, f64)> = candidates
            .iter()
            .enumerate()
            .map(|(idx, candidate)| (idx, self.compare(query, candidate)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PixelBuffer {
        let samples = (0..width * height)
            .flat_map(|_| [rgb[0], rgb[1], rgb[2], 255])
            .collect();
        PixelBuffer::from_rgba(width, height, samples).unwrap()
    }

    fn stripes(width: u32, height: u32) -> PixelBuffer {
        let samples = (0..width * height)
            .flat_map(|i| {
                let v = if (i % width) / 4 % 2 == 0 { 0 } else { 255 };
                [v, v, v, 255]
            })
            .collect();
        PixelBuffer::from_rgba(width, height, samples).unwrap()
    }

    #[test]
    fn test_cosine_proportional_vectors() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_mismatch_and_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_feature_shapes() {
        let f = FeatureExtractor::new().extract(&stripes(300, 200));
        assert_eq!(f.color_histogram.len(), 48);
        assert_eq!(f.edge_histogram.len(), 10);
        assert_eq!(f.texture_features.len(), 2);
    }

    #[test]
    fn test_histograms_normalised() {
        let f = FeatureExtractor::new().extract(&stripes(256, 256));
        for channel in f.color_histogram.chunks(COLOR_BINS) {
            assert!((channel.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
        assert!((f.edge_histogram.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(f.color_histogram.iter().chain(&f.edge_histogram).all(|v| *v >= 0.0));
    }

    #[test]
    fn test_solid_colour_features() {
        let f = FeatureExtractor::new().extract(&solid(256, 256, [200, 40, 0]));
        assert_eq!(f.color_histogram[200 / 16], 1.0);
        assert_eq!(f.color_histogram[COLOR_BINS + 40 / 16], 1.0);
        assert_eq!(f.color_histogram[2 * COLOR_BINS], 1.0);
        assert_eq!(f.edge_histogram[0], 1.0);
        assert!(f.texture_features[1].abs() < 1e-9);
    }

    #[test]
    fn test_compare_identical_is_one() {
        let f = FeatureExtractor::new().extract(&stripes(256, 256));
        let sim = FeatureComparator::new().compare(&f, &f);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_orders_by_similarity() {
        let extractor = FeatureExtractor::new();
        let query = extractor.extract(&stripes(256, 256));
        let candidates = vec![
            extractor.extract(&solid(256, 256, [10, 200, 30])),
            query.clone(),
        ];
        let ranked = FeatureComparator::new().rank(&query, &candidates);
        assert_eq!(ranked[0].0, 1);
        assert!(ranked[0].1 >= ranked[1].1);
    }
}
