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

//! One-stop analysis of uploaded artwork
//!
//! [`ArtworkAnalyzer`] decodes each image at the resolution every engine
//! expects and runs the requested checks. Fingerprint and feature failures
//! propagate; screenshot scoring falls back to a negative verdict.

use crate::error::Result;
use crate::features::{FeatureComparator, FeatureExtractor, FeatureVector, SimilarityWeights};
use crate::matcher::{ArtworkRecord, HammingMatcher, MatchResult, MatchThresholds};
use crate::phash::{PerceptualHash, PerceptualHashEngine};
use crate::raster::Rasterizer;
use crate::screenshot::{ScreenshotConfig, ScreenshotDetector, ScreenshotVerdict};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Tunables for every engine the analyzer drives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Hamming bounds for duplicate matching
    pub matching: MatchThresholds,
    /// Per-component similarity weights
    pub similarity: SimilarityWeights,
    /// Screenshot scoring configuration
    pub screenshot: ScreenshotConfig,
}

/// Everything known about one image
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    /// Fingerprint of the upload
    pub hash: PerceptualHash,
    /// Closest corpus entry within the moderate bound
    pub duplicate: Option<MatchResult<'a>>,
    /// Color, edge and texture features
    pub features: FeatureVector,
    /// Screenshot verdict
    pub screenshot: ScreenshotVerdict,
}

/// Runs the analysis engines over raw image bytes
#[derive(Debug)]
pub struct ArtworkAnalyzer<R> {
    rasterizer: R,
    hasher: PerceptualHashEngine,
    matcher: HammingMatcher,
    extractor: FeatureExtractor,
    comparator: FeatureComparator,
    detector: ScreenshotDetector,
}

impl<R: Rasterizer> ArtworkAnalyzer<R> {
    /// Analyzer with default settings
    pub fn new(rasterizer: R) -> Self {
        Self::with_settings(rasterizer, AnalysisSettings::default())
    }

    /// Analyzer with explicit settings
    pub fn with_settings(rasterizer: R, settings: AnalysisSettings) -> Self {
        ArtworkAnalyzer {
            rasterizer,
            hasher: PerceptualHashEngine::new(),
            matcher: HammingMatcher::with_thresholds(settings.matching),
            extractor: FeatureExtractor::new(),
            comparator: FeatureComparator::with_weights(settings.similarity),
            detector: ScreenshotDetector::with_config(settings.screenshot),
        }
    }

    /// Matcher used for duplicate lookups
    pub fn matcher(&self) -> &HammingMatcher {
        &self.matcher
    }

    /// Comparator used for feature similarity
    pub fn comparator(&self) -> &FeatureComparator {
        &self.comparator
    }

    /// Perceptual fingerprint of an image
    pub fn fingerprint(&self, bytes: &[u8]) -> Result<PerceptualHash> {
        self.hasher.hash_bytes(&self.rasterizer, bytes)
    }

    /// Content features of an image
    pub fn features(&self, bytes: &[u8]) -> Result<FeatureVector> {
        self.extractor.extract_bytes(&self.rasterizer, bytes)
    }

    /// Screenshot verdict; never fails
    pub fn screenshot(&self, bytes: &[u8]) -> ScreenshotVerdict {
        self.detector.detect_bytes(&self.rasterizer, bytes)
    }

    /// Closest near-duplicate of an image within `corpus`
    pub fn find_duplicate<'a>(
        &self,
        bytes: &[u8],
        corpus: &'a [ArtworkRecord],
    ) -> Result<Option<MatchResult<'a>>> {
        let hash = self.fingerprint(bytes)?;
        Ok(self.matcher.search(&hash, corpus))
    }

    /// Full report for an image
    #[instrument(skip(self, bytes, corpus), fields(size = bytes.len(), corpus_size = corpus.len()))]
    pub fn analyze<'a>(&self, bytes: &[u8], corpus: &'a [ArtworkRecord]) -> Result<AnalysisReport<'a>> {
        let hash = self.fingerprint(bytes)?;
        let features = self.features(bytes)?;
        let duplicate = self.matcher.search(&hash, corpus);
        let screenshot = self.screenshot(bytes);

        info!(
            "Analyzed {}: duplicate={}, screenshot={} ({:.2})",
            hash,
            duplicate.as_ref().map_or("none", |m| m.artwork.id.as_str()),
            screenshot.is_screenshot,
            screenshot.confidence
        );

        Ok(AnalysisReport {
            hash,
            duplicate,
            features,
            screenshot,
        })
    }

    /// Weighted feature similarity of two images
    pub fn similarity(&self, a: &[u8], b: &[u8]) -> Result<f64> {
        Ok(self.comparator.compare(&self.features(a)?, &self.features(b)?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::error::MediaError;

    /// Rasterizer that hands out a fixed buffer, or fails
    struct FixedRasterizer(Option<PixelBuffer>);

    impl Rasterizer for FixedRasterizer {
        fn decode(&self, _: &[u8], w: Option<u32>, h: Option<u32>) -> Result<PixelBuffer> {
            let buf = self
                .0
                .clone()
                .ok_or_else(|| MediaError::DecodeError("corrupt".to_string()))?;
            Ok(match (w, h) {
                (Some(w), Some(h)) => buf.resampled(w, h),
                _ => buf,
            })
        }
    }

    fn diagonal() -> PixelBuffer {
        let samples = (0..64u32 * 64)
            .flat_map(|i| {
                let v = ((i % 64 + i / 64) * 2) as u8;
                [v, 255 - v, 128, 255]
            })
            .collect();
        PixelBuffer::from_rgba(64, 64, samples).unwrap()
    }

    #[test]
    fn test_analyze_finds_own_fingerprint() {
        let analyzer = ArtworkAnalyzer::new(FixedRasterizer(Some(diagonal())));
        let hash = analyzer.fingerprint(b"img").unwrap();
        let corpus = vec![ArtworkRecord {
            id: "art-1".to_string(),
            perceptual_hash: Some(hash.to_string()),
            title: "Diagonal".to_string(),
            owner_id: "u1".to_string(),
        }];

        let report = analyzer.analyze(b"img", &corpus).unwrap();
        let dup = report.duplicate.unwrap();
        assert_eq!(dup.artwork.id, "art-1");
        assert_eq!(dup.distance, 0);
        assert_eq!(dup.confidence, 1.0);
    }

    #[test]
    fn test_failures_propagate_except_screenshot() {
        let analyzer = ArtworkAnalyzer::new(FixedRasterizer(None));
        assert!(matches!(analyzer.fingerprint(b"x"), Err(MediaError::DecodeError(_))));
        assert!(analyzer.features(b"x").is_err());
        assert!(analyzer.analyze(b"x", &[]).is_err());
        assert_eq!(analyzer.screenshot(b"x"), ScreenshotVerdict::unable());
    }

    #[test]
    fn test_self_similarity() {
        let analyzer = ArtworkAnalyzer::new(FixedRasterizer(Some(diagonal())));
        let sim = analyzer.similarity(b"a", b"a").unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }
}
