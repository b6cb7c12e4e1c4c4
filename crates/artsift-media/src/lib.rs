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

//! Content fingerprinting and originality signals for artwork uploads
//!
//! This crate provides:
//! - A rasterization port with an `image`-backed implementation
//! - 64-bit DCT perceptual hashing
//! - Hamming-distance near-duplicate search over a corpus
//! - Colour/edge/texture features and a weighted cosine comparator
//! - A multi-signal screenshot heuristic
//!
//! All engines are synchronous pure functions of their inputs and can be
//! called from any number of threads at once.

pub mod analysis;
pub mod buffer;
pub mod error;
pub mod features;
pub mod matcher;
pub mod phash;
pub mod raster;
pub mod screenshot;

// Re-export commonly used types
pub use analysis::{AnalysisReport, AnalysisSettings, ArtworkAnalyzer};
pub use buffer::PixelBuffer;
pub use error::{MediaError, Result};
pub use features::{cosine_similarity, FeatureComparator, FeatureExtractor, FeatureVector, SimilarityWeights};
pub use matcher::{ArtworkRecord, HammingMatcher, MatchKind, MatchResult, MatchThresholds};
pub use phash::{hex_distance, PerceptualHash, PerceptualHashEngine};
pub use raster::{ImageRasterizer, Rasterizer, SupportedImageFormat};
pub use screenshot::{Resolution, ScreenshotConfig, ScreenshotDetector, ScreenshotVerdict, ScreenshotWeights};
