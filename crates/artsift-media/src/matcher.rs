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

//! Nearest-neighbour search over a corpus of stored fingerprints

use crate::phash::{hex_distance, PerceptualHash, HASH_BITS};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Artwork entry as stored by the surrounding application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    /// Artwork identifier
    pub id: String,

    /// Stored fingerprint, if one was ever computed
    #[serde(default)]
    pub perceptual_hash: Option<String>,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Owner identifier
    #[serde(default)]
    pub owner_id: String,
}

/// Hamming distance bounds for duplicate classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// At or below this distance a match counts as an exact duplicate
    pub strict: u32,

    /// Largest distance admitted by a search
    pub moderate: u32,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        MatchThresholds {
            strict: 12,
            moderate: 20,
        }
    }
}

/// How close a corpus entry is to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Within the strict bound
    Exact,
    /// Within the moderate bound
    Near,
    /// Beyond the moderate bound
    Distinct,
}

/// A corpus entry close enough to the query fingerprint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    /// Matched corpus entry
    pub artwork: &'a ArtworkRecord,

    /// Differing bits (0..=64)
    pub distance: u32,

    /// `1 - distance / 64`, clamped to [0, 1]
    pub confidence: f64,

    /// Strict or moderate classification
    pub kind: MatchKind,
}

/// Linear-scan fingerprint matcher
#[derive(Debug, Clone, Default)]
pub struct HammingMatcher {
    thresholds: MatchThresholds,
}

impl HammingMatcher {
    /// Matcher with the default 12/20 bounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher with custom bounds
    pub fn with_thresholds(thresholds: MatchThresholds) -> Self {
        HammingMatcher { thresholds }
    }

    /// Configured bounds
    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    /// Bit distance between two hex fingerprints, `u32::MAX` if incomparable
    pub fn distance(&self, a: &str, b: &str) -> u32 {
        hex_distance(a, b)
    }

    /// Classify a distance against the configured bounds
    pub fn classify(&self, distance: u32) -> MatchKind {
        if distance <= self.thresholds.strict {
            MatchKind::Exact
        } else if distance <= self.thresholds.moderate {
            MatchKind::Near
        } else {
            MatchKind::Distinct
        }
    }

    /// Closest corpus entry within the moderate bound
    ///
    /// Entries without a stored fingerprint are skipped. On equal distance
    /// the entry seen first in corpus order is kept.
    #[instrument(skip(self, query, corpus), fields(query = %query, corpus_size = corpus.len()))]
    pub fn search<'a>(
        &self,
        query: &PerceptualHash,
        corpus: &'a [ArtworkRecord],
    ) -> Option<MatchResult<'a>> {
        let mut best: Option<(&'a ArtworkRecord, u32)> = None;

        for (artwork, distance) in self.admitted(query, corpus) {
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((artwork, distance));
            }
        }

        let result = best.map(|(artwork, distance)| self.result(artwork, distance));
        match &result {
            Some(m) => debug!("Best match {} at distance {}", m.artwork.id, m.distance),
            None => debug!("No match within {} bits", self.thresholds.moderate),
        }
        result
    }

    /// Every corpus entry within the moderate bound, closest first
    ///
    /// The sort is stable, so equal distances keep corpus order.
    pub fn search_all<'a>(
        &self,
        query: &PerceptualHash,
        corpus: &'a [ArtworkRecord],
    ) -> Vec<MatchResult<'a>> {
        let mut matches: Vec<MatchResult<'a>> = self
            .admitted(query, corpus)
            .map(|(artwork, distance)| self.result(artwork, distance))
            .collect();
        matches.sort_by_key(|m| m.distance);
        matches
    }

    fn admitted<'a, 'q>(
        &'q self,
        query: &'q PerceptualHash,
        corpus: &'a [ArtworkRecord],
    ) -> impl Iterator<Item = (&'a ArtworkRecord, u32)> + 'q
    where
        'a: 'q,
    {
        let query = query.to_string();
        corpus.iter().filter_map(move |artwork| {
            let stored = artwork.perceptual_hash.as_deref()?;
            let distance = hex_distance(&query, &stored.to_ascii_lowercase());
            trace!("{} -> {}", artwork.id, distance);
            (distance <= self.thresholds.moderate).then_some((artwork, distance))
        })
    }

    fn result<'a>(&self, artwork: &'a ArtworkRecord, distance: u32) -> MatchResult<'a> {
        MatchResult {
            artwork,
            distance,
            confidence: confidence(distance),
            kind: self.classify(distance),
        }
    }
}

/// `1 - distance / 64`, clamped to [0, 1]
pub fn confidence(distance: u32) -> f64 {
    (1.0 - distance as f64 / HASH_BITS as f64).clamp(0.0, 1.0)
}
