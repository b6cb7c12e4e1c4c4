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

use crate::context::{read_image, AppContext};
use crate::output;
use anyhow::Result;
use artsift_media::matcher::confidence;
use artsift_media::MatchKind;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Compare two images by fingerprint distance and feature similarity
#[derive(Parser, Debug)]
pub struct CompareCmd {
    /// First image
    pub first: PathBuf,

    /// Second image
    pub second: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Comparison {
    first_hash: String,
    second_hash: String,
    distance: u32,
    confidence: f64,
    kind: MatchKind,
    similarity: f64,
}

impl CompareCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let analyzer = ctx.analyzer();
        let first = read_image(&self.first).await?;
        let second = read_image(&self.second).await?;

        let first_hash = analyzer.fingerprint(&first)?;
        let second_hash = analyzer.fingerprint(&second)?;
        let distance = first_hash.distance(&second_hash);

        let comparison = Comparison {
            first_hash: first_hash.to_string(),
            second_hash: second_hash.to_string(),
            distance,
            confidence: confidence(distance),
            kind: analyzer.matcher().classify(distance),
            similarity: analyzer.similarity(&first, &second)?,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
            return Ok(());
        }

        output::header(&format!(
            "{} vs {}",
            self.first.display(),
            self.second.display()
        ));
        output::detail("Fingerprints", &format!("{} / {}", comparison.first_hash, comparison.second_hash));
        output::detail("Distance", &format!("{} bits", comparison.distance));
        output::detail("Confidence", &output::percent(comparison.confidence));
        output::detail("Verdict", kind_label(comparison.kind));
        output::detail("Feature similarity", &output::percent(comparison.similarity));
        Ok(())
    }
}

pub(crate) fn kind_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Exact => "duplicate",
        MatchKind::Near => "near-duplicate",
        MatchKind::Distinct => "distinct",
    }
}
