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

use crate::commands::compare::kind_label;
use crate::context::{load_corpus, read_image, AppContext};
use crate::output;
use anyhow::Result;
use artsift_media::MatchResult;
use clap::Parser;
use std::path::PathBuf;

/// Look for near-duplicates of an image in a corpus
#[derive(Parser, Debug)]
pub struct MatchCmd {
    /// Image file to look up
    pub file: PathBuf,

    /// Corpus written by `artsift index`
    #[arg(long, value_name = "FILE")]
    pub corpus: PathBuf,

    /// List every admitted entry instead of the closest one
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl MatchCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let corpus = load_corpus(&self.corpus).await?;
        let bytes = read_image(&self.file).await?;

        let analyzer = ctx.analyzer();
        let hash = analyzer.fingerprint(&bytes)?;
        let matcher = analyzer.matcher();

        let matches: Vec<MatchResult<'_>> = if self.all {
            matcher.search_all(&hash, &corpus)
        } else {
            matcher.search(&hash, &corpus).into_iter().collect()
        };

        if self.json {
            let json = if self.all {
                serde_json::to_string_pretty(&matches)?
            } else {
                serde_json::to_string_pretty(&matches.first())?
            };
            println!("{}", json);
            return Ok(());
        }

        if matches.is_empty() {
            output::verdict(
                false,
                &format!(
                    "No match within {} bits among {} entries",
                    matcher.thresholds().moderate,
                    corpus.len()
                ),
            );
            return Ok(());
        }

        output::header(&format!("{} ({})", self.file.display(), hash));
        for m in &matches {
            output::verdict(
                true,
                &format!("{} \"{}\": {}", m.artwork.id, m.artwork.title, kind_label(m.kind)),
            );
            output::detail("Distance", &format!("{} bits", m.distance));
            output::detail("Confidence", &output::percent(m.confidence));
        }
        Ok(())
    }
}
