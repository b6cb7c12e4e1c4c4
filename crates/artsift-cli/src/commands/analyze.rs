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

use crate::context::{load_corpus, read_image, AppContext};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Full JSON report: fingerprint, duplicate, features and screenshot verdict
#[derive(Parser, Debug)]
pub struct AnalyzeCmd {
    /// Image file to analyze
    pub file: PathBuf,

    /// Corpus to search for duplicates
    #[arg(long, value_name = "FILE")]
    pub corpus: Option<PathBuf>,
}

impl AnalyzeCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let corpus = match &self.corpus {
            Some(path) => load_corpus(path).await?,
            None => Vec::new(),
        };
        let bytes = read_image(&self.file).await?;

        let report = ctx.analyzer().analyze(&bytes, &corpus)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
