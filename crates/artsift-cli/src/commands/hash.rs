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
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Print the perceptual fingerprint of one or more images
#[derive(Parser, Debug)]
pub struct HashCmd {
    /// Image files to fingerprint
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct HashLine {
    path: String,
    hash: String,
}

impl HashCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let analyzer = ctx.analyzer();
        let mut lines = Vec::with_capacity(self.files.len());

        for path in &self.files {
            let bytes = read_image(path).await?;
            let hash = analyzer
                .fingerprint(&bytes)
                .with_context(|| format!("Failed to fingerprint {}", path.display()))?;
            lines.push(HashLine {
                path: path.display().to_string(),
                hash: hash.to_string(),
            });
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&lines)?);
        } else {
            for line in &lines {
                println!("{}  {}", line.hash, line.path);
            }
        }
        Ok(())
    }
}
