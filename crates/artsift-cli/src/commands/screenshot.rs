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
use clap::Parser;
use std::path::PathBuf;

/// Score an image for screen-capture indicators
#[derive(Parser, Debug)]
pub struct ScreenshotCmd {
    /// Image file to inspect
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ScreenshotCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let bytes = read_image(&self.file).await?;
        let verdict = ctx.analyzer().screenshot(&bytes);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
            return Ok(());
        }

        let label = if verdict.is_screenshot {
            "Likely a screenshot"
        } else {
            "Not a screenshot"
        };
        output::verdict(verdict.is_screenshot, label);
        output::detail("Confidence", &output::percent(verdict.confidence));
        output::detail("Score", &format!("{:.2}", verdict.score));
        output::detail("Reasons", &verdict.reason());
        Ok(())
    }
}
