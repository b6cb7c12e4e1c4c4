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

use crate::context::AppContext;
use crate::output;
use crate::progress::ProgressTracker;
use anyhow::{Context, Result};
use artsift_media::{ArtworkRecord, SupportedImageFormat};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Fingerprint every image under a directory into a corpus file
#[derive(Parser, Debug)]
pub struct IndexCmd {
    /// Directory to scan recursively
    pub dir: PathBuf,

    /// Corpus file to write
    #[arg(short, long, value_name = "FILE", default_value = "corpus.json")]
    pub output: PathBuf,

    /// Owner recorded on every entry
    #[arg(long, default_value = "")]
    pub owner: String,
}

impl IndexCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let tracker = ProgressTracker::new(ctx.quiet);

        let files = tracker.scan(&format!("Scanning {}", self.dir.display()), || {
            collect_images(&self.dir)
        })?;

        let analyzer = ctx.analyzer();
        let bar = tracker.file_bar("Fingerprinting", files.len() as u64);

        let outcomes: Vec<(PathBuf, Option<String>)> = files
            .par_iter()
            .map(|path| {
                let hash = std::fs::read(path)
                    .map_err(|e| e.to_string())
                    .and_then(|bytes| analyzer.fingerprint(&bytes).map_err(|e| e.to_string()));
                bar.inc(1);
                match hash {
                    Ok(hash) => (path.clone(), Some(hash.to_string())),
                    Err(e) => {
                        warn!("Skipping {}: {}", path.display(), e);
                        (path.clone(), None)
                    }
                }
            })
            .collect();
        bar.finish_and_clear();

        let mut skipped = 0usize;
        let mut corpus: Vec<ArtworkRecord> = Vec::with_capacity(outcomes.len());
        for (path, hash) in outcomes {
            let Some(hash) = hash else {
                skipped += 1;
                continue;
            };
            corpus.push(record_for(&self.dir, &path, hash, &self.owner));
        }
        corpus.sort_by(|a, b| a.id.cmp(&b.id));

        let json = serde_json::to_string_pretty(&corpus)?;
        tokio::fs::write(&self.output, json)
            .await
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        info!(
            "Indexed {} images ({} skipped) into {}",
            corpus.len(),
            skipped,
            self.output.display()
        );
        if !ctx.quiet {
            output::success(&format!(
                "Indexed {} images into {}",
                ProgressTracker::format_count(corpus.len() as u64),
                self.output.display()
            ));
            if skipped > 0 {
                output::warning(&format!("{} files could not be decoded", skipped));
            }
        }
        Ok(())
    }
}

/// Image files under `dir`, by supported extension, in path order
fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let supported = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(SupportedImageFormat::from_extension)
            .is_some();
        if supported {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Corpus entry for `path`: id is the `/`-joined path relative to `root`
fn record_for(root: &Path, path: &Path, hash: String, owner: &str) -> ArtworkRecord {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let id = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    ArtworkRecord {
        id,
        perceptual_hash: Some(hash),
        title,
        owner_id: owner.to_string(),
    }
}
