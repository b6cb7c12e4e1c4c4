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

//! Shared state for every subcommand

use anyhow::{Context, Result};
use artsift_config::{Config, ConfigLoader, Validator};
use artsift_media::{ArtworkAnalyzer, ArtworkRecord, ImageRasterizer};
use std::path::Path;
use tracing::debug;

/// Configuration file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "artsift.toml";

/// Loaded configuration plus global flags
pub struct AppContext {
    pub config: Config,
    pub quiet: bool,
}

impl AppContext {
    pub fn new(config: Config, quiet: bool) -> Self {
        Self { config, quiet }
    }

    /// Analyzer wired with the configured tunables
    pub fn analyzer(&self) -> ArtworkAnalyzer<ImageRasterizer> {
        ArtworkAnalyzer::with_settings(ImageRasterizer::new(), self.config.analysis_settings())
    }
}

/// Resolve configuration: explicit file, else `artsift.toml` when present,
/// else defaults; environment overrides apply on top of any of them.
pub async fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let loader = ConfigLoader::without_validation();

    let mut config = match explicit {
        Some(path) => loader
            .load_file(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            loader.load_file(DEFAULT_CONFIG_FILE).await?
        }
        None => Config::default(),
    };

    loader.apply_env_overrides(&mut config)?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Read an image file into memory
pub async fn read_image(path: &Path) -> Result<Vec<u8>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Load a corpus written by `artsift index`
pub async fn load_corpus(path: &Path) -> Result<Vec<ArtworkRecord>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read corpus {}", path.display()))?;
    let corpus: Vec<ArtworkRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Corpus {} is not a list of artwork records", path.display()))?;
    debug!("Loaded {} corpus entries", corpus.len());
    Ok(corpus)
}
