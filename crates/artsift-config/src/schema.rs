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

use crate::error::{ConfigError, ConfigResult};
use artsift_media::{AnalysisSettings, MatchThresholds, ScreenshotConfig, SimilarityWeights};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Duplicate-search bounds
    pub matching: MatchThresholds,

    /// Feature comparator weights
    pub similarity: SimilarityWeights,

    /// Screenshot heuristic tunables
    pub screenshot: ScreenshotConfig,

    /// Logging settings
    pub observability: ObservabilityConfig,

    /// Custom user-defined settings
    pub custom: HashMap<String, serde_json::Value>,
}

impl Config {
    /// Engine settings for an analyzer
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            matching: self.matching,
            similarity: self.similarity,
            screenshot: self.screenshot.clone(),
        }
    }

    /// Load from `path`, or defaults when no file exists there
    pub async fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        use crate::ConfigLoader;
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let loader = ConfigLoader::new();
        Ok(loader.load_with_overrides(path).await?)
    }

    /// Save as pretty TOML
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Colored output for terminal formats
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            log_level: default_log_level(),
            log_format: default_log_format(),
            color: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = Config::default();
        assert_eq!(config.matching.strict, 12);
        assert_eq!(config.matching.moderate, 20);
        assert_eq!(config.similarity.color, 0.4);
        assert_eq!(config.screenshot.decision_threshold, 0.70);
        assert_eq!(config.screenshot.resolutions.len(), 9);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[matching]\nmoderate = 16\n").unwrap();
        assert_eq!(config.matching.moderate, 16);
        assert_eq!(config.matching.strict, 12);
        assert_eq!(config.observability, ObservabilityConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/artsift.toml");

        let mut config = Config::default();
        config.screenshot.seed = Some(99);
        config.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_save_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let err = Config::default()
            .save(blocker.join("artsift.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
