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
use crate::schema::Config;
use crate::validation::Validator;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info};

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "ARTSIFT_";

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    validate: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        ConfigLoader { validate: true }
    }

    /// Create a loader without validation
    pub fn without_validation() -> Self {
        ConfigLoader { validate: false }
    }

    /// Load configuration from a file
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).await?;

        info!(
            "Loaded {} configuration file: {}",
            format.name(),
            path.display()
        );

        self.load_from_string(&content, format)
    }

    /// Load configuration from a string
    pub fn load_from_string(&self, content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config: Config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };

        debug!("Configuration loaded from {}", format.name());
        self.finish(config)
    }

    /// Load a file, then apply `ARTSIFT_*` environment overrides
    pub async fn load_with_overrides<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let mut config = self.load_file(path).await?;
        self.apply_env_overrides(&mut config)?;
        self.finish(config)
    }

    /// Merge multiple configuration files, later files taking precedence
    pub async fn load_and_merge<P: AsRef<Path>>(&self, paths: &[P]) -> ConfigResult<Config> {
        let Some((first, rest)) = paths.split_first() else {
            return Err(ConfigError::validation_error(
                "at least one configuration file must be provided",
            ));
        };

        let mut merged = self.load_file(first).await?;
        for path in rest {
            let overlay = self.load_file(path).await?;
            merge_configs(&mut merged, &overlay);
        }

        self.finish(merged)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&self, config: &mut Config) -> ConfigResult<()> {
        apply_overrides(config, |name| std::env::var(name).ok())
    }

    fn finish(&self, config: Config) -> ConfigResult<Config> {
        if self.validate {
            config.validate()?;
            debug!("Configuration validated successfully");
        }
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `ARTSIFT_*` overrides read through `lookup`
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| {
        let name = format!("{}{}", ENV_PREFIX, suffix);
        lookup(&name).map(|value| (name, value))
    };

    if let Some((_, value)) = var("LOG_LEVEL") {
        config.observability.log_level = value.to_lowercase();
    }
    if let Some((_, value)) = var("LOG_FORMAT") {
        config.observability.log_format = value.to_lowercase();
    }
    if let Some((name, value)) = var("LOG_COLOR") {
        config.observability.color = parse_bool(&name, &value)?;
    }
    if let Some((name, value)) = var("MATCH_STRICT") {
        config.matching.strict = parse_value(&name, &value, "expected a bit distance (0-64)")?;
    }
    if let Some((name, value)) = var("MATCH_MODERATE") {
        config.matching.moderate = parse_value(&name, &value, "expected a bit distance (0-64)")?;
    }
    if let Some((name, value)) = var("SCREENSHOT_THRESHOLD") {
        config.screenshot.decision_threshold = parse_value(&name, &value, "expected a number")?;
    }
    if let Some((name, value)) = var("SCREENSHOT_SEED") {
        config.screenshot.seed = Some(parse_value(&name, &value, "expected an unsigned integer")?);
    }

    Ok(())
}

/// Overlay every section of `overlay` that differs from its default
fn merge_configs(base: &mut Config, overlay: &Config) {
    let defaults = Config::default();

    if overlay.matching != defaults.matching {
        base.matching = overlay.matching;
    }
    if overlay.similarity != defaults.similarity {
        base.similarity = overlay.similarity;
    }
    if overlay.screenshot != defaults.screenshot {
        base.screenshot = overlay.screenshot.clone();
    }
    if overlay.observability != defaults.observability {
        base.observability = overlay.observability.clone();
    }

    for (key, value) in &overlay.custom {
        base.custom.insert(key.clone(), value.clone());
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str, reason: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::env_var_parsing_error(name, value, reason))
}

/// Parse boolean from string (accepts: true, false, yes, no, 1, 0, on, off)
fn parse_bool(name: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::env_var_parsing_error(
            name,
            value,
            "expected 'true', 'false', 'yes', 'no', '1', '0', 'on', or 'off'",
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path("artsift.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("artsift.yaml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("artsift.yml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("artsift.json").unwrap(), ConfigFormat::Json);
    }

    #[test]
    fn test_format_detection_error() {
        assert!(ConfigFormat::from_path("artsift.xml").is_err());
        assert!(ConfigFormat::from_path("artsift").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "yes").unwrap());
        assert!(parse_bool("X", "ON").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_parse_each_format() {
        let loader = ConfigLoader::new();

        let toml = "[matching]\nstrict = 8\nmoderate = 18\n";
        assert_eq!(loader.load_from_string(toml, ConfigFormat::Toml).unwrap().matching.strict, 8);

        let yaml = "screenshot:\n  decision_threshold: 0.5\n";
        let config = loader.load_from_string(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.screenshot.decision_threshold, 0.5);

        let json = r#"{"similarity": {"color": 0.5, "edge": 0.3, "texture": 0.2}}"#;
        let config = loader.load_from_string(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.similarity.color, 0.5);
    }

    #[test]
    fn test_validation_rejects_and_without_validation_accepts() {
        let toml = "[matching]\nstrict = 30\nmoderate = 20\n";
        assert!(ConfigLoader::new().load_from_string(toml, ConfigFormat::Toml).is_err());
        assert!(ConfigLoader::without_validation()
            .load_from_string(toml, ConfigFormat::Toml)
            .is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        apply_overrides(
            &mut config,
            env(&[
                ("ARTSIFT_LOG_LEVEL", "DEBUG"),
                ("ARTSIFT_LOG_COLOR", "off"),
                ("ARTSIFT_MATCH_MODERATE", "24"),
                ("ARTSIFT_SCREENSHOT_SEED", "17"),
                ("ARTSIFT_SCREENSHOT_THRESHOLD", "0.6"),
            ]),
        )
        .unwrap();

        assert_eq!(config.observability.log_level, "debug");
        assert!(!config.observability.color);
        assert_eq!(config.matching.moderate, 24);
        assert_eq!(config.screenshot.seed, Some(17));
        assert_eq!(config.screenshot.decision_threshold, 0.6);
    }

    #[test]
    fn test_bad_override_names_variable() {
        let mut config = Config::default();
        let err = apply_overrides(&mut config, env(&[("ARTSIFT_MATCH_STRICT", "lots")])).unwrap_err();
        assert!(err.to_string().contains("ARTSIFT_MATCH_STRICT"));
    }

    #[test]
    fn test_merge_prefers_overlay_changes() {
        let mut base = Config::default();
        base.matching.strict = 5;

        let mut overlay = Config::default();
        overlay.similarity.texture = 0.0;

        merge_configs(&mut base, &overlay);
        assert_eq!(base.matching.strict, 5);
        assert_eq!(base.similarity.texture, 0.0);
    }
}
