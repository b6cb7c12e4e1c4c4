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
use crate::schema::*;
use artsift_media::{MatchThresholds, ScreenshotConfig, ScreenshotWeights, SimilarityWeights};

/// Largest possible fingerprint distance
const MAX_DISTANCE: u32 = 64;

/// Validator for configuration settings
pub trait Validator {
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for Config {
    fn validate(&self) -> ConfigResult<()> {
        self.matching.validate()?;
        self.similarity.validate()?;
        self.screenshot.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl Validator for MatchThresholds {
    fn validate(&self) -> ConfigResult<()> {
        if self.moderate > MAX_DISTANCE {
            return Err(ConfigError::invalid_value(
                "matching.moderate",
                format!("must be at most {}, got {}", MAX_DISTANCE, self.moderate),
            ));
        }

        if self.strict > self.moderate {
            return Err(ConfigError::invalid_value(
                "matching.strict",
                format!(
                    "must not exceed matching.moderate ({}), got {}",
                    self.moderate, self.strict
                ),
            ));
        }

        Ok(())
    }
}

impl Validator for SimilarityWeights {
    fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("similarity.color", self.color),
            ("similarity.edge", self.edge),
            ("similarity.texture", self.texture),
        ] {
            check_weight(field, value)?;
        }

        if self.color + self.edge + self.texture <= 0.0 {
            return Err(ConfigError::validation_error(
                "similarity weights must not all be zero",
            ));
        }

        Ok(())
    }
}

impl Validator for ScreenshotWeights {
    fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("screenshot.weights.resolution", self.resolution),
            ("screenshot.weights.aspect_ratio", self.aspect_ratio),
            ("screenshot.weights.low_diversity", self.low_diversity),
            ("screenshot.weights.limited_palette", self.limited_palette),
            ("screenshot.weights.crisp_edges", self.crisp_edges),
            ("screenshot.weights.sharp_pixels", self.sharp_pixels),
            ("screenshot.weights.blockiness", self.blockiness),
        ] {
            check_weight(field, value)?;
        }
        Ok(())
    }
}

impl Validator for ScreenshotConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("screenshot.low_diversity_ratio", self.low_diversity_ratio),
            ("screenshot.limited_palette_ratio", self.limited_palette_ratio),
            ("screenshot.sharp_pixel_ratio", self.sharp_pixel_ratio),
            ("screenshot.blocky_ratio", self.blocky_ratio),
        ] {
            check_ratio(field, value)?;
        }

        if self.low_diversity_ratio > self.limited_palette_ratio {
            return Err(ConfigError::invalid_value(
                "screenshot.low_diversity_ratio",
                "must not exceed screenshot.limited_palette_ratio",
            ));
        }

        for (field, value) in [
            ("screenshot.edge_stride", self.edge_stride),
            ("screenshot.block_size", self.block_size),
            ("screenshot.block_samples", self.block_samples),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid_value(field, "must be greater than 0"));
            }
        }

        for (field, value) in [
            ("screenshot.aspect_tolerance", self.aspect_tolerance),
            ("screenshot.crisp_edge_mean", self.crisp_edge_mean),
            ("screenshot.sharp_pixel_strength", self.sharp_pixel_strength),
            ("screenshot.block_variance", self.block_variance),
            ("screenshot.decision_threshold", self.decision_threshold),
        ] {
            check_weight(field, value)?;
        }

        if let Some(ratio) = self.aspect_ratios.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(ConfigError::invalid_value(
                "screenshot.aspect_ratios",
                format!("ratios must be positive, got {}", ratio),
            ));
        }

        if let Some(res) = self.resolutions.iter().find(|r| r.width == 0 || r.height == 0) {
            return Err(ConfigError::invalid_value(
                "screenshot.resolutions",
                format!("{}x{} is not a valid resolution", res.width, res.height),
            ));
        }

        self.weights.validate()
    }
}

impl Validator for ObservabilityConfig {
    fn validate(&self) -> ConfigResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(ConfigError::invalid_value(
                "observability.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["pretty", "compact", "json"];
        if !valid_formats.contains(&self.log_format.as_str()) {
            return Err(ConfigError::invalid_value(
                "observability.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        Ok(())
    }
}

/// Finite and non-negative
fn check_weight(field: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid_value(
            field,
            format!("must be a finite non-negative number, got {}", value),
        ));
    }
    Ok(())
}

/// Within [0, 1]
fn check_ratio(field: &str, value: f64) -> ConfigResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::invalid_value(
            field,
            format!("must be between 0.0 and 1.0, got {}", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use artsift_media::Resolution;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_strict_above_moderate() {
        let thresholds = MatchThresholds {
            strict: 21,
            moderate: 20,
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_moderate_above_hash_width() {
        let thresholds = MatchThresholds {
            strict: 0,
            moderate: 65,
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_negative_similarity_weight() {
        let weights = SimilarityWeights {
            edge: -0.1,
            ..SimilarityWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_all_zero_similarity_weights() {
        let weights = SimilarityWeights {
            color: 0.0,
            edge: 0.0,
            texture: 0.0,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_screenshot_ratio_out_of_range() {
        let config = ScreenshotConfig {
            blocky_ratio: 1.5,
            ..ScreenshotConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_screenshot_zero_block_size() {
        let config = ScreenshotConfig {
            block_size: 0,
            ..ScreenshotConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_screenshot_bad_resolution() {
        let mut config = ScreenshotConfig::default();
        config.resolutions.push(Resolution::new(0, 1080));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_screenshot_nan_weight() {
        let mut config = ScreenshotConfig::default();
        config.weights.blockiness = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let config = ObservabilityConfig {
            log_format: "text".to_string(),
            ..ObservabilityConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
