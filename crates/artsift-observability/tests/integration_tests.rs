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

//! Integration tests for subscriber installation
//!
//! Only one test in this binary installs the global subscriber; the rest
//! exercise configuration alone.

#![allow(clippy::unwrap_used)]

use artsift_observability::{
    init_tracing, init_tracing_with_config, LogConfig, LogError, LogFormat, LogOutput,
};

#[test]
fn test_install_once_then_refuse() {
    let config = LogConfig::new()
        .with_format(LogFormat::Json)
        .with_level("artsift_media=debug,warn")
        .with_timestamps(false);

    init_tracing_with_config(config).unwrap();
    tracing::info!(hash = "8000000000000000", "subscriber installed");

    let second = init_tracing(LogFormat::Pretty, Some("info"));
    assert!(matches!(second, Err(LogError::AlreadyInitialized)));
}

#[test]
fn test_config_builder_chaining() {
    let config = LogConfig::new()
        .with_format(LogFormat::Compact)
        .with_level("trace")
        .with_timestamps(false)
        .with_color(false)
        .with_targets(true)
        .with_output(LogOutput::Stdout);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level.as_deref(), Some("trace"));
    assert!(!config.use_timestamps);
    assert!(!config.use_color);
    assert!(config.include_targets);
    assert_eq!(config.output, LogOutput::Stdout);
}

#[test]
fn test_explicit_level_wins_over_env() {
    let config = LogConfig::new().with_level("warn");
    assert_eq!(config.effective_level(), "warn");
}

#[test]
fn test_invalid_filter_is_reported_before_install() {
    let result = init_tracing(LogFormat::Compact, Some("artsift_media=shouting"));
    assert!(matches!(result, Err(LogError::InvalidFilter { .. })));
}
