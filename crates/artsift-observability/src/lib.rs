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

//! Structured logging for artsift
//!
//! Thin setup over `tracing-subscriber`: pick a [`LogFormat`], a filter and
//! a destination, then install once at process start.
//!
//! ```no_run
//! use artsift_observability::{init_tracing, LogFormat};
//!
//! init_tracing(LogFormat::Compact, Some("info")).expect("logging");
//! tracing::info!(corpus = 12, "index loaded");
//! ```

pub mod config;
pub mod initialization;

pub use config::{verbosity_level, LogConfig, LogError, LogFormat, LogOutput};
pub use initialization::{init_tracing, init_tracing_with_config};

pub use tracing::{debug, error, info, instrument, trace, warn, Level};
