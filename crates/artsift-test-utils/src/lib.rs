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

//! # artsift test utilities
//!
//! Shared test helpers for the artsift crates:
//! - Synthetic images with known properties, as raw RGBA or encoded PNG
//! - Float and fingerprint assertions
//! - CLI command helpers for testing the `artsift` binary

pub mod assertions;
pub mod cli;
pub mod fixtures;

// Re-export commonly used items at crate root
pub use assertions::*;
pub use cli::{artsift, ArtsiftCommand};
pub use fixtures::{SyntheticImage, TestFixtures};
