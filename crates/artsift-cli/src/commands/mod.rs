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

// Command modules for the artsift CLI
pub mod analyze;
pub mod compare;
pub mod hash;
pub mod index;
pub mod match_cmd;
pub mod screenshot;

pub use analyze::AnalyzeCmd;
pub use compare::CompareCmd;
pub use hash::HashCmd;
pub use index::IndexCmd;
pub use match_cmd::MatchCmd;
pub use screenshot::ScreenshotCmd;
