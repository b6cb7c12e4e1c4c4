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

use indicatif::{HumanCount, ProgressBar, ProgressDrawTarget, ProgressFinish, ProgressStyle};
use std::time::Duration;

/// Progress reporting for long-running commands
///
/// Draws on stderr so stdout stays clean for piping.
pub struct ProgressTracker {
    quiet: bool,
}

impl ProgressTracker {
    /// Create a tracker; every bar is hidden when `quiet`
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Bar counting processed image files
    pub fn file_bar(&self, msg: &str, total: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr())
            .with_finish(ProgressFinish::AndClear);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.magenta} {msg} [{bar:40.magenta/blue}] {pos}/{len} images ({per_sec}, {eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Run `work` behind a spinner that is cleared once it returns
    pub fn scan<T>(&self, msg: &str, work: impl FnOnce() -> T) -> T {
        let spinner = self.spinner(msg);
        let result = work();
        spinner.finish_and_clear();
        result
    }

    /// Spinner for scans of unknown length
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
            .with_finish(ProgressFinish::AndClear);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Format a count with thousands separators
    pub fn format_count(count: u64) -> String {
        format!("{}", HumanCount(count))
    }
}
