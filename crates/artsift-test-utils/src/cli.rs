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

//! CLI test helpers for the `artsift` binary.

use assert_cmd::Command;
use std::path::Path;

/// Get a Command for the artsift binary.
///
/// # Example
///
/// ```ignore
/// use artsift_test_utils::artsift;
///
/// artsift()
///     .arg("hash")
///     .arg("image.png")
///     .assert()
///     .success();
/// ```
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
pub fn artsift() -> Command {
    Command::cargo_bin("artsift").expect("artsift binary not found")
}

/// Fluent wrapper for common artsift invocations.
pub struct ArtsiftCommand {
    cmd: Command,
}

impl ArtsiftCommand {
    /// Create a new quiet ArtsiftCommand.
    pub fn new() -> Self {
        let mut cmd = artsift();
        cmd.arg("-q");
        Self { cmd }
    }

    /// Set the working directory for the command.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Add multiple arguments to the command.
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Execute the command and assert success.
    pub fn run_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    /// Execute the command and assert failure.
    pub fn run_failure(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().failure()
    }

    /// Run and parse stdout as JSON.
    pub fn run_json(self) -> serde_json::Value {
        let output = self.run_success().get_output().stdout.clone();
        serde_json::from_slice(&output).expect("command printed valid JSON")
    }

    /// Build a corpus file from every image in `dir`.
    pub fn index(dir: &Path, corpus: &Path) {
        Self::new()
            .in_dir(dir)
            .args(&["index", ".", "-o", &corpus.to_string_lossy()])
            .run_success();
    }
}

impl Default for ArtsiftCommand {
    fn default() -> Self {
        Self::new()
    }
}
