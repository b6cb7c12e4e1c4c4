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

//! Terminal output helpers
//!
//! Status lines go through these helpers so every command looks the same.
//! Machine-readable results (`--json`, fingerprints) are printed directly.

use console::style;

/// Print a success message with a green check mark.
pub fn success(msg: &str) {
    println!("{} {}", style("✅").green().bold(), msg);
}

/// Print an error message to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("❌").red().bold(), msg);
}

/// Print a warning to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠️").yellow(), msg);
}

/// Print a key-value line with the value highlighted.
///
/// ```text
///   Distance: 3 bits
/// ```
pub fn detail(key: &str, value: &str) {
    println!("  {}: {}", key, style(value).cyan());
}

/// Print a section header.
pub fn header(msg: &str) {
    println!("{} {}", style("🎨").magenta().bold(), style(msg).bold());
}

/// Print a verdict line: red when flagged, green otherwise.
pub fn verdict(flagged: bool, msg: &str) {
    if flagged {
        println!("{} {}", style("🚩").red().bold(), style(msg).red().bold());
    } else {
        println!("{} {}", style("✔").green().bold(), style(msg).green());
    }
}

/// Render a `[0, 1]` score as a percentage.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
