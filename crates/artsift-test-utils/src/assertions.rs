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

//! Custom assertions for analysis results.

/// Assert two floats are within `tolerance` of each other.
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Assert every entry is non-negative and the entries sum to ~1.
pub fn assert_normalized(histogram: &[f64]) {
    assert!(
        histogram.iter().all(|v| *v >= 0.0),
        "histogram has negative entries: {:?}",
        histogram
    );
    assert_close(histogram.iter().sum(), 1.0, 1e-9);
}

/// Assert a string is a 16-character lowercase hex fingerprint.
pub fn assert_fingerprint_format(hash: &str) {
    assert_eq!(hash.len(), 16, "fingerprint {:?} is not 16 characters", hash);
    assert!(
        hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
        "fingerprint {:?} is not lowercase hex",
        hash
    );
}

/// Assert that an artsift command succeeds.
#[macro_export]
macro_rules! assert_artsift_success {
    ($dir:expr, $($arg:expr),+ $(,)?) => {
        $crate::artsift()
            $(.arg($arg))+
            .current_dir($dir)
            .assert()
            .success()
    };
}

/// Assert that an artsift command output contains a specific string.
#[macro_export]
macro_rules! assert_artsift_output_contains {
    ($dir:expr, $expected:expr, $($arg:expr),+ $(,)?) => {
        $crate::artsift()
            $(.arg($arg))+
            .current_dir($dir)
            .assert()
            .success()
            .stdout(predicates::prelude::predicate::str::contains($expected))
    };
}
