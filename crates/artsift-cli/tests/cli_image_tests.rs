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

//! End-to-end tests for the single-image commands

#![allow(clippy::unwrap_used)]

use artsift_test_utils::{
    artsift, assert_artsift_output_contains, assert_artsift_success, assert_fingerprint_format,
    ArtsiftCommand, TestFixtures,
};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_requires_a_command() {
    artsift()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_lists_commands() {
    artsift()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("screenshot"))
        .stdout(predicate::str::contains("index"));
}

#[test]
fn test_cli_version() {
    artsift()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("artsift"));
}

#[test]
fn test_hash_prints_fingerprint_and_path() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::artwork(200, 150).write_png(dir.path(), "heron.png").unwrap();

    let assert = ArtsiftCommand::new()
        .args(&["hash", &path.to_string_lossy()])
        .run_success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let (hash, printed_path) = stdout.trim().split_once("  ").unwrap();

    assert_fingerprint_format(hash);
    assert!(printed_path.ends_with("heron.png"));
}

#[test]
fn test_hash_is_deterministic_across_runs() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::artwork(120, 90).write_png(dir.path(), "a.png").unwrap();
    let path = path.to_string_lossy();

    let first = ArtsiftCommand::new().args(&["hash", "--json", &path]).run_json();
    let second = ArtsiftCommand::new().args(&["hash", "--json", &path]).run_json();

    assert_eq!(first, second);
    assert_eq!(first.as_array().unwrap().len(), 1);
    assert_fingerprint_format(first[0]["hash"].as_str().unwrap());
}

#[test]
fn test_hash_rejects_undecodable_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    fs::write(&path, TestFixtures::corrupt_bytes()).unwrap();

    ArtsiftCommand::new()
        .args(&["hash", &path.to_string_lossy()])
        .run_failure()
        .stderr(predicate::str::contains("Failed to fingerprint"));
}

#[test]
fn test_hash_reports_missing_file() {
    ArtsiftCommand::new()
        .args(&["hash", "/nonexistent/missing.png"])
        .run_failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_compare_identical_images() {
    let dir = TempDir::new().unwrap();
    let image = TestFixtures::artwork(160, 120);
    let a = image.write_png(dir.path(), "a.png").unwrap();
    let b = image.write_png(dir.path(), "b.png").unwrap();

    let json = ArtsiftCommand::new()
        .args(&["compare", "--json", &a.to_string_lossy(), &b.to_string_lossy()])
        .run_json();

    assert_eq!(json["distance"], 0);
    assert_eq!(json["confidence"], 1.0);
    assert_eq!(json["kind"], "exact");
    assert!((json["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_compare_mirrored_images_differ() {
    let dir = TempDir::new().unwrap();
    let image = TestFixtures::artwork(128, 128);
    let a = image.write_png(dir.path(), "a.png").unwrap();
    let b = TestFixtures::mirrored(&image).write_png(dir.path(), "b.png").unwrap();

    let json = ArtsiftCommand::new()
        .args(&["compare", "--json", &a.to_string_lossy(), &b.to_string_lossy()])
        .run_json();

    let distance = json["distance"].as_u64().unwrap();
    let expected = match distance {
        0..=12 => "exact",
        13..=20 => "near",
        _ => "distinct",
    };
    assert!(distance > 0);
    assert_eq!(json["kind"], expected);
}

#[test]
fn test_screenshot_flags_screen_capture() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::checkerboard(1920, 1080)
        .write_png(dir.path(), "capture.png")
        .unwrap();

    let json = ArtsiftCommand::new()
        .args(&["screenshot", "--json", &path.to_string_lossy()])
        .run_json();

    assert_eq!(json["is_screenshot"], true);
    assert!(json["confidence"].as_f64().unwrap() > 0.70);
    let reasons: Vec<&str> = json["reasons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert_eq!(reasons[0], "exact screen resolution 1920x1080");
}

#[test]
fn test_screenshot_passes_artwork() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::gradient(64, 64).write_png(dir.path(), "study.png").unwrap();

    ArtsiftCommand::new()
        .args(&["screenshot", &path.to_string_lossy()])
        .run_success()
        .stdout(predicate::str::contains("Not a screenshot"))
        .stdout(predicate::str::contains("no screenshot indicators"));
}

#[test]
fn test_screenshot_of_unreadable_image_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    fs::write(&path, TestFixtures::corrupt_bytes()).unwrap();

    let json = ArtsiftCommand::new()
        .args(&["screenshot", "--json", &path.to_string_lossy()])
        .run_json();

    assert_eq!(json["is_screenshot"], false);
    assert_eq!(json["reasons"][0], "unable to analyze image");
}

#[test]
fn test_analyze_without_corpus() {
    let dir = TempDir::new().unwrap();
    let path = TestFixtures::artwork(100, 100).write_png(dir.path(), "a.png").unwrap();

    let json = ArtsiftCommand::new()
        .args(&["analyze", &path.to_string_lossy()])
        .run_json();

    assert_fingerprint_format(json["hash"].as_str().unwrap());
    assert!(json["duplicate"].is_null());
    assert_eq!(json["features"]["color_histogram"].as_array().unwrap().len(), 48);
    assert_eq!(json["features"]["edge_histogram"].as_array().unwrap().len(), 10);
    assert_eq!(json["features"]["texture_features"].as_array().unwrap().len(), 2);
    assert!(json["screenshot"]["is_screenshot"].is_boolean());
}

#[test]
fn test_completions() {
    artsift()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("artsift"));
}

#[test]
fn test_hash_of_relative_path_in_working_directory() {
    let dir = TempDir::new().unwrap();
    TestFixtures::artwork(48, 48).write_png(dir.path(), "sketch.png").unwrap();

    assert_artsift_success!(dir.path(), "-q", "hash", "sketch.png");
    assert_artsift_output_contains!(dir.path(), "  sketch.png", "-q", "hash", "sketch.png");
}
