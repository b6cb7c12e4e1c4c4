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

//! Integration tests for feature similarity and screenshot scoring

use artsift_media::screenshot::{NO_INDICATORS, UNABLE_TO_ANALYZE};
use artsift_media::{
    cosine_similarity, ArtworkAnalyzer, FeatureComparator, FeatureExtractor, ImageRasterizer,
    PixelBuffer, ScreenshotConfig, ScreenshotDetector,
};
use artsift_test_utils::{assert_close, assert_normalized, SyntheticImage, TestFixtures};

fn buffer(img: &SyntheticImage) -> PixelBuffer {
    PixelBuffer::from_rgba(img.width, img.height, img.rgba.clone()).unwrap()
}

fn seeded_detector() -> ScreenshotDetector {
    ScreenshotDetector::with_config(ScreenshotConfig {
        seed: Some(1234),
        ..ScreenshotConfig::default()
    })
}

#[test]
fn test_cosine_examples() {
    assert_close(cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), 1.0, 1e-12);
    assert_eq!(cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0);
}

#[test]
fn test_extracted_features_are_normalized() {
    let raster = ImageRasterizer::new();
    let features = FeatureExtractor::new()
        .extract_bytes(&raster, &TestFixtures::artwork(300, 200).png())
        .unwrap();

    for channel in features.color_histogram.chunks(16) {
        assert_normalized(channel);
    }
    assert_normalized(&features.edge_histogram);
    assert!(features.texture_features.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_similar_images_score_higher_than_different_ones() {
    let extractor = FeatureExtractor::new();
    let comparator = FeatureComparator::new();

    let art = extractor.extract(&buffer(&TestFixtures::artwork(256, 256)));
    let art_small = extractor.extract(&buffer(&TestFixtures::artwork(128, 128)));
    let board = extractor.extract(&buffer(&TestFixtures::checkerboard(256, 256)));

    let close = comparator.compare(&art, &art_small);
    let far = comparator.compare(&art, &board);
    assert!(close > far, "close={} far={}", close, far);
    assert!((0.0..=1.0 + 1e-9).contains(&close));
}

#[test]
fn test_feature_vectors_serialize_with_fixed_shape() {
    let features = FeatureExtractor::new().extract(&buffer(&TestFixtures::gradient(64, 64)));
    let json = serde_json::to_value(&features).unwrap();
    assert_eq!(json["color_histogram"].as_array().unwrap().len(), 48);
    assert_eq!(json["edge_histogram"].as_array().unwrap().len(), 10);
    assert_eq!(json["texture_features"].as_array().unwrap().len(), 2);
}

#[test]
fn test_screen_capture_is_flagged() {
    let capture = TestFixtures::checkerboard(120, 90);
    let verdict = seeded_detector().detect(&buffer(&capture), 1920, 1080);

    assert!(verdict.is_screenshot);
    assert!(verdict.confidence > 0.70);
    assert!(verdict.reasons.iter().any(|r| r.contains("1920x1080")));
    assert!(verdict.reasons.iter().any(|r| r == "extremely low color diversity"));
}

#[test]
fn test_artwork_is_not_flagged() {
    let verdict = seeded_detector().detect(&buffer(&TestFixtures::gradient(64, 64)), 1001, 999);
    assert!(!verdict.is_screenshot);
    assert_eq!(verdict.score, 0.0);
    assert_eq!(verdict.reason(), NO_INDICATORS);
}

#[test]
fn test_unreadable_upload_gets_fallback_verdict() {
    let analyzer = ArtworkAnalyzer::new(ImageRasterizer::new());
    let verdict = analyzer.screenshot(&TestFixtures::corrupt_bytes());
    assert!(!verdict.is_screenshot);
    assert_eq!(verdict.confidence, 0.0);
    assert_eq!(verdict.reasons, vec![UNABLE_TO_ANALYZE.to_string()]);
}

#[test]
fn test_screenshot_from_bytes_uses_native_size() {
    let raster = ImageRasterizer::new();
    let png = TestFixtures::solid(1280, 720, [30, 30, 30]).png();
    let verdict = seeded_detector().detect_bytes(&raster, &png);

    // resolution + 16:9 + low diversity + blockiness
    assert_close(verdict.score, 0.70, 1e-9);
    assert!(!verdict.is_screenshot, "score equal to the threshold must not flag");
    assert!(verdict.reasons[0].contains("1280x720"));
}

#[test]
fn test_limited_palette_signal() {
    // 5x5 tiles, 64 shades of red: ratio 0.04, flat on the edge grid,
    // no flat 8x8 window since every window spans two tile rows
    let tiles = SyntheticImage::from_fn(40, 40, |x, y| {
        let idx = x / 5 + (y / 5) * 8;
        [(idx * 4) as u8, 0, 0]
    });
    let verdict = seeded_detector().detect(&buffer(&tiles), 1001, 999);

    assert_close(verdict.score, 0.05, 1e-9);
    assert_eq!(verdict.reasons, vec!["limited color palette".to_string()]);
    assert!(!verdict.is_screenshot);
}

#[test]
fn test_aspect_signal_crosses_threshold() {
    let board = buffer(&TestFixtures::checkerboard(64, 64));
    let without_aspect = ScreenshotDetector::with_config(ScreenshotConfig {
        aspect_ratios: vec![],
        sharp_pixel_ratio: 1.0,
        seed: Some(1234),
        ..ScreenshotConfig::default()
    });

    // resolution + low diversity + crisp edges
    let verdict = without_aspect.detect(&board, 1920, 1080);
    assert_close(verdict.score, 0.60, 1e-9);
    assert!(!verdict.is_screenshot);
    assert_eq!(verdict.reasons.len(), 3);

    let with_aspect = ScreenshotDetector::with_config(ScreenshotConfig {
        sharp_pixel_ratio: 1.0,
        seed: Some(1234),
        ..ScreenshotConfig::default()
    });
    let verdict = with_aspect.detect(&board, 1920, 1080);
    assert_close(verdict.score, 0.75, 1e-9);
    assert!(verdict.is_screenshot);
    assert!(verdict.reasons.iter().any(|r| r.contains("aspect")));
}
