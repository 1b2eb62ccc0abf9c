mod common;

use crater_core::detection::contour::{detect_contours, passes_radius_filter};
use crater_core::detection::{build_detector, ContourParams, DetectorConfig, DetectorInput};

#[test]
fn test_single_disk_found_once() {
    let frame = common::reference_disk();
    let found = detect_contours(&frame, &ContourParams::default()).unwrap();

    assert_eq!(found.len(), 1, "candidates: {found:?}");
    let c = &found[0];
    assert!((c.x as i64 - 50).abs() <= 2, "x = {}", c.x);
    assert!((c.y as i64 - 50).abs() <= 2, "y = {}", c.y);
    let r = c.radius.expect("contour candidates carry a radius");
    assert!((r as i64 - 20).abs() <= 3, "r = {r}");
    assert_eq!(c.confidence, 1.0);
}

#[test]
fn test_small_disk_rejected_as_noise() {
    let frame = common::disks_frame(60, 60, &[(30.0, 30.0, 5.0)]);
    let found = detect_contours(&frame, &ContourParams::default()).unwrap();
    assert!(found.is_empty(), "candidates: {found:?}");
}

#[test]
fn test_radius_filter_truncates() {
    assert!(!passes_radius_filter(10.0, 10));
    assert!(!passes_radius_filter(10.9, 10));
    assert!(passes_radius_filter(11.0, 10));
}

#[test]
fn test_detector_declares_raw_input() {
    let config = DetectorConfig::Contour(ContourParams::default());
    let detector = build_detector(&config, 0.7).unwrap();
    assert_eq!(detector.name(), "contour");
    assert_eq!(detector.input(), DetectorInput::Raw);
}
