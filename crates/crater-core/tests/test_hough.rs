mod common;

use crater_core::detection::hough::detect_hough;
use crater_core::detection::{build_detector, DetectorConfig, DetectorInput, HoughParams};

#[test]
fn test_single_disk_found_once() {
    let frame = common::reference_disk();
    let found = detect_hough(&frame, &HoughParams::default(), 0.7).unwrap();

    assert_eq!(found.len(), 1, "candidates: {found:?}");
    let c = &found[0];
    assert!((c.x as i64 - 50).abs() <= 2, "x = {}", c.x);
    assert!((c.y as i64 - 50).abs() <= 2, "y = {}", c.y);
    let r = c.radius.expect("Hough candidates carry a radius");
    assert!((r as i64 - 20).abs() <= 2, "r = {r}");
    assert_eq!(c.confidence, 0.7);
}

#[test]
fn test_two_separated_disks() {
    let frame = common::disks_frame(100, 160, &[(40.0, 50.0, 18.0), (120.0, 50.0, 14.0)]);
    let mut found = detect_hough(&frame, &HoughParams::default(), 0.7).unwrap();
    found.sort_by_key(|c| c.x);

    assert_eq!(found.len(), 2, "candidates: {found:?}");
    assert!((found[0].x as i64 - 40).abs() <= 2);
    assert!((found[1].x as i64 - 120).abs() <= 2);
}

#[test]
fn test_raising_threshold_never_adds_candidates() {
    let frame = common::disks_frame(100, 160, &[(40.0, 50.0, 18.0), (120.0, 50.0, 12.0)]);
    let params = HoughParams::default();
    let mut previous = usize::MAX;
    for threshold in [0.0, 0.2, 0.4, 0.6, 0.8, 0.9, 1.0] {
        let count = detect_hough(&frame, &params, threshold).unwrap().len();
        assert!(count <= previous, "threshold {threshold}: {count} > {previous}");
        previous = count;
    }
}

#[test]
fn test_tiny_frame_is_empty_result() {
    let frame = common::disks_frame(2, 2, &[]);
    assert!(detect_hough(&frame, &HoughParams::default(), 0.5).unwrap().is_empty());
}

#[test]
fn test_detector_declares_preprocessed_input() {
    let detector = build_detector(&DetectorConfig::default(), 0.7).unwrap();
    assert_eq!(detector.name(), "hough");
    assert_eq!(detector.input(), DetectorInput::Preprocessed);
}
