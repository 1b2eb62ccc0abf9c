mod common;

use approx::assert_abs_diff_eq;

use crater_core::detection::template::detect_template;
use crater_core::detection::{TemplateParams, TemplateSource};

#[test]
fn test_self_template_is_single_perfect_match() {
    let frame = common::textured_frame(30, 40);
    let found = detect_template(&frame, &TemplateParams::default(), 0.7).unwrap();

    assert_eq!(found.len(), 1);
    let c = &found[0];
    assert_eq!((c.x, c.y), (20, 15));
    assert_eq!(c.radius, None);
    assert_abs_diff_eq!(c.confidence, 1.0, epsilon = 1e-4);
}

#[test]
fn test_constant_frame_matches_itself() {
    // All foreground, as a fully bright image looks after thresholding.
    let frame = common::disks_frame(20, 20, &[(10.0, 10.0, 40.0)]);
    let found = detect_template(&frame, &TemplateParams::default(), 0.99).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!((found[0].x, found[0].y), (10, 10));
    assert_eq!(found[0].confidence, 1.0);
}

#[test]
fn test_disk_template_peaks_at_disk_center() {
    let frame = common::disks_frame(60, 60, &[(30.0, 25.0, 6.0)]);
    let params = TemplateParams {
        source: TemplateSource::Disk { radius: 6 },
    };
    let found = detect_template(&frame, &params, 0.99).unwrap();
    assert_eq!(found.len(), 1, "candidates: {found:?}");
    assert_eq!((found[0].x, found[0].y), (30, 25));
}

#[test]
fn test_raising_threshold_never_adds_candidates() {
    let frame = common::disks_frame(60, 80, &[(20.0, 30.0, 6.0), (55.0, 30.0, 8.0)]);
    let params = TemplateParams {
        source: TemplateSource::Disk { radius: 6 },
    };
    let mut previous = usize::MAX;
    for threshold in [0.0, 0.3, 0.5, 0.7, 0.9, 1.0] {
        let count = detect_template(&frame, &params, threshold).unwrap().len();
        assert!(count <= previous, "threshold {threshold}: {count} > {previous}");
        previous = count;
    }
}
