mod common;

use common::fixtures::{as_dynamic, blank_sheet, with_ink};
use sheetdiff::{DetectionConfig, RegionDetector};

fn detector_for(reference: image::RgbImage) -> RegionDetector {
    RegionDetector::new(&as_dynamic(reference), DetectionConfig::default())
        .expect("detector construction")
}

#[test]
fn identical_sheets_produce_empty_region_set() {
    let reference = blank_sheet(200, 200);
    let detector = detector_for(reference.clone());

    let result = detector.detect(&as_dynamic(reference)).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.normalized.dimensions(), (200, 200));
}

#[test]
fn single_ink_block_yields_one_region_around_it() {
    let detector = detector_for(blank_sheet(200, 200));
    let candidate = with_ink(blank_sheet(200, 200), 30, 40, 50, 20);

    let result = detector.detect(&as_dynamic(candidate)).unwrap();
    assert_eq!(result.regions.len(), 1);

    let region = &result.regions[0];
    // The box must loosely contain the ink, within the dilation margin.
    assert!(region.x <= 30);
    assert!(region.y <= 40 && region.y >= 30);
    assert!(region.right() >= 80 && region.right() <= 145);
    assert!(region.bottom() >= 60 && region.bottom() <= 70);
}

#[test]
fn words_on_one_line_merge_into_one_region() {
    let detector = detector_for(blank_sheet(300, 200));
    // Two ink blocks on the same row, 60 px apart: narrower than the
    // line-merge kernel, so they become one region.
    let candidate = with_ink(
        with_ink(blank_sheet(300, 200), 30, 40, 30, 15),
        120,
        40,
        30,
        15,
    );

    let result = detector.detect(&as_dynamic(candidate)).unwrap();
    assert_eq!(result.regions.len(), 1);
    assert!(result.regions[0].x <= 30);
    assert!(result.regions[0].right() >= 150);
}

#[test]
fn separate_rows_stay_separate_and_ordered() {
    let detector = detector_for(blank_sheet(200, 300));
    let candidate = with_ink(
        with_ink(blank_sheet(200, 300), 50, 150, 60, 15),
        50,
        40,
        60,
        15,
    );

    let result = detector.detect(&as_dynamic(candidate)).unwrap();
    assert_eq!(result.regions.len(), 2);
    assert!(result.regions[0].y < result.regions[1].y);
    assert!(result.regions[0].bottom() <= 150);
    assert!(result.regions[1].y >= 100);
}

#[test]
fn regions_satisfy_ordering_area_and_bounds_invariants() {
    let detector = detector_for(blank_sheet(250, 400));
    let candidate = with_ink(
        with_ink(
            with_ink(blank_sheet(250, 400), 40, 300, 80, 18),
            30,
            60,
            100,
            20,
        ),
        60,
        180,
        50,
        15,
    );

    let result = detector.detect(&as_dynamic(candidate)).unwrap();
    assert_eq!(result.regions.len(), 3);

    let config = DetectionConfig::default();
    for pair in result.regions.windows(2) {
        assert!(pair[0].y <= pair[1].y);
    }
    for region in &result.regions {
        assert!(region.area() > config.min_region_area);
        assert!(region.right() <= 250);
        assert!(region.bottom() <= 400);
    }
}

#[test]
fn detection_is_deterministic() {
    let detector = detector_for(blank_sheet(200, 200));
    let candidate = as_dynamic(with_ink(blank_sheet(200, 200), 30, 40, 50, 20));

    let first = detector.detect(&candidate).unwrap();
    let second = detector.detect(&candidate).unwrap();
    assert_eq!(first.regions, second.regions);
}

#[test]
fn oversized_candidate_is_normalized_to_reference_geometry() {
    let detector = detector_for(blank_sheet(200, 200));
    // Same sheet scanned at twice the resolution.
    let candidate = with_ink(blank_sheet(400, 400), 60, 80, 100, 40);

    let result = detector.detect(&as_dynamic(candidate)).unwrap();
    assert_eq!(result.normalized.dimensions(), (200, 200));
    assert_eq!(result.regions.len(), 1);

    let region = &result.regions[0];
    assert!(region.x <= 30);
    assert!(region.y <= 40 && region.y >= 30);
    assert!(region.right() >= 80);
    assert!(region.bottom() >= 60 && region.bottom() <= 70);
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    let config = DetectionConfig {
        diff_threshold: 0,
        ..Default::default()
    };
    let err = RegionDetector::new(&as_dynamic(blank_sheet(50, 50)), config).unwrap_err();
    assert!(!err.is_recoverable());
}
