//! Tests for multiresolution bundle construction and level-averaged distances

use multipoint::EvaluationError;
use multipoint::analysis::patterns::build_histogram;
use multipoint::analysis::resolution::{
    build_multires_histograms, bundle_distance, validate_factors,
};
use multipoint::math::divergence::jensen_shannon;
use multipoint::spatial::grid::BinaryImage;
use multipoint::spatial::pyramid::{TieBreak, downsample};

fn checkerboard(size: usize) -> BinaryImage {
    BinaryImage::from_fn(size, size, |row, col| (row + col) % 2 == 0).unwrap()
}

#[test]
fn test_factor_validation() {
    assert!(validate_factors(&[1, 2, 4]).is_ok());
    assert!(validate_factors(&[]).is_err());
    assert!(validate_factors(&[1, 0]).is_err());
    assert!(validate_factors(&[1, 2, 2]).is_err());
}

#[test]
fn test_single_factor_matches_plain_histogram() {
    let image = checkerboard(8);
    let bundle = build_multires_histograms(&image, 2, &[1], TieBreak::Zero).unwrap();

    assert_eq!(bundle.levels().len(), 1);
    assert!(bundle.skipped().is_empty());

    let direct = build_histogram(&image, 2).unwrap();
    let level = bundle.level(1).unwrap();
    assert_eq!(level.histogram.bins(), direct.bins());
}

#[test]
fn test_small_levels_are_skipped_not_zeroed() {
    // 8x8 at factor 4 is 2x2, below the 3x3 patch
    let image = checkerboard(8);
    let bundle = build_multires_histograms(&image, 3, &[1, 2, 4], TieBreak::Zero).unwrap();

    assert_eq!(bundle.levels().len(), 2);
    assert_eq!(bundle.skipped().len(), 1);

    let skipped = bundle.skipped().first().copied().unwrap();
    assert_eq!(skipped.factor, 4);
    assert_eq!(skipped.dimensions, (2, 2));
    assert!(bundle.level(4).is_none());
}

#[test]
fn test_every_level_skipped_is_an_error() {
    let image = checkerboard(4);
    let result = build_multires_histograms(&image, 3, &[2], TieBreak::Zero);
    assert!(matches!(
        result,
        Err(EvaluationError::InvalidParameter { .. })
    ));
}

#[test]
fn test_bundle_distance_of_identical_images_is_zero() {
    let image = checkerboard(8);
    let a = build_multires_histograms(&image, 2, &[1, 2], TieBreak::Zero).unwrap();
    let b = build_multires_histograms(&image, 2, &[1, 2], TieBreak::Zero).unwrap();

    let distance = bundle_distance(&a, &b).unwrap();
    assert!(distance.abs() < 1e-12);
}

#[test]
fn test_bundle_distance_averages_matching_levels() {
    let left = checkerboard(8);
    let right = BinaryImage::from_fn(8, 8, |row, _| row % 2 == 0).unwrap();

    let factors = [1usize, 2];
    let a = build_multires_histograms(&left, 2, &factors, TieBreak::Zero).unwrap();
    let b = build_multires_histograms(&right, 2, &factors, TieBreak::Zero).unwrap();

    // Recompute each level's divergence directly and average by hand
    let mut expected = 0.0;
    for &factor in &factors {
        let reduced_left = downsample(&left, factor, TieBreak::Zero).unwrap();
        let reduced_right = downsample(&right, factor, TieBreak::Zero).unwrap();
        let p = build_histogram(&reduced_left, 2)
            .unwrap()
            .to_probabilities()
            .unwrap();
        let q = build_histogram(&reduced_right, 2)
            .unwrap()
            .to_probabilities()
            .unwrap();
        expected += jensen_shannon(&p, &q).unwrap();
    }
    expected /= factors.len() as f64;

    let distance = bundle_distance(&a, &b).unwrap();
    assert!((distance - expected).abs() < 1e-12);
}

#[test]
fn test_disjoint_factor_lists_share_no_level() {
    let image = checkerboard(8);
    let a = build_multires_histograms(&image, 2, &[1], TieBreak::Zero).unwrap();
    let b = build_multires_histograms(&image, 2, &[2], TieBreak::Zero).unwrap();

    assert!(matches!(
        bundle_distance(&a, &b),
        Err(EvaluationError::NoCommonResolution)
    ));
}
