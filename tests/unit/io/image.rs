//! Tests for Otsu thresholding and PNG loading

use multipoint::EvaluationError;
use multipoint::io::image::{binarize, load_binary_image, otsu_threshold};

#[test]
fn test_bimodal_pixels_split_cleanly() {
    let mut pixels = vec![10u8; 8];
    pixels.extend(vec![200u8; 8]);

    let threshold = otsu_threshold(&pixels).unwrap();
    assert!((10..200).contains(&threshold));

    let image = binarize(&pixels, 4, 4).unwrap();
    assert_eq!(image.count_ones(), 8);
}

#[test]
fn test_constant_image_cannot_be_binarized() {
    let pixels = vec![128u8; 16];
    assert!(matches!(
        otsu_threshold(&pixels),
        Err(EvaluationError::InvalidSourceData { .. })
    ));
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(otsu_threshold(&[]).is_err());
}

#[test]
fn test_binarize_preserves_layout() {
    // Dark left column, bright right column
    let pixels = vec![20u8, 230, 20, 230];
    let image = binarize(&pixels, 2, 2).unwrap();

    assert_eq!(image.get(0, 0), Some(false));
    assert_eq!(image.get(0, 1), Some(true));
    assert_eq!(image.get(1, 0), Some(false));
    assert_eq!(image.get(1, 1), Some(true));
}

#[test]
fn test_png_roundtrip_through_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.png");

    // 3 wide, 2 tall: dark first column, bright elsewhere
    let raw = vec![15u8, 240, 240, 15, 240, 240];
    let gray = image::GrayImage::from_raw(3, 2, raw).unwrap();
    gray.save(&path).unwrap();

    let loaded = load_binary_image(&path).unwrap();
    assert_eq!(loaded.dimensions(), (2, 3));
    assert_eq!(loaded.get(0, 0), Some(false));
    assert_eq!(loaded.get(0, 1), Some(true));
    assert_eq!(loaded.get(1, 2), Some(true));
    assert_eq!(loaded.count_ones(), 4);
}

#[test]
fn test_missing_file_reports_its_path() {
    let result = load_binary_image("definitely/not/here.png");

    match result {
        Err(EvaluationError::ImageLoad { path, .. }) => {
            assert!(path.ends_with("here.png"));
        }
        _ => unreachable!("Expected ImageLoad error"),
    }
}
