//! Tests for error message formatting and source chaining

use multipoint::EvaluationError;
use multipoint::io::error::{invalid_parameter, invalid_source_data};
use std::error::Error;
use std::path::PathBuf;

#[test]
fn test_invalid_parameter_message() {
    let error = invalid_parameter("patch_size", &0, &"patch size must be positive");
    assert_eq!(
        error.to_string(),
        "Invalid parameter 'patch_size' = '0': patch size must be positive"
    );
}

#[test]
fn test_invalid_source_data_message() {
    let error = invalid_source_data(&"no candidate PNG images found");
    assert_eq!(
        error.to_string(),
        "Invalid source data: no candidate PNG images found"
    );
}

#[test]
fn test_dimension_mismatch_message() {
    let error = EvaluationError::DimensionMismatch {
        expected: (64, 64),
        found: (32, 64),
        index: 3,
    };
    assert_eq!(error.to_string(), "Image 3 is 32x64 but the set is 64x64");
}

#[test]
fn test_invalid_pixel_message() {
    let error = EvaluationError::InvalidPixel {
        value: 7,
        position: [2, 5],
    };
    assert_eq!(error.to_string(), "Pixel value 7 at (2, 5) is not binary");
}

#[test]
fn test_no_common_resolution_message() {
    assert_eq!(
        EvaluationError::NoCommonResolution.to_string(),
        "Multiresolution bundles share no resolution level"
    );
}

#[test]
fn test_file_system_error_chains_its_source() {
    let error = EvaluationError::FileSystem {
        path: PathBuf::from("out.csv"),
        operation: "write matrix",
        source: std::io::Error::other("disk full"),
    };

    assert!(error.source().is_some());
    assert!(error.to_string().contains("write matrix"));
    assert!(error.to_string().contains("out.csv"));
}

#[test]
fn test_validation_errors_have_no_source() {
    assert!(EvaluationError::EmptyImageSet.source().is_none());
    assert!(
        EvaluationError::NotNormalized { sum: 0.9 }
            .source()
            .is_none()
    );
}
