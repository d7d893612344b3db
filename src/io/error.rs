//! Error types for evaluation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all evaluation operations
#[derive(Debug)]
pub enum EvaluationError {
    /// Failed to load an input image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Input data doesn't meet evaluation requirements
    InvalidSourceData {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// A pixel value outside {0, 1} was supplied as binary data
    InvalidPixel {
        /// The offending pixel value
        value: u8,
        /// Row and column where the value was found
        position: [usize; 2],
    },

    /// An image in a set doesn't match the set's dimensions
    DimensionMismatch {
        /// Dimensions shared by the rest of the set (rows, cols)
        expected: (usize, usize),
        /// Dimensions of the offending image (rows, cols)
        found: (usize, usize),
        /// Position of the offending image in the set
        index: usize,
    },

    /// A scoring operation was requested on an empty image set
    EmptyImageSet,

    /// Evaluation parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Two histograms passed to a divergence have different lengths
    ShapeMismatch {
        /// Length of the first histogram
        left: usize,
        /// Length of the second histogram
        right: usize,
    },

    /// A probability histogram does not sum to one
    NotNormalized {
        /// The actual sum of the histogram entries
        sum: f64,
    },

    /// Two multiresolution bundles share no resolution level
    NoCommonResolution,

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidPixel { value, position } => {
                write!(
                    f,
                    "Pixel value {value} at ({}, {}) is not binary",
                    position[0], position[1]
                )
            }
            Self::DimensionMismatch {
                expected,
                found,
                index,
            } => {
                write!(
                    f,
                    "Image {index} is {}x{} but the set is {}x{}",
                    found.0, found.1, expected.0, expected.1
                )
            }
            Self::EmptyImageSet => {
                write!(f, "Image set must contain at least one image")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ShapeMismatch { left, right } => {
                write!(f, "Histogram lengths differ: {left} vs {right}")
            }
            Self::NotNormalized { sum } => {
                write!(f, "Histogram sums to {sum}, expected 1")
            }
            Self::NoCommonResolution => {
                write!(f, "Multiresolution bundles share no resolution level")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for EvaluationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for evaluation results
pub type Result<T> = std::result::Result<T, EvaluationError>;

impl From<image::ImageError> for EvaluationError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for EvaluationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EvaluationError {
    EvaluationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source_data(reason: &impl ToString) -> EvaluationError {
    EvaluationError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
