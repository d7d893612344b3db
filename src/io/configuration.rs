//! Evaluation constants and runtime configuration defaults

/// Patch side length used when none is specified
pub const DEFAULT_PATCH_SIZE: usize = 4;

/// Resolution factor list used when none is specified (single full-resolution level)
pub const DEFAULT_RESOLUTION_FACTORS: &[usize] = &[1];

// The pattern space grows as 2^(n^2), so the bin table must be capped
/// Maximum number of histogram bins, limiting the patch area to 26 bits
pub const MAX_HISTOGRAM_BINS: usize = 1 << 26;

/// Tolerance for probability vectors summing to one
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// Number of intensity levels in 8-bit greyscale input
pub const GREY_LEVELS: usize = 256;

/// Decimal places used when printing scores
pub const SCORE_PRECISION: usize = 6;

/// Label shown once batch evaluation completes
pub const PROGRESS_FINISH_MESSAGE: &str = "All images processed";
