//! Pattern encoding and sliding-window histogram construction
//!
//! An `n`x`n` binary patch is read in row-major order, first bit most
//! significant, and interpreted as an `n^2`-bit integer. This is a bijection
//! between patches and `[0, 2^(n^2))`, so counting pattern IDs over every
//! stride-1 window position summarizes the local structure of an image.

use ndarray::ArrayView2;

use crate::io::configuration::MAX_HISTOGRAM_BINS;
use crate::io::error::{EvaluationError, Result, invalid_parameter};
use crate::math::divergence::normalize_counts;
use crate::spatial::grid::BinaryImage;

/// Pattern counts observed by scanning an image at a fixed patch size
///
/// Holds one bin per possible pattern, indexed by pattern ID. The raw
/// integer counts are kept for accumulation; [`Self::to_probabilities`]
/// produces the normalized form used for distance computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternHistogram {
    patch_size: usize,
    counts: Vec<u64>,
    total_patches: u64,
}

impl PatternHistogram {
    /// Patch side length this histogram was built with
    pub const fn patch_size(&self) -> usize {
        self.patch_size
    }

    /// Raw occurrence counts, indexed by pattern ID
    pub fn bins(&self) -> &[u64] {
        &self.counts
    }

    /// Number of bins, always `2^(patch_size^2)`
    pub const fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the histogram has no bins (never true for a built histogram)
    pub const fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of window positions scanned, equal to the sum of all bins
    pub const fn total_patches(&self) -> u64 {
        self.total_patches
    }

    /// Normalize the counts into a probability vector summing to one
    ///
    /// # Errors
    ///
    /// Returns an error if no patches were counted
    pub fn to_probabilities(&self) -> Result<Vec<f64>> {
        normalize_counts(&self.counts)
    }
}

/// Encode a square binary patch as its pattern ID
///
/// The patch is read row by row, left to right, with the first bit landing
/// in the most significant position.
///
/// # Errors
///
/// Returns an error if:
/// - The patch is not square or is empty
/// - The patch area exceeds 64 bits
/// - Any value is outside {0, 1}
pub fn encode_pattern(patch: &ArrayView2<'_, u8>) -> Result<u64> {
    let (rows, cols) = patch.dim();
    if rows != cols || rows == 0 {
        return Err(invalid_parameter(
            "patch",
            &format!("{rows}x{cols}"),
            &"patch must be square and non-empty",
        ));
    }
    if rows * cols > u64::BITS as usize {
        return Err(invalid_parameter(
            "patch",
            &format!("{rows}x{cols}"),
            &"pattern ID does not fit in 64 bits",
        ));
    }

    let mut id = 0u64;
    for row in 0..rows {
        for col in 0..cols {
            let bit = match patch.get((row, col)).copied().unwrap_or(0) {
                0 => 0,
                1 => 1,
                other => {
                    return Err(EvaluationError::InvalidPixel {
                        value: other,
                        position: [row, col],
                    });
                }
            };
            id = (id << 1) | bit;
        }
    }

    Ok(id)
}

/// Check a patch size against an image's dimensions
///
/// # Errors
///
/// Returns an error if:
/// - The patch size is zero
/// - The pattern space would exceed [`MAX_HISTOGRAM_BINS`]
/// - The patch exceeds the image on either side
pub fn validate_patch_size(patch_size: usize, dimensions: (usize, usize)) -> Result<()> {
    if patch_size == 0 {
        return Err(invalid_parameter(
            "patch_size",
            &patch_size,
            &"patch size must be positive",
        ));
    }

    let max_pattern_bits = MAX_HISTOGRAM_BINS.trailing_zeros() as usize;
    if patch_size * patch_size > max_pattern_bits {
        return Err(invalid_parameter(
            "patch_size",
            &patch_size,
            &format!("pattern space 2^{} exceeds the bin cap", patch_size * patch_size),
        ));
    }

    let (height, width) = dimensions;
    if patch_size > height || patch_size > width {
        return Err(invalid_parameter(
            "patch_size",
            &patch_size,
            &format!("patch exceeds image dimensions {height}x{width}"),
        ));
    }

    Ok(())
}

/// Count pattern occurrences over every stride-1 window of an image
///
/// Edge positions where the patch would overhang the image are not
/// visited, so the total patch count is exactly
/// `(H - n + 1) * (W - n + 1)`.
///
/// # Errors
///
/// Returns an error if the patch size fails [`validate_patch_size`]
pub fn build_histogram(image: &BinaryImage, patch_size: usize) -> Result<PatternHistogram> {
    validate_patch_size(patch_size, image.dimensions())?;

    let (height, width) = image.dimensions();
    let bins = 1usize << (patch_size * patch_size);
    let mut counts = vec![0u64; bins];

    for row in 0..=(height - patch_size) {
        for col in 0..=(width - patch_size) {
            let id = encode_window(image, row, col, patch_size) as usize;
            if let Some(count) = counts.get_mut(id) {
                *count += 1;
            }
        }
    }

    let total_patches = ((height - patch_size + 1) * (width - patch_size + 1)) as u64;

    Ok(PatternHistogram {
        patch_size,
        counts,
        total_patches,
    })
}

// Window contents are valid bits by construction, so no value check here
fn encode_window(image: &BinaryImage, row: usize, col: usize, patch_size: usize) -> u64 {
    let mut id = 0u64;
    for r in row..row + patch_size {
        for c in col..col + patch_size {
            id = (id << 1) | u64::from(image.get(r, c).unwrap_or(false));
        }
    }
    id
}
