//! Block-majority downsampling for multiresolution analysis
//!
//! Each downsampling factor `f` partitions the image into `f`x`f` blocks
//! (truncated at the right and bottom edges) and reduces every block to a
//! single bit by majority vote. The tie-break direction is a fixed policy
//! per run.

use std::cmp::Ordering;

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::BinaryImage;

/// Direction a block majority vote resolves to when exactly half the bits are set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Ties become background
    #[default]
    Zero,
    /// Ties become foreground
    One,
}

/// Dimensions of the image produced by downsampling at `factor`
///
/// Returns `None` for a zero factor.
pub const fn downsampled_dimensions(
    dimensions: (usize, usize),
    factor: usize,
) -> Option<(usize, usize)> {
    if factor == 0 {
        return None;
    }
    Some((dimensions.0.div_ceil(factor), dimensions.1.div_ceil(factor)))
}

/// Reduce an image by `factor` using block-majority voting
///
/// A factor of 1 returns an identical copy. Edge blocks that extend past
/// the image are voted over their truncated extent.
///
/// # Errors
///
/// Returns an error if `factor` is zero
pub fn downsample(image: &BinaryImage, factor: usize, tie_break: TieBreak) -> Result<BinaryImage> {
    if factor == 0 {
        return Err(invalid_parameter(
            "resolution_factor",
            &factor,
            &"downsampling factor must be positive",
        ));
    }

    if factor == 1 {
        return Ok(image.clone());
    }

    let (height, width) = image.dimensions();
    let out_rows = height.div_ceil(factor);
    let out_cols = width.div_ceil(factor);

    BinaryImage::from_fn(out_rows, out_cols, |row, col| {
        let row_start = row * factor;
        let col_start = col * factor;
        let row_end = (row_start + factor).min(height);
        let col_end = (col_start + factor).min(width);

        let mut ones = 0usize;
        let mut cells = 0usize;
        for r in row_start..row_end {
            for c in col_start..col_end {
                cells += 1;
                if image.get(r, c).unwrap_or(false) {
                    ones += 1;
                }
            }
        }

        match (2 * ones).cmp(&cells) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => matches!(tie_break, TieBreak::One),
        }
    })
}
