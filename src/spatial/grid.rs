//! Binary image storage with packed row-major bit representation
//!
//! Images are immutable once constructed. Every constructor validates its
//! input, so downstream pattern scanning never needs to re-check pixel values.

use bitvec::prelude::*;
use ndarray::Array2;

use crate::io::error::{EvaluationError, Result, invalid_parameter};

/// Immutable two-dimensional grid of bits
///
/// Rows are stored contiguously, so a pixel at `(row, col)` lives at bit
/// index `row * width + col`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    bits: BitVec,
    height: usize,
    width: usize,
}

impl BinaryImage {
    /// Build an image by evaluating a function at every pixel position
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn from_fn<F>(height: usize, width: usize, mut pixel: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        Self::validate_dimensions(height, width)?;

        let mut bits = BitVec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                bits.push(pixel(row, col));
            }
        }

        Ok(Self {
            bits,
            height,
            width,
        })
    }

    /// Build an image from a row-major slice of {0, 1} values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The slice length doesn't equal `height * width`
    /// - Any value is outside {0, 1}
    pub fn from_bits(values: &[u8], height: usize, width: usize) -> Result<Self> {
        Self::validate_dimensions(height, width)?;

        if values.len() != height * width {
            return Err(invalid_parameter(
                "values",
                &values.len(),
                &format!("expected {} values for a {height}x{width} image", height * width),
            ));
        }

        let mut bits = BitVec::with_capacity(values.len());
        for (index, &value) in values.iter().enumerate() {
            match value {
                0 => bits.push(false),
                1 => bits.push(true),
                other => {
                    return Err(EvaluationError::InvalidPixel {
                        value: other,
                        position: [index / width, index % width],
                    });
                }
            }
        }

        Ok(Self {
            bits,
            height,
            width,
        })
    }

    /// Build an image from a 2D array of {0, 1} values
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or any value is
    /// outside {0, 1}
    pub fn from_array(grid: &Array2<u8>) -> Result<Self> {
        let (height, width) = grid.dim();
        Self::validate_dimensions(height, width)?;

        let mut bits = BitVec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                match grid.get((row, col)).copied().unwrap_or(0) {
                    0 => bits.push(false),
                    1 => bits.push(true),
                    other => {
                        return Err(EvaluationError::InvalidPixel {
                            value: other,
                            position: [row, col],
                        });
                    }
                }
            }
        }

        Ok(Self {
            bits,
            height,
            width,
        })
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Read the pixel at `(row, col)`, or `None` outside the image
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.bits.get(row * self.width + col).map(|bit| *bit)
    }

    /// Count of pixels set to one
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    fn validate_dimensions(height: usize, width: usize) -> Result<()> {
        if height == 0 || width == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{height}x{width}"),
                &"image dimensions must be positive",
            ));
        }
        Ok(())
    }
}
