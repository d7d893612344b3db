//! PNG loading and Otsu binarization of greyscale input
//!
//! Input images are reduced to 8-bit greyscale and thresholded at the grey
//! level maximizing between-class variance. Pixels strictly above the
//! threshold become foreground.

use std::path::Path;

use crate::io::configuration::GREY_LEVELS;
use crate::io::error::{EvaluationError, Result, invalid_source_data};
use crate::spatial::grid::BinaryImage;

/// Load a PNG file and binarize it with Otsu's method
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has a single grey level and cannot be split
pub fn load_binary_image<P: AsRef<Path>>(path: P) -> Result<BinaryImage> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| EvaluationError::ImageLoad {
        path: path_buf,
        source: e,
    })?;

    let luma = img.to_luma8();
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    binarize(luma.as_raw(), height, width)
}

/// Threshold greyscale pixels into a binary image
///
/// # Errors
///
/// Returns an error if the pixels have a single grey level or the
/// dimensions don't match the pixel count
pub fn binarize(pixels: &[u8], height: usize, width: usize) -> Result<BinaryImage> {
    let threshold = otsu_threshold(pixels)?;
    let bits: Vec<u8> = pixels.iter().map(|&p| u8::from(p > threshold)).collect();
    BinaryImage::from_bits(&bits, height, width)
}

/// Grey level maximizing between-class variance
///
/// Pixels at or below the returned level form the background class.
///
/// # Errors
///
/// Returns an error if the input is empty or every pixel shares one grey
/// level, leaving nothing to split
pub fn otsu_threshold(pixels: &[u8]) -> Result<u8> {
    if pixels.is_empty() {
        return Err(invalid_source_data(&"image contains no pixels"));
    }

    let mut histogram = [0u64; GREY_LEVELS];
    for &pixel in pixels {
        if let Some(bin) = histogram.get_mut(pixel as usize) {
            *bin += 1;
        }
    }

    let total_count = pixels.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut best_threshold = None;
    let mut best_variance = 0.0;
    let mut background_count = 0u64;
    let mut background_sum = 0.0;

    // The top level can never split: its foreground class would be empty
    for (level, &count) in histogram.iter().enumerate().take(GREY_LEVELS - 1) {
        background_count += count;
        background_sum += level as f64 * count as f64;

        let foreground_count = pixels.len() as u64 - background_count;
        if background_count == 0 || foreground_count == 0 {
            continue;
        }

        let background_weight = background_count as f64;
        let foreground_weight = total_count - background_weight;
        let background_mean = background_sum / background_weight;
        let foreground_mean = (total_sum - background_sum) / foreground_weight;
        let separation = background_mean - foreground_mean;
        let variance = background_weight * foreground_weight * separation * separation;

        if variance > best_variance {
            best_variance = variance;
            best_threshold = Some(level as u8);
        }
    }

    best_threshold
        .ok_or_else(|| invalid_source_data(&"image has a single grey level, cannot binarize"))
}
