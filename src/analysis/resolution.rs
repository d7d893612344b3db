//! Multiresolution histogram bundles and level-averaged distances
//!
//! Large patch sizes are impractical because the pattern space grows as
//! `2^(n^2)`. Instead of growing the patch, the image is downsampled at a
//! list of factors and scanned with the same small base patch at each
//! level. The distance between two images is then the mean divergence
//! across matching levels, which reduces to the single-resolution case for
//! a factor list of `[1]`.

use crate::analysis::patterns::{PatternHistogram, build_histogram, validate_patch_size};
use crate::io::error::{EvaluationError, Result, invalid_parameter};
use crate::math::divergence::jensen_shannon;
use crate::spatial::grid::BinaryImage;
use crate::spatial::pyramid::{TieBreak, downsample, downsampled_dimensions};

/// A resolution level omitted because its image became smaller than the patch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkippedLevel {
    /// The downsampling factor that was requested
    pub factor: usize,
    /// The too-small dimensions the factor would have produced
    pub dimensions: (usize, usize),
}

/// Histogram computed from one downsampled copy of an image
#[derive(Clone, Debug)]
pub struct ResolutionLevel {
    /// Downsampling factor this level was computed at
    pub factor: usize,
    /// Raw pattern counts at this level
    pub histogram: PatternHistogram,
    probabilities: Vec<f64>,
}

impl ResolutionLevel {
    /// Normalized pattern probabilities, cached at construction
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
}

/// Per-level histograms for one image, plus the levels that were skipped
#[derive(Clone, Debug)]
pub struct MultiresHistogram {
    levels: Vec<ResolutionLevel>,
    skipped: Vec<SkippedLevel>,
}

impl MultiresHistogram {
    /// Levels that produced a histogram, in factor-list order
    pub fn levels(&self) -> &[ResolutionLevel] {
        &self.levels
    }

    /// Levels omitted because the downsampled image was smaller than the patch
    pub fn skipped(&self) -> &[SkippedLevel] {
        &self.skipped
    }

    /// Look up the level computed at a given factor
    pub fn level(&self, factor: usize) -> Option<&ResolutionLevel> {
        self.levels.iter().find(|level| level.factor == factor)
    }
}

/// Check a downsampling factor list
///
/// # Errors
///
/// Returns an error if the list is empty, contains zero, or repeats a factor
pub fn validate_factors(factors: &[usize]) -> Result<()> {
    if factors.is_empty() {
        return Err(invalid_parameter(
            "resolution_factors",
            &"[]",
            &"factor list must be non-empty",
        ));
    }

    for (index, &factor) in factors.iter().enumerate() {
        if factor == 0 {
            return Err(invalid_parameter(
                "resolution_factors",
                &factor,
                &"downsampling factors must be positive",
            ));
        }
        if factors.get(..index).is_some_and(|seen| seen.contains(&factor)) {
            return Err(invalid_parameter(
                "resolution_factors",
                &factor,
                &"downsampling factors must be distinct",
            ));
        }
    }

    Ok(())
}

/// Build one histogram per resolution level for an image
///
/// Levels whose downsampled image is smaller than the patch on either side
/// are recorded as skipped rather than producing a degenerate histogram.
///
/// # Errors
///
/// Returns an error if:
/// - The factor list fails [`validate_factors`]
/// - The patch size is invalid for the full-resolution image
/// - Every requested level ends up skipped
pub fn build_multires_histograms(
    image: &BinaryImage,
    patch_size: usize,
    factors: &[usize],
    tie_break: TieBreak,
) -> Result<MultiresHistogram> {
    validate_factors(factors)?;
    validate_patch_size(patch_size, image.dimensions())?;

    let mut levels = Vec::new();
    let mut skipped = Vec::new();

    for &factor in factors {
        let dimensions = downsampled_dimensions(image.dimensions(), factor).unwrap_or((0, 0));
        if dimensions.0 < patch_size || dimensions.1 < patch_size {
            skipped.push(SkippedLevel { factor, dimensions });
            continue;
        }

        let reduced = downsample(image, factor, tie_break)?;
        let histogram = build_histogram(&reduced, patch_size)?;
        let probabilities = histogram.to_probabilities()?;
        levels.push(ResolutionLevel {
            factor,
            histogram,
            probabilities,
        });
    }

    if levels.is_empty() {
        return Err(invalid_parameter(
            "resolution_factors",
            &format!("{factors:?}"),
            &"every level shrinks the image below the patch size",
        ));
    }

    Ok(MultiresHistogram { levels, skipped })
}

/// Mean divergence across the resolution levels two bundles share
///
/// # Errors
///
/// Returns an error if the bundles share no level, or if a shared level's
/// histograms fail divergence validation
pub fn bundle_distance(a: &MultiresHistogram, b: &MultiresHistogram) -> Result<f64> {
    let mut sum = 0.0;
    let mut matched = 0usize;

    for level in a.levels() {
        if let Some(other) = b.level(level.factor) {
            sum += jensen_shannon(level.probabilities(), other.probabilities())?;
            matched += 1;
        }
    }

    if matched == 0 {
        return Err(EvaluationError::NoCommonResolution);
    }

    Ok(sum / matched as f64)
}
