//! Image set evaluation with memoized histograms
//!
//! Every image's histogram bundle is computed exactly once, at set
//! construction, and reused by every score and matrix computation. The
//! pairwise stage is then pure lookup plus divergence work, never repeated
//! histogram scanning.

use ndarray::Array2;

use crate::analysis::resolution::{
    MultiresHistogram, SkippedLevel, build_multires_histograms, bundle_distance,
};
use crate::io::configuration::{DEFAULT_PATCH_SIZE, DEFAULT_RESOLUTION_FACTORS};
use crate::io::error::{EvaluationError, Result};
use crate::spatial::grid::BinaryImage;
use crate::spatial::pyramid::TieBreak;

/// Settings threaded through every evaluation call
///
/// Carried explicitly so concurrent evaluations with different settings
/// cannot interfere through shared state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationConfig {
    /// Patch side length for pattern extraction
    pub patch_size: usize,
    /// Ordered downsampling factors, one histogram level per factor
    pub resolution_factors: Vec<usize>,
    /// Tie handling for block-majority downsampling
    pub tie_break: TieBreak,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_PATCH_SIZE,
            resolution_factors: DEFAULT_RESOLUTION_FACTORS.to_vec(),
            tie_break: TieBreak::default(),
        }
    }
}

/// Scores and distances produced by one evaluation call
#[derive(Clone, Debug)]
pub struct ScoreReport {
    /// Mean distance from each set member to the reference
    pub inconsistency: f64,
    /// Mean pairwise distance within the set
    pub diversity: f64,
    /// Full distance matrix over the set plus the reference as the last row/column
    pub distances: Array2<f64>,
    /// Resolution levels omitted for every image in the set
    pub skipped_levels: Vec<SkippedLevel>,
}

/// Ordered collection of same-sized images with cached histogram bundles
pub struct ImageSet {
    images: Vec<BinaryImage>,
    bundles: Vec<MultiresHistogram>,
    config: EvaluationConfig,
    dimensions: (usize, usize),
}

impl ImageSet {
    /// Build a set, validating dimensions and computing every histogram bundle once
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The set is empty
    /// - Any image's dimensions differ from the first image's
    /// - The configuration is invalid for the shared dimensions
    pub fn new(images: Vec<BinaryImage>, config: EvaluationConfig) -> Result<Self> {
        let dimensions = images
            .first()
            .map(BinaryImage::dimensions)
            .ok_or(EvaluationError::EmptyImageSet)?;

        for (index, image) in images.iter().enumerate() {
            if image.dimensions() != dimensions {
                return Err(EvaluationError::DimensionMismatch {
                    expected: dimensions,
                    found: image.dimensions(),
                    index,
                });
            }
        }

        let bundles = images
            .iter()
            .map(|image| {
                build_multires_histograms(
                    image,
                    config.patch_size,
                    &config.resolution_factors,
                    config.tie_break,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            images,
            bundles,
            config,
            dimensions,
        })
    }

    /// Number of images in the set
    pub const fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the set is empty (never true for a constructed set)
    pub const fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The images in caller order
    pub fn images(&self) -> &[BinaryImage] {
        &self.images
    }

    /// Dimensions shared by every image (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// The configuration this set was built with
    pub const fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// The cached histogram bundle for one image
    pub fn bundle(&self, index: usize) -> Option<&MultiresHistogram> {
        self.bundles.get(index)
    }

    /// Resolution levels skipped for every member of the set
    ///
    /// All members share dimensions and configuration, so the same levels
    /// are skipped for each.
    pub fn skipped_levels(&self) -> &[SkippedLevel] {
        match self.bundles.first() {
            Some(bundle) => bundle.skipped(),
            None => &[],
        }
    }

    /// Mean distance from each set member to a reference image
    ///
    /// # Errors
    ///
    /// Returns an error if the reference's dimensions differ from the
    /// set's, or its histograms cannot be built
    pub fn inconsistency(&self, reference: &BinaryImage) -> Result<f64> {
        let reference_bundle = self.reference_bundle(reference)?;

        let mut sum = 0.0;
        for bundle in &self.bundles {
            sum += bundle_distance(bundle, &reference_bundle)?;
        }

        Ok(sum / self.bundles.len() as f64)
    }

    /// Mean distance over unordered image pairs within the set
    ///
    /// A single-image set has no pairs and scores exactly zero.
    ///
    /// # Errors
    ///
    /// Returns an error if a pairwise divergence fails validation
    pub fn diversity(&self) -> Result<f64> {
        let n = self.bundles.len();
        if n < 2 {
            return Ok(0.0);
        }

        let mut sum = 0.0;
        let mut pairs = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                sum += self.member_distance(i, j)?;
                pairs += 1;
            }
        }

        Ok(sum / pairs as f64)
    }

    /// Symmetric pairwise distance matrix in caller order
    ///
    /// The diagonal is exactly zero.
    ///
    /// # Errors
    ///
    /// Returns an error if a pairwise divergence fails validation
    pub fn distance_matrix(&self) -> Result<Array2<f64>> {
        let n = self.bundles.len();
        let mut matrix = Array2::zeros((n, n));
        self.fill_pairwise(&mut matrix)?;
        Ok(matrix)
    }

    /// Distance matrix with the reference appended as the last row and column
    ///
    /// # Errors
    ///
    /// Returns an error if the reference's dimensions differ from the
    /// set's, or a divergence fails validation
    pub fn distance_matrix_with_reference(&self, reference: &BinaryImage) -> Result<Array2<f64>> {
        let reference_bundle = self.reference_bundle(reference)?;
        let n = self.bundles.len();
        let mut matrix = Array2::zeros((n + 1, n + 1));
        self.fill_pairwise(&mut matrix)?;

        for (index, bundle) in self.bundles.iter().enumerate() {
            let distance = bundle_distance(bundle, &reference_bundle)?;
            if let Some(cell) = matrix.get_mut([index, n]) {
                *cell = distance;
            }
            if let Some(cell) = matrix.get_mut([n, index]) {
                *cell = distance;
            }
        }

        Ok(matrix)
    }

    /// Compute both scores and the full matrix from one histogram pass
    ///
    /// The reference bundle is built once and shared by the inconsistency
    /// score and the matrix's final row and column.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference's dimensions differ from the
    /// set's, or a divergence fails validation
    pub fn evaluate(&self, reference: &BinaryImage) -> Result<ScoreReport> {
        let distances = self.distance_matrix_with_reference(reference)?;
        let n = self.bundles.len();

        let mut reference_sum = 0.0;
        for index in 0..n {
            reference_sum += distances.get([index, n]).copied().unwrap_or(0.0);
        }
        let inconsistency = reference_sum / n as f64;

        let diversity = if n < 2 {
            0.0
        } else {
            let mut pair_sum = 0.0;
            let mut pairs = 0usize;
            for i in 0..n {
                for j in (i + 1)..n {
                    pair_sum += distances.get([i, j]).copied().unwrap_or(0.0);
                    pairs += 1;
                }
            }
            pair_sum / pairs as f64
        };

        Ok(ScoreReport {
            inconsistency,
            diversity,
            distances,
            skipped_levels: self.skipped_levels().to_vec(),
        })
    }

    fn fill_pairwise(&self, matrix: &mut Array2<f64>) -> Result<()> {
        let n = self.bundles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let distance = self.member_distance(i, j)?;
                if let Some(cell) = matrix.get_mut([i, j]) {
                    *cell = distance;
                }
                if let Some(cell) = matrix.get_mut([j, i]) {
                    *cell = distance;
                }
            }
        }
        Ok(())
    }

    fn member_distance(&self, i: usize, j: usize) -> Result<f64> {
        match (self.bundles.get(i), self.bundles.get(j)) {
            (Some(a), Some(b)) => bundle_distance(a, b),
            _ => Ok(0.0),
        }
    }

    fn reference_bundle(&self, reference: &BinaryImage) -> Result<MultiresHistogram> {
        if reference.dimensions() != self.dimensions {
            return Err(EvaluationError::DimensionMismatch {
                expected: self.dimensions,
                found: reference.dimensions(),
                index: self.images.len(),
            });
        }

        build_multires_histograms(
            reference,
            self.config.patch_size,
            &self.config.resolution_factors,
            self.config.tie_break,
        )
    }
}

/// Mean distance from a set of images to a reference image
///
/// # Errors
///
/// Returns an error if set construction or scoring fails
pub fn inconsistency(
    images: Vec<BinaryImage>,
    reference: &BinaryImage,
    config: EvaluationConfig,
) -> Result<f64> {
    ImageSet::new(images, config)?.inconsistency(reference)
}

/// Mean pairwise distance within a set of images
///
/// # Errors
///
/// Returns an error if set construction or scoring fails
pub fn diversity(images: Vec<BinaryImage>, config: EvaluationConfig) -> Result<f64> {
    ImageSet::new(images, config)?.diversity()
}

/// Symmetric pairwise distance matrix for a set of images
///
/// # Errors
///
/// Returns an error if set construction or a divergence fails
pub fn distance_matrix(images: Vec<BinaryImage>, config: EvaluationConfig) -> Result<Array2<f64>> {
    ImageSet::new(images, config)?.distance_matrix()
}
