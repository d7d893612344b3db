//! Jensen-Shannon divergence between probability histograms
//!
//! The divergence compares each distribution against their pointwise
//! mixture, which keeps every logarithm well-defined without epsilon
//! smoothing: the mixture is zero only where both inputs are zero, and
//! those terms contribute nothing by the `0 * ln(0/x) = 0` convention.

use num_traits::ToPrimitive;

use crate::io::configuration::NORMALIZATION_TOLERANCE;
use crate::io::error::{EvaluationError, Result, invalid_source_data};

/// Upper bound of the divergence under the natural logarithm
pub const DIVERGENCE_BOUND: f64 = std::f64::consts::LN_2;

/// Normalize raw counts into a probability vector
///
/// # Errors
///
/// Returns an error if the counts sum to zero
pub fn normalize_counts<T: ToPrimitive>(counts: &[T]) -> Result<Vec<f64>> {
    let total: f64 = counts.iter().filter_map(ToPrimitive::to_f64).sum();
    if total <= 0.0 {
        return Err(invalid_source_data(&"histogram contains no observations"));
    }

    Ok(counts
        .iter()
        .map(|count| count.to_f64().unwrap_or(0.0) / total)
        .collect())
}

/// Symmetric bounded divergence between two probability histograms
///
/// Uses the natural logarithm, so results lie in `[0, DIVERGENCE_BOUND]`.
///
/// # Errors
///
/// Returns an error if:
/// - The histograms have different lengths
/// - Either histogram contains a negative or non-finite entry
/// - Either histogram does not sum to one within tolerance
pub fn jensen_shannon(p: &[f64], q: &[f64]) -> Result<f64> {
    if p.len() != q.len() {
        return Err(EvaluationError::ShapeMismatch {
            left: p.len(),
            right: q.len(),
        });
    }

    validate_distribution(p)?;
    validate_distribution(q)?;

    let mut sum = 0.0;
    for (&a, &b) in p.iter().zip(q.iter()) {
        let mixture = f64::midpoint(a, b);
        sum = (kl_term(a, mixture) + kl_term(b, mixture)).mul_add(0.5, sum);
    }

    // Rounding can land an exact-match comparison a hair below zero
    Ok(sum.max(0.0))
}

// A zero probability contributes nothing regardless of the mixture value
fn kl_term(probability: f64, mixture: f64) -> f64 {
    if probability > 0.0 {
        probability * (probability / mixture).ln()
    } else {
        0.0
    }
}

fn validate_distribution(histogram: &[f64]) -> Result<()> {
    let mut sum = 0.0;
    for &value in histogram {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid_source_data(&format!(
                "probability entry {value} is not a non-negative finite number"
            )));
        }
        sum += value;
    }

    if (sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
        return Err(EvaluationError::NotNormalized { sum });
    }

    Ok(())
}
