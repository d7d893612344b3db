//! Mathematical utilities for histogram comparison

/// Divergence measures between probability histograms
pub mod divergence;
