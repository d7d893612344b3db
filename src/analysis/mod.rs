//! Analysis modules for pattern histograms and similarity scoring

/// Pattern encoding and sliding-window histogram construction
pub mod patterns;
/// Multiresolution histogram bundles and level-averaged distances
pub mod resolution;
/// Image set evaluation, scores, and distance matrices
pub mod scoring;
