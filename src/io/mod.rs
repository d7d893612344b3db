//! Input/output operations and error handling

/// Command-line interface and batch evaluation driver
pub mod cli;
/// Evaluation constants and configuration defaults
pub mod configuration;
/// Error types for evaluation operations
pub mod error;
/// PNG loading and Otsu binarization
pub mod image;
/// Distance matrix export for external embedding tools
pub mod matrix;
/// Progress display for batch operations
pub mod progress;
