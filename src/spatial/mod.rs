//! Spatial data structures for binary images
//!
//! This module contains image-level functionality including:
//! - Packed binary image storage and validation
//! - Block-majority pyramid downsampling

/// Binary image storage and validation
pub mod grid;
/// Block-majority downsampling for resolution pyramids
pub mod pyramid;

pub use grid::BinaryImage;
