//! Shapeclass - Unsupervised shape classification for Rust
//!
//! Finds the dark objects of an image, describes each one by two shape
//! signals and groups them into classes without supervision.
//!
//! # Overview
//!
//! The pipeline runs in five stages:
//!
//! - Luminance reduction and binarization (`color`)
//! - 4-connected component labeling and boundary-length filtering (`region`)
//! - Compactness and elongation descriptors (`region`)
//! - K-means clustering into K classes (`recog`)
//! - Nearest-centroid recognition of new images (`recog`)
//!
//! # Example
//!
//! ```
//! use shapeclass::{Pixel, PixelGrid};
//! use shapeclass::region::{label_components, shape_descriptors};
//!
//! // A 10x10 grid with an 8x8 foreground square in the middle
//! let mut grid = PixelGrid::new(10, 10).unwrap();
//! for y in 1..9 {
//!     for x in 1..9 {
//!         grid.set(x, y, Pixel::foreground()).unwrap();
//!     }
//! }
//!
//! let labeled = label_components(&grid);
//! let descriptors = shape_descriptors(&labeled).unwrap();
//! assert_eq!(descriptors.len(), 1);
//! assert!((descriptors[0].compactness() - 0.1225).abs() < 1e-12);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use shapeclass_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use shapeclass_color as color;
pub use shapeclass_recog as recog;
pub use shapeclass_region as region;

// The pipeline entry points
pub use shapeclass_recog::{Analysis, AnalyzerOptions, ImageAnalyzer, Reconstruction};
