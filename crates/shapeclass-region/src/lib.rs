//! shapeclass-region - Region processing for shapeclass
//!
//! This crate provides the segmentation stages that run on a binarized
//! [`PixelGrid`](shapeclass_core::PixelGrid):
//!
//! - **Connected component labeling** - 4-connected flood fill
//! - **Boundary length** - Per-region count of edge pixels
//! - **Size filtering** - Dropping regions with a short boundary
//! - **Moments and shape descriptors** - Compactness and elongation
//! - **Object extraction** - Bounding boxes per region
//!
//! # Examples
//!
//! ```
//! use shapeclass_core::{Pixel, PixelGrid};
//! use shapeclass_region::{filter_by_boundary_length, label_components, shape_descriptors};
//!
//! let mut grid = PixelGrid::new(10, 10).unwrap();
//! for y in 1..9 {
//!     for x in 1..9 {
//!         grid.set(x, y, Pixel::foreground()).unwrap();
//!     }
//! }
//!
//! let labeled = label_components(&grid);
//! let filtered = filter_by_boundary_length(&labeled, 15).unwrap();
//! let descriptors = shape_descriptors(&filtered).unwrap();
//! assert_eq!(descriptors.len(), 1);
//! ```

pub mod boundary;
pub mod error;
pub mod filter;
pub mod label;
pub mod moments;
pub mod objects;
pub mod signals;

// Re-export core types
pub use shapeclass_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use boundary::{boundary_lengths, is_boundary_pixel};
pub use filter::{DEFAULT_MIN_BOUNDARY_LENGTH, filter_by_boundary_length, reindex_labels};
pub use label::{floodfill_label, label_components};
pub use moments::{CentralMoments, areas, central_moments, centers_of_mass, raw_moments};
pub use objects::{assign_classes, component_bounds, extract_objects};
pub use signals::{FeaturePoint, ShapeDescriptor, compactness, shape_descriptors};
