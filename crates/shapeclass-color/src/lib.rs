//! shapeclass-color - Luminance, binarization and label coloring
//!
//! This crate covers the two ends of the pipeline that touch real color
//! images:
//!
//! - **Luminance reduction** - Weighted RGB to single-channel conversion
//! - **Binarization** - Pluggable threshold strategies producing a
//!   two-level [`PixelGrid`](shapeclass_core::PixelGrid)
//! - **Coloring** - Mapping labels or classes back to a display palette
//!
//! # Examples
//!
//! ```
//! use image::{DynamicImage, GrayImage, Luma};
//! use shapeclass_color::{HalfRangeThreshold, binarize};
//!
//! let mut gray = GrayImage::from_pixel(4, 4, Luma([230]));
//! gray.put_pixel(1, 1, Luma([20]));
//!
//! let grid = binarize(&DynamicImage::ImageLuma8(gray), &HalfRangeThreshold).unwrap();
//! assert_eq!(grid.count_foreground(), 1);
//! ```

pub mod coloring;
pub mod colorspace;
mod error;
pub mod threshold;

pub use error::{ColorError, ColorResult};

pub use coloring::{DEFAULT_PALETTE, reconstruct_classes, reconstruct_labels};
pub use colorspace::{LUMA_BLUE, LUMA_GREEN, LUMA_RED, luminance, luminance_image};
pub use threshold::{
    ConstantThreshold, DEFAULT_THRESHOLD, HalfRangeThreshold, ThresholdProvider,
    ThresholdStrategy, binarize, binarize_luma, find_min_max,
};

// Re-export core for convenience
pub use shapeclass_core;
