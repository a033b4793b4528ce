//! shapeclass-core - Basic data structures for shape segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the shapeclass pipeline:
//!
//! - [`Pixel`] - A two-level intensity plus an optional region label
//! - [`PixelGrid`] - The owned, row-major image container
//! - [`Point`] / [`Bounds`] - Integer coordinates and inclusive rectangles
//! - [`Object`] - A segmented region with its bounding box and class

pub mod bounds;
pub mod error;
pub mod grid;
pub mod object;

pub use bounds::{Bounds, Point};
pub use error::{Error, Result};
pub use grid::{Pixel, PixelGrid};
pub use object::Object;
