//! Label coloring
//!
//! Converts a labeled [`PixelGrid`] into an RGB image for visualization.
//! Unlabeled pixels are black; labeled pixels take a palette color chosen
//! by label (or by recognized class) modulo the palette length.

use crate::error::{ColorError, ColorResult};
use image::{Rgb, RgbImage};
use shapeclass_core::{Object, PixelGrid};
use std::collections::HashMap;

/// Display colors used for reconstructed label images
pub const DEFAULT_PALETTE: [Rgb<u8>; 12] = [
    Rgb([252, 186, 3]),
    Rgb([252, 244, 3]),
    Rgb([252, 65, 3]),
    Rgb([152, 252, 3]),
    Rgb([3, 252, 90]),
    Rgb([3, 252, 194]),
    Rgb([3, 227, 252]),
    Rgb([3, 157, 252]),
    Rgb([3, 65, 252]),
    Rgb([119, 3, 252]),
    Rgb([223, 3, 252]),
    Rgb([252, 3, 119]),
];

const UNLABELED: Rgb<u8> = Rgb([0, 0, 0]);

fn paint(
    grid: &PixelGrid,
    palette: &[Rgb<u8>],
    mut pick: impl FnMut(u32) -> Option<u32>,
) -> ColorResult<RgbImage> {
    if palette.is_empty() {
        return Err(ColorError::EmptyPalette);
    }
    let mut img = RgbImage::from_pixel(grid.width(), grid.height(), UNLABELED);
    for (x, y, p) in grid.enumerate() {
        if let Some(index) = p.label.and_then(&mut pick) {
            img.put_pixel(x, y, palette[index as usize % palette.len()]);
        }
    }
    Ok(img)
}

/// Color each labeled pixel by its label.
///
/// # Errors
///
/// Returns [`ColorError::EmptyPalette`] if `palette` is empty.
pub fn reconstruct_labels(grid: &PixelGrid, palette: &[Rgb<u8>]) -> ColorResult<RgbImage> {
    paint(grid, palette, Some)
}

/// Color each object's pixels by its recognized class.
///
/// Pixels of objects without a class, and labels with no matching object,
/// stay black.
pub fn reconstruct_classes(
    grid: &PixelGrid,
    objects: &[Object],
    palette: &[Rgb<u8>],
) -> ColorResult<RgbImage> {
    let classes: HashMap<u32, u32> = objects
        .iter()
        .filter_map(|o| o.class.map(|c| (o.id, c)))
        .collect();
    paint(grid, palette, |label| classes.get(&label).copied())
}
