//! Region boundary length
//!
//! A labeled pixel is on the boundary of its region when at least one of
//! its four sides touches the grid edge or a pixel that does not carry the
//! same label. The boundary length of a region is the number of such
//! pixels. Both the size filter and the compactness descriptor are defined
//! in terms of this count.

use shapeclass_core::PixelGrid;
use std::collections::BTreeMap;

/// Whether the pixel at `(x, y)` lies on the boundary of its region.
///
/// Unlabeled pixels are never boundary pixels.
pub fn is_boundary_pixel(grid: &PixelGrid, x: u32, y: u32) -> bool {
    let Some(label) = grid.label_at(x, y) else {
        return false;
    };
    let differs = |nx: u32, ny: u32| grid.label_at(nx, ny) != Some(label);

    let left = x == 0 || differs(x - 1, y);
    let right = x + 1 >= grid.width() || differs(x + 1, y);
    let up = y == 0 || differs(x, y - 1);
    let down = y + 1 >= grid.height() || differs(x, y + 1);

    left || right || up || down
}

/// Boundary length of every label present in the grid.
pub fn boundary_lengths(grid: &PixelGrid) -> BTreeMap<u32, u32> {
    let mut lengths = BTreeMap::new();
    for (x, y, px) in grid.enumerate() {
        if let Some(label) = px.label {
            let count = lengths.entry(label).or_insert(0u32);
            if is_boundary_pixel(grid, x, y) {
                *count += 1;
            }
        }
    }
    lengths
}
