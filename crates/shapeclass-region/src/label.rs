//! Connected component labeling
//!
//! Foreground pixels are grouped into 4-connected regions (up, down, left,
//! right; never diagonal). Regions are numbered from 0 in the order a
//! row-major raster scan first reaches them.
//!
//! The flood fill keeps its own work-list instead of recursing, so a single
//! region covering the whole grid costs heap memory proportional to its
//! size rather than call-stack depth.

use crate::error::{RegionError, RegionResult};
use shapeclass_core::PixelGrid;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// 4-connected neighbors of `(x, y)` that lie inside a `width` x `height` grid
fn neighbors4(x: u32, y: u32, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    [
        x.checked_sub(1).map(|nx| (nx, y)),
        (x + 1 < width).then_some((x + 1, y)),
        y.checked_sub(1).map(|ny| (x, ny)),
        (y + 1 < height).then_some((x, y + 1)),
    ]
    .into_iter()
    .flatten()
}

/// Label the seed and every unlabeled foreground pixel 4-connected to it.
///
/// The seed must already be known to be an unlabeled foreground pixel.
fn fill_region(grid: &mut PixelGrid, seed_x: u32, seed_y: u32, label: u32) -> u32 {
    let (width, height) = (grid.width(), grid.height());
    let mut stack = vec![(seed_x, seed_y)];
    if let Some(px) = grid.get_mut(seed_x, seed_y) {
        px.label = Some(label);
    }

    let mut filled = 0u32;
    while let Some((x, y)) = stack.pop() {
        filled += 1;
        for (nx, ny) in neighbors4(x, y, width, height) {
            if let Some(px) = grid.get_mut(nx, ny) {
                // Labeling at push time keeps each pixel on the stack at most once
                if px.is_foreground() && !px.is_indexed() {
                    px.label = Some(label);
                    stack.push((nx, ny));
                }
            }
        }
    }
    filled
}

/// Flood fill one region with `label`, starting from a seed pixel.
///
/// Returns the number of pixels labeled. A seed that is background or
/// already labeled labels nothing and returns 0.
///
/// # Errors
///
/// Returns [`RegionError::InvalidSeed`] if the seed is outside the grid.
pub fn floodfill_label(grid: &mut PixelGrid, seed_x: u32, seed_y: u32, label: u32) -> RegionResult<u32> {
    let seed = grid.get(seed_x, seed_y).ok_or(RegionError::InvalidSeed {
        x: seed_x,
        y: seed_y,
    })?;
    if !seed.is_foreground() || seed.is_indexed() {
        return Ok(0);
    }
    Ok(fill_region(grid, seed_x, seed_y, label))
}

/// Label all 4-connected foreground regions of a binarized grid.
///
/// Background pixels stay unlabeled. Pixels that already carry a label are
/// neither revisited nor relabeled, so running this on its own output
/// returns an identical grid; new labels start after the largest existing
/// one, wrapping around to the lowest unused label once `u32::MAX` is
/// taken.
///
/// # Examples
///
/// ```
/// use shapeclass_core::{Pixel, PixelGrid};
/// use shapeclass_region::label_components;
///
/// let mut grid = PixelGrid::new(5, 1).unwrap();
/// grid.set(0, 0, Pixel::foreground()).unwrap();
/// grid.set(1, 0, Pixel::foreground()).unwrap();
/// grid.set(4, 0, Pixel::foreground()).unwrap();
///
/// let labeled = label_components(&grid);
/// assert_eq!(labeled.label_at(1, 0), Some(0));
/// assert_eq!(labeled.label_at(4, 0), Some(1));
/// ```
pub fn label_components(grid: &PixelGrid) -> PixelGrid {
    let mut out = grid.clone();
    let mut used: BTreeSet<u32> = out.pixels().iter().filter_map(|p| p.label).collect();
    let start = used.last().map_or(Some(0), |max| max.checked_add(1)).unwrap_or(0);
    let mut next_label = first_free_label(&used, start);
    let mut components = 0usize;

    'scan: for y in 0..out.height() {
        for x in 0..out.width() {
            let unlabeled_fg = out
                .get(x, y)
                .is_some_and(|p| p.is_foreground() && !p.is_indexed());
            if !unlabeled_fg {
                continue;
            }
            let Some(label) = next_label else {
                warn!("label space exhausted, leaving remaining regions unlabeled");
                break 'scan;
            };
            fill_region(&mut out, x, y, label);
            used.insert(label);
            components += 1;
            next_label = first_free_label(&used, label.wrapping_add(1));
        }
    }

    debug!(
        width = out.width(),
        height = out.height(),
        components,
        "labeled connected components"
    );
    out
}

/// Smallest label not in `used`, searching upward from `from` and wrapping
/// around to 0.
fn first_free_label(used: &BTreeSet<u32>, from: u32) -> Option<u32> {
    (from..=u32::MAX).chain(0..from).find(|l| !used.contains(l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeclass_core::Pixel;

    fn grid_with(width: u32, height: u32, pixels: &[(u32, u32)]) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height).unwrap();
        for &(x, y) in pixels {
            grid.set(x, y, Pixel::foreground()).unwrap();
        }
        grid
    }

    #[test]
    fn test_neighbors4_corner() {
        let n: Vec<_> = neighbors4(0, 0, 3, 3).collect();
        assert_eq!(n, vec![(1, 0), (0, 1)]);
        let n: Vec<_> = neighbors4(2, 2, 3, 3).collect();
        assert_eq!(n, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_diagonal_is_not_connected() {
        let grid = grid_with(2, 2, &[(0, 0), (1, 1)]);
        let labeled = label_components(&grid);
        assert_eq!(labeled.label_at(0, 0), Some(0));
        assert_eq!(labeled.label_at(1, 1), Some(1));
    }

    #[test]
    fn test_raster_discovery_order() {
        // The region reaching row 0 furthest right is found second even
        // though it extends lower than the first
        let grid = grid_with(4, 3, &[(3, 0), (3, 1), (0, 1), (0, 2)]);
        let labeled = label_components(&grid);
        assert_eq!(labeled.label_at(3, 0), Some(0));
        assert_eq!(labeled.label_at(3, 1), Some(0));
        assert_eq!(labeled.label_at(0, 1), Some(1));
        assert_eq!(labeled.label_at(0, 2), Some(1));
    }

    #[test]
    fn test_u_shape_single_region() {
        let grid = grid_with(3, 3, &[(0, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]);
        let labeled = label_components(&grid);
        assert_eq!(labeled.labels(), vec![0]);
    }

    #[test]
    fn test_background_stays_unlabeled() {
        let grid = grid_with(3, 1, &[(1, 0)]);
        let labeled = label_components(&grid);
        assert_eq!(labeled.label_at(0, 0), None);
        assert_eq!(labeled.label_at(2, 0), None);
    }

    #[test]
    fn test_large_region_no_recursion() {
        let grid = PixelGrid::filled(1000, 1000, Pixel::foreground()).unwrap();
        let labeled = label_components(&grid);
        assert_eq!(labeled.labels(), vec![0]);
    }

    #[test]
    fn test_idempotent() {
        let grid = grid_with(4, 4, &[(0, 0), (1, 0), (3, 3), (3, 2), (0, 3)]);
        let once = label_components(&grid);
        let twice = label_components(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_labels_wrap_after_max() {
        let mut grid = grid_with(5, 1, &[(2, 0), (4, 0)]);
        grid.set(0, 0, Pixel::labeled(u32::MAX)).unwrap();
        let labeled = label_components(&grid);
        assert_eq!(labeled.label_at(0, 0), Some(u32::MAX));
        assert_eq!(labeled.label_at(2, 0), Some(0));
        assert_eq!(labeled.label_at(4, 0), Some(1));
        assert_eq!(label_components(&labeled), labeled);
    }

    #[test]
    fn test_wrapped_labels_skip_used() {
        let mut grid = grid_with(7, 1, &[(4, 0), (6, 0)]);
        grid.set(0, 0, Pixel::labeled(u32::MAX)).unwrap();
        grid.set(2, 0, Pixel::labeled(0)).unwrap();
        let labeled = label_components(&grid);
        assert_eq!(labeled.label_at(4, 0), Some(1));
        assert_eq!(labeled.label_at(6, 0), Some(2));
    }

    #[test]
    fn test_first_free_label() {
        let used: BTreeSet<u32> = [0, 1, 3, u32::MAX].into_iter().collect();
        assert_eq!(first_free_label(&used, 0), Some(2));
        assert_eq!(first_free_label(&used, 3), Some(4));
        assert_eq!(first_free_label(&used, u32::MAX), Some(2));
    }

    #[test]
    fn test_existing_labels_kept() {
        let mut grid = grid_with(3, 1, &[(2, 0)]);
        grid.set(0, 0, Pixel::labeled(5)).unwrap();
        let labeled = label_components(&grid);
        assert_eq!(labeled.label_at(0, 0), Some(5));
        assert_eq!(labeled.label_at(2, 0), Some(6));
    }

    #[test]
    fn test_floodfill_label() {
        let mut grid = grid_with(3, 3, &[(0, 0), (1, 0), (1, 1), (2, 2)]);
        assert_eq!(floodfill_label(&mut grid, 1, 1, 9).unwrap(), 3);
        assert_eq!(grid.label_at(0, 0), Some(9));
        assert_eq!(grid.label_at(2, 2), None);
        // Already labeled seed fills nothing
        assert_eq!(floodfill_label(&mut grid, 0, 0, 4).unwrap(), 0);
        // Background seed fills nothing
        assert_eq!(floodfill_label(&mut grid, 2, 0, 4).unwrap(), 0);
    }

    #[test]
    fn test_floodfill_invalid_seed() {
        let mut grid = PixelGrid::new(2, 2).unwrap();
        assert!(matches!(
            floodfill_label(&mut grid, 2, 0, 0),
            Err(RegionError::InvalidSeed { x: 2, y: 0 })
        ));
    }

    #[test]
    fn test_empty_grid() {
        let grid = PixelGrid::new(0, 0).unwrap();
        assert!(label_components(&grid).is_empty());
    }
}
