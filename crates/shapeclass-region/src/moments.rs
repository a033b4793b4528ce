//! Raster and central moments per label
//!
//! Each function makes one pass over the grid and accumulates a quantity
//! for every label it meets. Later passes look up results of earlier ones
//! by label; a miss is reported as [`RegionError::LookupFailure`] instead
//! of being papered over with a default.

use crate::error::{RegionError, RegionResult};
use shapeclass_core::PixelGrid;
use std::collections::BTreeMap;

/// Second-order central moments of one region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CentralMoments {
    pub mu20: f64,
    pub mu02: f64,
    pub mu11: f64,
}

impl CentralMoments {
    /// Principal-axis moments `(mu_max, mu_min)` of the 2x2 moment matrix.
    pub fn principal(&self) -> (f64, f64) {
        let half_sum = 0.5 * (self.mu20 + self.mu02);
        let half_root =
            0.5 * (4.0 * self.mu11 * self.mu11 + (self.mu20 - self.mu02).powi(2)).sqrt();
        (half_sum + half_root, half_sum - half_root)
    }

    /// Ratio `mu_min / mu_max`.
    ///
    /// Close to 1 for shapes with no preferred axis, close to 0 for long
    /// thin ones. A region with no spread at all (a single pixel) is
    /// treated as perfectly symmetric and yields 1.
    pub fn elongation(&self) -> f64 {
        let (max, min) = self.principal();
        if max > 0.0 { min / max } else { 1.0 }
    }
}

/// Raw moment `M(p, q) = sum(x^p * y^q)` over the pixels of each label.
pub fn raw_moments(grid: &PixelGrid, p: i32, q: i32) -> BTreeMap<u32, f64> {
    let mut moments = BTreeMap::new();
    for (x, y, px) in grid.enumerate() {
        if let Some(label) = px.label {
            *moments.entry(label).or_insert(0.0) += (x as f64).powi(p) * (y as f64).powi(q);
        }
    }
    moments
}

/// Pixel count of each label, `M(0, 0)`.
pub fn areas(grid: &PixelGrid) -> BTreeMap<u32, f64> {
    raw_moments(grid, 0, 0)
}

/// Center of mass `(M10 / M00, M01 / M00)` of each label in `areas`.
pub fn centers_of_mass(
    grid: &PixelGrid,
    areas: &BTreeMap<u32, f64>,
) -> RegionResult<BTreeMap<u32, (f64, f64)>> {
    let m10 = raw_moments(grid, 1, 0);
    let m01 = raw_moments(grid, 0, 1);

    areas
        .iter()
        .map(|(&label, &area)| {
            let xm = m10
                .get(&label)
                .ok_or(RegionError::LookupFailure { label, stage: "M10" })?;
            let ym = m01
                .get(&label)
                .ok_or(RegionError::LookupFailure { label, stage: "M01" })?;
            Ok((label, (xm / area, ym / area)))
        })
        .collect()
}

/// Central moments `mu20`, `mu02` and `mu11` relative to each label's center.
pub fn central_moments(
    grid: &PixelGrid,
    centers: &BTreeMap<u32, (f64, f64)>,
) -> RegionResult<BTreeMap<u32, CentralMoments>> {
    let mut moments: BTreeMap<u32, CentralMoments> = BTreeMap::new();
    for (x, y, px) in grid.enumerate() {
        let Some(label) = px.label else {
            continue;
        };
        let &(xc, yc) = centers.get(&label).ok_or(RegionError::LookupFailure {
            label,
            stage: "center of mass",
        })?;
        let dx = x as f64 - xc;
        let dy = y as f64 - yc;

        let mu = moments.entry(label).or_default();
        mu.mu20 += dx * dx;
        mu.mu02 += dy * dy;
        mu.mu11 += dx * dy;
    }
    Ok(moments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeclass_core::Pixel;

    fn bar(x0: u32, y0: u32, w: u32, h: u32, label: u32, grid: &mut PixelGrid) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                grid.set(x, y, Pixel::labeled(label)).unwrap();
            }
        }
    }

    #[test]
    fn test_raw_moments() {
        let mut grid = PixelGrid::new(5, 5).unwrap();
        bar(1, 2, 2, 1, 0, &mut grid);
        assert_eq!(areas(&grid)[&0], 2.0);
        assert_eq!(raw_moments(&grid, 1, 0)[&0], 3.0);
        assert_eq!(raw_moments(&grid, 0, 1)[&0], 4.0);
        assert_eq!(raw_moments(&grid, 2, 0)[&0], 5.0);
    }

    #[test]
    fn test_center_of_mass() {
        let mut grid = PixelGrid::new(10, 10).unwrap();
        bar(2, 4, 3, 5, 0, &mut grid);
        let centers = centers_of_mass(&grid, &areas(&grid)).unwrap();
        assert_eq!(centers[&0], (3.0, 6.0));
    }

    #[test]
    fn test_center_of_mass_unknown_label() {
        let grid = PixelGrid::new(3, 3).unwrap();
        let mut bogus = BTreeMap::new();
        bogus.insert(4, 1.0);
        assert!(matches!(
            centers_of_mass(&grid, &bogus),
            Err(RegionError::LookupFailure { label: 4, .. })
        ));
    }

    #[test]
    fn test_central_moments_missing_center() {
        let mut grid = PixelGrid::new(3, 3).unwrap();
        bar(0, 0, 1, 1, 3, &mut grid);
        assert!(matches!(
            central_moments(&grid, &BTreeMap::new()),
            Err(RegionError::LookupFailure { label: 3, .. })
        ));
    }

    #[test]
    fn test_rectangle_elongation() {
        // For a w x h rectangle mu02 / mu20 = (h^2 - 1) / (w^2 - 1)
        let mut grid = PixelGrid::new(20, 20).unwrap();
        bar(1, 1, 9, 3, 0, &mut grid);
        let centers = centers_of_mass(&grid, &areas(&grid)).unwrap();
        let mu = central_moments(&grid, &centers).unwrap()[&0];
        assert!(mu.mu11.abs() < 1e-9);
        assert!((mu.elongation() - 8.0 / 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_square_is_symmetric() {
        let mut grid = PixelGrid::new(10, 10).unwrap();
        bar(2, 2, 5, 5, 0, &mut grid);
        let centers = centers_of_mass(&grid, &areas(&grid)).unwrap();
        let mu = central_moments(&grid, &centers).unwrap()[&0];
        assert!((mu.elongation() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_elongation_rotation_invariant() {
        // A diagonal line is as elongated as a horizontal one
        let mut diag = PixelGrid::new(6, 6).unwrap();
        for i in 0..6 {
            diag.set(i, i, Pixel::labeled(0)).unwrap();
        }
        let centers = centers_of_mass(&diag, &areas(&diag)).unwrap();
        let mu = central_moments(&diag, &centers).unwrap()[&0];
        assert!(mu.elongation().abs() < 1e-12);
    }

    #[test]
    fn test_single_pixel_elongation() {
        let mu = CentralMoments::default();
        assert_eq!(mu.elongation(), 1.0);
    }
}
