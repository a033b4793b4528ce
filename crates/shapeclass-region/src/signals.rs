//! Shape descriptors
//!
//! Every surviving region is summarized by two numbers that do not depend
//! on its position, and depend little on its rotation and scale:
//!
//! - **compactness** `boundary^2 / (100 * area)`, lower for rounder shapes
//! - **elongation** `mu_min / mu_max` of the principal second moments,
//!   near 1 for symmetric shapes and near 0 for long thin ones
//!
//! The pair is the feature space used for clustering and recognition.

use crate::boundary::boundary_lengths;
use crate::error::{RegionError, RegionResult};
use crate::moments::{areas, central_moments, centers_of_mass};
use shapeclass_core::PixelGrid;

/// A position in the (compactness, elongation) feature space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeaturePoint {
    pub compactness: f64,
    pub elongation: f64,
}

impl FeaturePoint {
    /// Point that is farther from every real descriptor than any other
    pub const PINNED: FeaturePoint = FeaturePoint {
        compactness: f64::MAX,
        elongation: f64::MAX,
    };

    pub const fn new(compactness: f64, elongation: f64) -> Self {
        Self {
            compactness,
            elongation,
        }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &FeaturePoint) -> f64 {
        let dc = self.compactness - other.compactness;
        let de = self.elongation - other.elongation;
        (dc * dc + de * de).sqrt()
    }

    /// Arithmetic mean of a set of points, `None` when empty.
    pub fn mean<'a>(points: impl IntoIterator<Item = &'a FeaturePoint>) -> Option<FeaturePoint> {
        let (sum, n) = points
            .into_iter()
            .fold((FeaturePoint::default(), 0usize), |(acc, n), p| {
                (
                    FeaturePoint::new(acc.compactness + p.compactness, acc.elongation + p.elongation),
                    n + 1,
                )
            });
        (n > 0).then(|| FeaturePoint::new(sum.compactness / n as f64, sum.elongation / n as f64))
    }
}

/// Shape signals of one labeled region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDescriptor {
    /// Region label
    pub label: u32,
    /// Feature values
    pub features: FeaturePoint,
}

impl ShapeDescriptor {
    pub const fn new(label: u32, compactness: f64, elongation: f64) -> Self {
        Self {
            label,
            features: FeaturePoint::new(compactness, elongation),
        }
    }

    #[inline]
    pub fn compactness(&self) -> f64 {
        self.features.compactness
    }

    #[inline]
    pub fn elongation(&self) -> f64 {
        self.features.elongation
    }

    /// Distance from this descriptor's features to `point`
    #[inline]
    pub fn distance_to(&self, point: &FeaturePoint) -> f64 {
        self.features.distance(point)
    }
}

/// Discrete isoperimetric score `boundary^2 / (100 * area)`.
#[inline]
pub fn compactness(boundary: u32, area: f64) -> f64 {
    let b = boundary as f64;
    b * b / (100.0 * area)
}

/// Compute one descriptor per label, sorted by label.
///
/// # Errors
///
/// Returns [`RegionError::LookupFailure`] if the passes over the grid
/// disagree about which labels exist.
pub fn shape_descriptors(grid: &PixelGrid) -> RegionResult<Vec<ShapeDescriptor>> {
    let areas = areas(grid);
    let boundaries = boundary_lengths(grid);
    let centers = centers_of_mass(grid, &areas)?;
    let central = central_moments(grid, &centers)?;

    areas
        .iter()
        .map(|(&label, &area)| {
            let boundary = *boundaries.get(&label).ok_or(RegionError::LookupFailure {
                label,
                stage: "boundary length",
            })?;
            let mu = central.get(&label).ok_or(RegionError::LookupFailure {
                label,
                stage: "central moments",
            })?;
            Ok(ShapeDescriptor::new(
                label,
                compactness(boundary, area),
                mu.elongation(),
            ))
        })
        .collect()
}
