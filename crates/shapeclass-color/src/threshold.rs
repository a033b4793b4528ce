//! Binary thresholding
//!
//! Provides the threshold strategies and the binarization kernel:
//! - Fixed threshold ([`ConstantThreshold`])
//! - Midpoint of the darkest and brightest luminance ([`HalfRangeThreshold`])
//!
//! Dark pixels become foreground: a pixel is set to
//! [`Pixel::FOREGROUND`] iff its luminance is `<=` the threshold, which
//! suits dark shapes drawn on a light background.

use crate::ColorResult;
use crate::colorspace::luminance_image;
use image::{DynamicImage, GrayImage};
use shapeclass_core::{Pixel, PixelGrid};

/// Default value for [`ConstantThreshold`]
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Strategy choosing the binarization threshold for an image
pub trait ThresholdProvider {
    /// Threshold for the given luminance image
    fn find_threshold(&self, luma: &GrayImage) -> u8;
}

/// Always use the same threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantThreshold(pub u8);

impl Default for ConstantThreshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl ThresholdProvider for ConstantThreshold {
    fn find_threshold(&self, _luma: &GrayImage) -> u8 {
        self.0
    }
}

/// Threshold halfway between the minimum and maximum luminance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HalfRangeThreshold;

impl ThresholdProvider for HalfRangeThreshold {
    fn find_threshold(&self, luma: &GrayImage) -> u8 {
        match find_min_max(luma) {
            Some((min, max)) => min + (max - min) / 2,
            None => 0,
        }
    }
}

/// Runtime-selectable threshold strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdStrategy {
    /// Fixed threshold value
    Constant(u8),
    /// Midpoint of the observed luminance range (default)
    #[default]
    HalfRange,
}

impl ThresholdProvider for ThresholdStrategy {
    fn find_threshold(&self, luma: &GrayImage) -> u8 {
        match self {
            Self::Constant(t) => ConstantThreshold(*t).find_threshold(luma),
            Self::HalfRange => HalfRangeThreshold.find_threshold(luma),
        }
    }
}

/// Minimum and maximum luminance, `None` for an empty image.
pub fn find_min_max(luma: &GrayImage) -> Option<(u8, u8)> {
    luma.pixels().fold(None, |acc, p| {
        let v = p.0[0];
        Some(match acc {
            None => (v, v),
            Some((min, max)) => (min.min(v), max.max(v)),
        })
    })
}

/// Binarize a luminance image with a fixed threshold.
///
/// Every pixel of the result is unlabeled.
pub fn binarize_luma(luma: &GrayImage, threshold: u8) -> ColorResult<PixelGrid> {
    let mut grid = PixelGrid::new(luma.width(), luma.height())?;
    for (dst, src) in grid.pixels_mut().iter_mut().zip(luma.pixels()) {
        if src.0[0] <= threshold {
            *dst = Pixel::foreground();
        }
    }
    Ok(grid)
}

/// Binarize a decoded image using the threshold chosen by `provider`.
pub fn binarize(img: &DynamicImage, provider: &impl ThresholdProvider) -> ColorResult<PixelGrid> {
    let luma = luminance_image(img);
    let threshold = provider.find_threshold(&luma);
    binarize_luma(&luma, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient(values: &[u8]) -> GrayImage {
        GrayImage::from_fn(values.len() as u32, 1, |x, _| Luma([values[x as usize]]))
    }

    #[test]
    fn test_constant_threshold() {
        let luma = gradient(&[0, 50, 100]);
        assert_eq!(ConstantThreshold(42).find_threshold(&luma), 42);
        assert_eq!(ConstantThreshold::default().0, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_half_range_threshold() {
        let luma = gradient(&[40, 90, 200]);
        // 40 + (200 - 40) / 2
        assert_eq!(HalfRangeThreshold.find_threshold(&luma), 120);
    }

    #[test]
    fn test_half_range_uniform_image() {
        let luma = gradient(&[77, 77, 77]);
        assert_eq!(HalfRangeThreshold.find_threshold(&luma), 77);
        // Everything is <= threshold, so everything is foreground
        let grid = binarize_luma(&luma, 77).unwrap();
        assert_eq!(grid.count_foreground(), 3);
    }

    #[test]
    fn test_half_range_empty_image() {
        let luma = GrayImage::new(0, 0);
        assert_eq!(find_min_max(&luma), None);
        assert_eq!(HalfRangeThreshold.find_threshold(&luma), 0);
    }

    #[test]
    fn test_strategy_dispatch() {
        let luma = gradient(&[10, 20]);
        assert_eq!(ThresholdStrategy::Constant(5).find_threshold(&luma), 5);
        assert_eq!(ThresholdStrategy::HalfRange.find_threshold(&luma), 15);
        assert_eq!(ThresholdStrategy::default(), ThresholdStrategy::HalfRange);
    }

    #[test]
    fn test_binarize_luma_inclusive() {
        let luma = gradient(&[99, 100, 101]);
        let grid = binarize_luma(&luma, 100).unwrap();
        assert!(grid.get(0, 0).unwrap().is_foreground());
        assert!(grid.get(1, 0).unwrap().is_foreground());
        assert!(!grid.get(2, 0).unwrap().is_foreground());
        assert!(grid.pixels().iter().all(|p| p.label.is_none()));
    }

    #[test]
    fn test_binarize_two_levels_only() {
        let luma = gradient(&[0, 13, 128, 250, 255]);
        let grid = binarize_luma(&luma, 128).unwrap();
        assert!(
            grid.pixels()
                .iter()
                .all(|p| p.color == Pixel::FOREGROUND || p.color == Pixel::BACKGROUND)
        );
    }
}
