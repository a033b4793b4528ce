//! Pixel and PixelGrid - The main image container
//!
//! A [`PixelGrid`] owns a row-major buffer of [`Pixel`] values. After
//! binarization every pixel holds one of two intensities, and after
//! labeling every foreground pixel carries the index of the connected
//! region it belongs to.

use crate::error::{Error, Result};

/// A single grid cell: a two-level intensity plus an optional region label.
///
/// `label` is `None` for pixels that are not part of any (surviving)
/// foreground region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    /// Intensity, [`Pixel::FOREGROUND`] or [`Pixel::BACKGROUND`] once binarized
    pub color: u8,
    /// Region index, `None` when unindexed
    pub label: Option<u32>,
}

impl Pixel {
    /// Intensity of foreground (object) pixels
    pub const FOREGROUND: u8 = u8::MAX;
    /// Intensity of background pixels
    pub const BACKGROUND: u8 = u8::MIN;

    /// Create an unlabeled pixel with the given intensity.
    pub const fn new(color: u8) -> Self {
        Self { color, label: None }
    }

    /// Unlabeled foreground pixel.
    pub const fn foreground() -> Self {
        Self::new(Self::FOREGROUND)
    }

    /// Unlabeled background pixel.
    pub const fn background() -> Self {
        Self::new(Self::BACKGROUND)
    }

    /// Foreground pixel carrying `label`.
    pub const fn labeled(label: u32) -> Self {
        Self {
            color: Self::FOREGROUND,
            label: Some(label),
        }
    }

    #[inline]
    pub fn is_foreground(&self) -> bool {
        self.color == Self::FOREGROUND
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.label.is_some()
    }

    /// Reset to an unlabeled background pixel.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::background();
    }
}

/// Owned, row-major grid of [`Pixel`]s.
///
/// Width and height are fixed for the lifetime of the grid and are either
/// both zero or both positive.
///
/// # Examples
///
/// ```
/// use shapeclass_core::{Pixel, PixelGrid};
///
/// let mut grid = PixelGrid::new(4, 3).unwrap();
/// grid.set(1, 2, Pixel::foreground()).unwrap();
/// assert_eq!(grid.width(), 4);
/// assert!(grid.get(1, 2).unwrap().is_foreground());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<Pixel>,
}

impl PixelGrid {
    /// Create a grid filled with unlabeled background pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if exactly one of `width` and
    /// `height` is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Pixel::background())
    }

    /// Create a grid with every cell set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        if (width == 0) != (height == 0) {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            data: vec![pixel; len],
        })
    }

    /// Build a grid from rows of pixels.
    ///
    /// An empty row vector yields the 0x0 grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the rows are zero pixels wide
    /// and [`Error::RaggedRows`] if rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let expected = first.len();
        if expected == 0 {
            return Err(Error::InvalidDimension {
                width: 0,
                height: rows.len() as u32,
            });
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(Error::RaggedRows {
                row,
                expected,
                actual: r.len(),
            });
        }

        let width = expected as u32;
        let height = rows.len() as u32;
        let data = rows.into_iter().flatten().collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` for the 0x0 grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the pixel at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<&Pixel> {
        self.offset(x, y).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Pixel> {
        self.offset(x, y).map(|i| &mut self.data[i])
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the grid.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<()> {
        let (width, height) = (self.width, self.height);
        let px = self.get_mut(x, y).ok_or(Error::IndexOutOfBounds {
            x,
            y,
            width,
            height,
        })?;
        *px = pixel;
        Ok(())
    }

    /// Label at `(x, y)`; `None` when unindexed or out of range.
    #[inline]
    pub fn label_at(&self, x: u32, y: u32) -> Option<u32> {
        self.get(x, y).and_then(|p| p.label)
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // chunks() panics on a zero chunk size
        self.data.chunks(self.width.max(1) as usize)
    }

    /// Iterate over `(x, y, &pixel)` in raster order.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, &Pixel)> {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, p)| ((i as u32) % width, (i as u32) / width, p))
    }

    /// Distinct labels present in the grid, in ascending order.
    pub fn labels(&self) -> Vec<u32> {
        let mut labels: Vec<u32> = self.data.iter().filter_map(|p| p.label).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Number of distinct labels.
    pub fn label_count(&self) -> usize {
        self.labels().len()
    }

    /// Number of foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|p| p.is_foreground()).count()
    }

    /// Copy of this grid with every label removed.
    pub fn without_labels(&self) -> Self {
        let mut out = self.clone();
        for p in out.data.iter_mut() {
            p.label = None;
        }
        out
    }
}
