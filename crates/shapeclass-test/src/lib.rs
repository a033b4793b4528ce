//! shapeclass-test - Regression test helpers for shapeclass
//!
//! This crate provides a small regression framework modelled on a
//! golden-value style (compare, count, report all failures at the end) and
//! builders for synthetic fixtures, so tests never depend on image files.
//!
//! # Usage
//!
//! ```ignore
//! use shapeclass_test::{RegParams, grid_from_ascii};
//!
//! let grid = grid_from_ascii(&["##.", "##.", "..."]).unwrap();
//! let mut rp = RegParams::new("label");
//! rp.compare_values(4.0, grid.count_foreground() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use image::{DynamicImage, Rgb, RgbImage};
use shapeclass_core::{Pixel, PixelGrid};

/// Dark ink used for shapes in synthetic images
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);
/// Light paper used for the background of synthetic images
pub const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

/// Install a `tracing` subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

fn rows_from_ascii(
    rows: &[&str],
    mut cell: impl FnMut(char) -> TestResult<Pixel>,
) -> TestResult<PixelGrid> {
    let rows = rows
        .iter()
        .map(|row| row.chars().map(&mut cell).collect::<TestResult<Vec<_>>>())
        .collect::<TestResult<Vec<_>>>()?;
    Ok(PixelGrid::from_rows(rows)?)
}

/// Build a binarized, unlabeled grid: `#` is foreground, `.` background.
pub fn grid_from_ascii(rows: &[&str]) -> TestResult<PixelGrid> {
    rows_from_ascii(rows, |c| match c {
        '#' => Ok(Pixel::foreground()),
        '.' => Ok(Pixel::background()),
        other => Err(TestError::InvalidFixture(format!(
            "unexpected character '{}'",
            other
        ))),
    })
}

/// Build a labeled grid: digits `0-9` and letters `a-z` (10..35) are
/// foreground pixels with that label, `.` is unlabeled background.
pub fn labeled_grid_from_ascii(rows: &[&str]) -> TestResult<PixelGrid> {
    rows_from_ascii(rows, |c| match c {
        '.' => Ok(Pixel::background()),
        c => c
            .to_digit(36)
            .map(Pixel::labeled)
            .ok_or_else(|| TestError::InvalidFixture(format!("unexpected character '{}'", c))),
    })
}

/// Build an RGB image: `#` is black ink, `.` white paper.
pub fn image_from_ascii(rows: &[&str]) -> TestResult<DynamicImage> {
    let grid = grid_from_ascii(rows)?;
    let mut img = canvas(grid.width(), grid.height());
    for (x, y, p) in grid.enumerate() {
        if p.is_foreground() {
            img.put_pixel(x, y, INK);
        }
    }
    Ok(DynamicImage::ImageRgb8(img))
}

/// A blank white canvas.
pub fn canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, PAPER)
}

/// Paint an axis-aligned `w` x `h` bar with its top-left corner at `(x, y)`.
pub fn draw_bar(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32) {
    for yy in y..(y + h).min(img.height()) {
        for xx in x..(x + w).min(img.width()) {
            img.put_pixel(xx, yy, INK);
        }
    }
}

/// Paint a filled square.
pub fn draw_square(img: &mut RgbImage, x: u32, y: u32, side: u32) {
    draw_bar(img, x, y, side, side);
}

/// Paint a filled disc of radius `r` centered on `(cx, cy)`.
pub fn draw_disc(img: &mut RgbImage, cx: u32, cy: u32, r: u32) {
    let (cx, cy, r) = (cx as i64, cy as i64, r as i64);
    for y in (cy - r).max(0)..=(cy + r).min(img.height() as i64 - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(img.width() as i64 - 1) {
            if (x - cx).pow(2) + (y - cy).pow(2) <= r * r {
                img.put_pixel(x as u32, y as u32, INK);
            }
        }
    }
}

/// Synthetic training image with three shape families of three shapes each:
/// discs of radius 10 (top row), 30x10 rectangles in both orientations
/// (middle row) and 40x4 bars (bottom row).
pub fn shapes_image() -> DynamicImage {
    let mut img = canvas(200, 150);

    for cx in [25, 75, 125] {
        draw_disc(&mut img, cx, 25, 10);
    }

    draw_bar(&mut img, 10, 60, 30, 10);
    draw_bar(&mut img, 60, 60, 30, 10);
    draw_bar(&mut img, 120, 50, 10, 30);

    for x in [10, 60, 110] {
        draw_bar(&mut img, x, 110, 40, 4);
    }

    DynamicImage::ImageRgb8(img)
}

/// Test image with one shape of each family from [`shapes_image`], at
/// different sizes and in a different order: a 50x5 bar, a disc of
/// radius 12 and a 36x12 rectangle, left to right.
pub fn query_image() -> DynamicImage {
    let mut img = canvas(200, 60);
    draw_bar(&mut img, 5, 10, 50, 5);
    draw_disc(&mut img, 90, 30, 12);
    draw_bar(&mut img, 130, 20, 36, 12);
    DynamicImage::ImageRgb8(img)
}
