//! Luminance reduction
//!
//! Color images are reduced to one channel with the classic perceptual
//! weights `0.299 R + 0.587 G + 0.114 B`. Alpha is ignored.

use image::{DynamicImage, GrayImage, Luma};

/// Weight of the red channel
pub const LUMA_RED: f64 = 0.299;
/// Weight of the green channel
pub const LUMA_GREEN: f64 = 0.587;
/// Weight of the blue channel
pub const LUMA_BLUE: f64 = 0.114;

/// Perceptual luminance of an RGB triple, rounded to the nearest level.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_RED * r as f64 + LUMA_GREEN * g as f64 + LUMA_BLUE * b as f64;
    y.round().clamp(0.0, 255.0) as u8
}

/// Reduce any decoded image to an 8-bit luminance image.
pub fn luminance_image(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luminance(r, g, b)])
    })
}
