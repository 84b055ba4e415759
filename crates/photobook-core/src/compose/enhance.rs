//! Color adjustments applied before framing
//!
//! Each filter blends the image against a degenerate version of itself:
//! black for brightness, the mean gray for contrast and the per-pixel luma
//! for saturation. Alpha is never touched.

use crate::model::PhotoProperties;
use image::RgbaImage;

/// ITU-R 601 luma in fixed point
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

#[inline]
fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Replace every color with its luma
pub fn grayscale(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let l = luma(r, g, b);
        pixel.0 = [l, l, l, a];
    }
}

pub fn brightness(image: &mut RgbaImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    for pixel in image.pixels_mut() {
        for c in &mut pixel.0[..3] {
            *c = clamp_channel(*c as f32 * factor);
        }
    }
}

/// Rounded mean luma of the whole image
pub fn mean_luma(image: &RgbaImage) -> f32 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = image
        .pixels()
        .map(|p| luma(p.0[0], p.0[1], p.0[2]) as u64)
        .sum();
    (sum as f64 / count as f64).round() as f32
}

pub fn contrast(image: &mut RgbaImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    let mean = mean_luma(image);
    for pixel in image.pixels_mut() {
        for c in &mut pixel.0[..3] {
            *c = clamp_channel(mean + (*c as f32 - mean) * factor);
        }
    }
}

pub fn saturation(image: &mut RgbaImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let l = luma(r, g, b) as f32;
        for c in &mut pixel.0[..3] {
            *c = clamp_channel(l + (*c as f32 - l) * factor);
        }
    }
}

/// Whether `properties` change colors at all
pub fn is_identity(properties: &PhotoProperties) -> bool {
    !properties.grayscale
        && properties.brightness == 1.0
        && properties.contrast == 1.0
        && properties.saturation == 1.0
}

/// Grayscale, then brightness, contrast and saturation, in that order
pub fn apply(image: &mut RgbaImage, properties: &PhotoProperties) {
    if properties.grayscale {
        grayscale(image);
    }
    brightness(image, properties.brightness);
    contrast(image, properties.contrast);
    saturation(image, properties.saturation);
}
