//! Scaling and cropping of a photo into its slot box

use crate::constants::MAX_PAGE_SIDE_PX;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Largest box with the image aspect ratio inside the master box.
///
/// The long edge matches the master box and the other edge shrinks.
pub fn fit_box(master_width: f32, master_height: f32, image_width: u32, image_height: u32) -> (f32, f32) {
    if image_width == 0 || image_height == 0 || master_width <= 0.0 || master_height <= 0.0 {
        return (master_width.max(0.0), master_height.max(0.0));
    }
    let image_ratio = image_width as f32 / image_height as f32;
    if image_ratio > master_width / master_height {
        (master_width, master_width / image_ratio)
    } else {
        (master_height * image_ratio, master_height)
    }
}

/// Integer frame size for `fit` mode, never smaller than 1×1
pub fn fit_frame_size(master: (u32, u32), image: (u32, u32)) -> (u32, u32) {
    let (w, h) = fit_box(master.0 as f32, master.1 as f32, image.0, image.1);
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

fn resize_to(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, width, height, FilterType::Lanczos3)
    }
}

/// Factor that brings a `w × h` resize target down to the largest
/// allowed side, never below `floor` on that side
fn side_limit(w: f64, h: f64, floor: u32) -> f64 {
    let limit = MAX_PAGE_SIDE_PX.max(floor) as f64;
    let longest = w.max(h);
    if longest > limit { limit / longest } else { 1.0 }
}

/// Size of the cover-scaled image before cropping.
///
/// The long side is capped at `MAX_PAGE_SIDE_PX` (or the frame, if larger).
pub fn cover_size(image: (u32, u32), frame: (u32, u32), zoom: f32) -> (u32, u32) {
    let (iw, ih) = (image.0 as f64, image.1 as f64);
    let (fw, fh) = (frame.0 as f64, frame.1 as f64);
    let zoom = if zoom.is_finite() { zoom.max(0.0) as f64 } else { 1.0 };
    let image_ratio = iw / ih;
    let (w, h) = if image_ratio > fw / fh {
        (fh * zoom * image_ratio, fh * zoom)
    } else {
        (fw * zoom, fw * zoom / image_ratio)
    };
    let shrink = side_limit(w, h, frame.0.max(frame.1));
    (((w * shrink) as u32).max(frame.0), ((h * shrink) as u32).max(frame.1))
}

/// Cover the frame, then cut a frame-sized window positioned by pan
pub fn cover(image: &RgbaImage, width: u32, height: u32, zoom: f32, pan_x: f32, pan_y: f32) -> RgbaImage {
    let (nw, nh) = cover_size(image.dimensions(), (width, height), zoom);
    let scaled = resize_to(image, nw, nh);
    let crop_x = ((nw - width) as f32 * pan_x) as u32;
    let crop_y = ((nh - height) as f32 * pan_y) as u32;
    imageops::crop_imm(&scaled, crop_x, crop_y, width, height).to_image()
}

/// Size of the contain-scaled image, capped like [`cover_size`]
pub fn contain_size(image: (u32, u32), frame: (u32, u32), zoom: f32) -> (u32, u32) {
    let (iw, ih) = (image.0 as f64, image.1 as f64);
    let zoom = if zoom.is_finite() { zoom.max(0.0) as f64 } else { 1.0 };
    let scale = (frame.0 as f64 / iw).min(frame.1 as f64 / ih) * zoom;
    let (w, h) = (iw * scale, ih * scale);
    let shrink = side_limit(w, h, frame.0.max(frame.1));
    (((w * shrink).round() as u32).max(1), ((h * shrink).round() as u32).max(1))
}

/// Contain the whole image, magnified by zoom, on a transparent frame.
///
/// The image is centered; pan slides it across any overflow.
pub fn contain(image: &RgbaImage, width: u32, height: u32, zoom: f32, pan_x: f32, pan_y: f32) -> RgbaImage {
    let (nw, nh) = contain_size(image.dimensions(), (width, height), zoom);
    let scaled = resize_to(image, nw, nh);

    let offset = |frame: u32, size: u32, pan: f32| -> i64 {
        let excess = size.saturating_sub(frame) as f32;
        ((frame as f32 - size as f32) / 2.0 - (pan - 0.5) * excess).round() as i64
    };

    let mut out = RgbaImage::new(width, height);
    imageops::replace(
        &mut out,
        &scaled,
        offset(width, nw, pan_x),
        offset(height, nh, pan_y),
    );
    out
}
