//! Decorative frame generation and overlay

use crate::constants::MAX_PAGE_SIDE_PX;
use crate::types::{FramePreset, FrameSource};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::borrow::Cow;

/// Concentric 1px rings inward from the border.
///
/// Ring count is `thickness × min(width, height)`, at least one.
pub fn preset_frame(preset: FramePreset, width: u32, height: u32, thickness: f32) -> RgbaImage {
    let mut frame = RgbaImage::new(width, height);
    let rings = ((width.min(height) as f32 * thickness) as u32).max(1);
    let color = preset.color();
    for i in 0..rings {
        if width <= 2 * i || height <= 2 * i {
            break;
        }
        let rect = Rect::at(i as i32, i as i32).of_size(width - 2 * i, height - 2 * i);
        draw_hollow_rect_mut(&mut frame, rect, color);
    }
    frame
}

/// Frame image for a `width × height` box; `None` when a custom asset
/// cannot be loaded
pub fn load_frame(source: &FrameSource, width: u32, height: u32, thickness: f32) -> Option<RgbaImage> {
    match source {
        FrameSource::Preset(preset) => Some(preset_frame(*preset, width, height, thickness)),
        FrameSource::Custom(path) => match image::open(path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                log::warn!("Skipping frame {}: {}", path.display(), e);
                None
            }
        },
    }
}

/// Scale `frame` to `scale ×` the target size and blend it centered on top,
/// shifted by the pixel offset. Neither side grows past `MAX_PAGE_SIDE_PX`
/// (or the target side, if larger).
pub fn overlay_frame(target: &mut RgbaImage, frame: &RgbaImage, scale: f32, offset: (i64, i64)) {
    let (tw, th) = target.dimensions();
    let scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    let nw = (tw as f32 * scale).min(MAX_PAGE_SIDE_PX.max(tw) as f32) as u32;
    let nh = (th as f32 * scale).min(MAX_PAGE_SIDE_PX.max(th) as f32) as u32;
    if nw == 0 || nh == 0 {
        return;
    }
    let resized = if frame.dimensions() == (nw, nh) {
        Cow::Borrowed(frame)
    } else {
        Cow::Owned(imageops::resize(frame, nw, nh, FilterType::Lanczos3))
    };
    let x = (tw as i64 - nw as i64).div_euclid(2) + offset.0;
    let y = (th as i64 - nh as i64).div_euclid(2) + offset.1;
    imageops::overlay(target, resized.as_ref(), x, y);
}

/// Load and overlay a frame in one step; missing assets leave `target` as is
pub fn apply_frame(
    target: &mut RgbaImage,
    source: &FrameSource,
    thickness: f32,
    scale: f32,
    offset: (i64, i64),
) {
    let (w, h) = target.dimensions();
    if let Some(frame) = load_frame(source, w, h, thickness) {
        overlay_frame(target, &frame, scale, offset);
    }
}
