use crate::constants::*;
use crate::model::Project;
use crate::render::{RenderContext, RenderOptions, render_page_image};
use crate::templates::template;
use crate::{PhotobookError, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

/// Generate a thumbnail of one page
/// The longer edge is `max_side` pixels; empty slots are shown as grey boxes
pub fn generate_preview(
    project: &Project,
    page: usize,
    max_side: u32,
    ctx: &RenderContext,
) -> Result<RgbaImage> {
    if max_side == 0 {
        return Err(PhotobookError::InvalidInput(
            "Preview size must be positive".to_string(),
        ));
    }
    let page = project.page(page)?;
    let (width, height) = page.size.scaled_to(max_side);
    Ok(render_page_image(
        page,
        width,
        height,
        ctx,
        RenderOptions {
            show_empty_slots: true,
        },
    ))
}

/// Sketch of the `slots`-photo template, as shown before a relayout
pub fn generate_layout_preview(slots: usize, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let outline = Rgba([96, 96, 96, 255]);

    for geometry in template(slots) {
        let x = (geometry.relx * width as f32).round() as i32;
        let y = (geometry.rely * height as f32).round() as i32;
        let w = (geometry.relwidth * width as f32).round() as u32;
        let h = (geometry.relheight * height as f32).round() as u32;
        if w == 0 || h == 0 {
            continue;
        }
        let rect = Rect::at(x, y).of_size(w, h);
        draw_filled_rect_mut(&mut canvas, rect, Rgba(EMPTY_SLOT_COLOR));
        draw_hollow_rect_mut(&mut canvas, rect, outline);
    }

    canvas
}
