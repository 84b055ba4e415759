//! Off-screen page rendering
//!
//! Draws one page into an RGBA buffer at any size. Each element is drawn
//! independently so a broken asset only affects its own box.

use super::{RenderContext, draw_text_box};
use crate::compose::{ComposeRequest, apply_frame, compose_or_placeholder};
use crate::constants::*;
use crate::model::Page;
use crate::types::{Background, parse_hex_color};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// What to draw besides the exported content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fill empty slots with a neutral box (previews)
    pub show_empty_slots: bool,
}

fn default_background() -> Rgba<u8> {
    parse_hex_color(DEFAULT_BACKGROUND).unwrap_or(Rgba([245, 245, 245, 255]))
}

/// Background filled or stretched to `width × height`
pub fn render_background(background: Option<&Background>, width: u32, height: u32) -> RgbaImage {
    match background {
        Some(Background::Color(hex)) => {
            let color = parse_hex_color(hex).unwrap_or_else(|e| {
                log::warn!("{}; using default background", e);
                default_background()
            });
            RgbaImage::from_pixel(width, height, color)
        }
        Some(Background::Image { path }) => match image::open(path) {
            Ok(img) => img
                .resize_exact(width, height, FilterType::Lanczos3)
                .to_rgba8(),
            Err(e) => {
                log::warn!("Could not load background {}: {}", path.display(), e);
                RgbaImage::from_pixel(width, height, default_background())
            }
        },
        None => RgbaImage::from_pixel(width, height, default_background()),
    }
}

/// Composite every photo slot in paint order
pub fn render_photos(canvas: &mut RgbaImage, page: &Page, ctx: &RenderContext, options: RenderOptions) {
    let (width, height) = canvas.dimensions();
    let offset_scale = ctx.scale_for(height);
    let label_font = ctx.fonts.fallback();

    for index in page.paint_order() {
        let (Some(slot), Some(rect)) = (page.slot(index), page.slot_rect(index, width, height))
        else {
            continue;
        };
        if rect.width == 0 || rect.height == 0 {
            continue;
        }

        let Some(path) = slot.path() else {
            if options.show_empty_slots {
                let fill = Rect::at(rect.x as i32, rect.y as i32).of_size(rect.width, rect.height);
                draw_filled_rect_mut(canvas, fill, Rgba(EMPTY_SLOT_COLOR));
            }
            continue;
        };

        let properties = slot.effective_properties();
        let (master_w, master_h) = page
            .slot_master_size(index, width, height)
            .unwrap_or((rect.width, rect.height));
        let request = ComposeRequest::new(rect.width, rect.height, &properties)
            .with_master(master_w, master_h)
            .with_offset_scale(offset_scale);
        let composed = compose_or_placeholder(path, &request, label_font.as_ref());
        imageops::overlay(canvas, &composed, rect.x, rect.y);
    }
}

/// Decorative border over the whole page
pub fn render_page_frame(canvas: &mut RgbaImage, page: &Page, ctx: &RenderContext) {
    let Some(frame) = &page.page_frame_path else {
        return;
    };
    let scale = ctx.scale_for(canvas.height());
    let offset = (
        (page.page_frame_offset_x as f32 * scale).round() as i64,
        (page.page_frame_offset_y as f32 * scale).round() as i64,
    );
    apply_frame(
        canvas,
        frame,
        page.page_frame_thickness,
        page.page_frame_scale,
        offset,
    );
}

/// Text boxes with sizes scaled to the canvas height
pub fn render_texts(canvas: &mut RgbaImage, page: &Page, ctx: &RenderContext) {
    let (width, height) = canvas.dimensions();
    let area = page.drawable_area(width, height);
    for (index, text) in page.texts.iter().enumerate() {
        if text.text.trim().is_empty() {
            continue;
        }
        let Some(font) = ctx.fonts.resolve(&text.font_family, text.font_style) else {
            log::warn!("No font available, skipping text box {}", index);
            continue;
        };
        let size = text.scaled_font_size(height, ctx.reference_height);
        draw_text_box(canvas, text, area, size, &font);
    }
}

/// Render `page` at `width × height`.
///
/// Order: background, photos in paint order, page frame, text boxes.
pub fn render_page_image(
    page: &Page,
    width: u32,
    height: u32,
    ctx: &RenderContext,
    options: RenderOptions,
) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    log::debug!("Rendering page at {}x{}", width, height);

    let mut canvas = render_background(page.background.as_ref(), width, height);
    render_photos(&mut canvas, page, ctx, options);
    render_page_frame(&mut canvas, page, ctx);
    render_texts(&mut canvas, page, ctx);
    canvas
}
