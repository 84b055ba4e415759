use crate::model::TextBox;
use crate::types::{PixelRect, parse_hex_color};
use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

/// Line advance as a multiple of the font size
const LINE_SPACING: f32 = 1.2;

/// Measured multi-line text block
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub width: u32,
    pub height: u32,
    /// Per line: text, width, and top offset inside the block
    pub lines: Vec<(String, u32, u32)>,
}

/// Measure `text` at `size_px`; without a font an average glyph width is assumed
pub fn layout_text(text: &str, size_px: f32, font: Option<&FontArc>) -> TextLayout {
    let size_px = size_px.max(1.0);
    let line_height = (size_px * LINE_SPACING).ceil() as u32;
    let mut lines = Vec::new();
    let mut width = 0;
    for (i, line) in text.split('\n').enumerate() {
        let line_width = match font {
            Some(font) => text_size(PxScale::from(size_px), font, line).0,
            None => (line.chars().count() as f32 * size_px * 0.6).ceil() as u32,
        };
        width = width.max(line_width);
        lines.push((line.to_string(), line_width, i as u32 * line_height));
    }
    let height = line_height * lines.len().max(1) as u32;
    TextLayout {
        width,
        height,
        lines,
    }
}

/// Box a text occupies when centered on its anchor inside `area`
pub fn text_rect(text: &TextBox, area: PixelRect, layout: &TextLayout) -> PixelRect {
    let cx = area.x as f32 + text.relx * area.width as f32;
    let cy = area.y as f32 + text.rely * area.height as f32;
    PixelRect::new(
        (cx - layout.width as f32 / 2.0).round() as i64,
        (cy - layout.height as f32 / 2.0).round() as i64,
        layout.width,
        layout.height,
    )
}

/// Text color, falling back to black for unparsable values
pub fn text_color(text: &TextBox) -> Rgba<u8> {
    parse_hex_color(&text.font_color).unwrap_or_else(|e| {
        log::warn!("{}; drawing text in black", e);
        Rgba([0, 0, 0, 255])
    })
}

/// Draw a text box centered on its anchor; lines are centered individually
pub fn draw_text_box(
    canvas: &mut RgbaImage,
    text: &TextBox,
    area: PixelRect,
    size_px: f32,
    font: &FontArc,
) -> PixelRect {
    let layout = layout_text(&text.text, size_px, Some(font));
    let rect = text_rect(text, area, &layout);
    let color = text_color(text);
    let scale = PxScale::from(size_px.max(1.0));
    for (line, line_width, top) in &layout.lines {
        if line.is_empty() {
            continue;
        }
        let x = rect.x + (layout.width as i64 - *line_width as i64) / 2;
        let y = rect.y + *top as i64;
        draw_text_mut(canvas, color, x as i32, y as i32, scale, font, line);
    }
    rect
}
