use crate::constants::*;
use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

/// Fixed-color box shown in place of a photo that could not be rendered.
///
/// The label is drawn only when a font is available.
pub fn error_placeholder(width: u32, height: u32, font: Option<&FontArc>) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    let ink = Rgba(ERROR_PLACEHOLDER_INK);
    let mut image = RgbaImage::from_pixel(width, height, Rgba(ERROR_PLACEHOLDER_FILL));

    for i in 0..ERROR_PLACEHOLDER_BORDER {
        if width <= 2 * i || height <= 2 * i {
            break;
        }
        let rect = Rect::at(i as i32, i as i32).of_size(width - 2 * i, height - 2 * i);
        draw_hollow_rect_mut(&mut image, rect, ink);
    }

    if let Some(font) = font {
        let scale = PxScale::from((height as f32 / 8.0).clamp(8.0, 48.0));
        let (tw, th) = text_size(scale, font, ERROR_PLACEHOLDER_LABEL);
        if tw < width && th < height {
            let x = ((width - tw) / 2) as i32;
            let y = ((height - th) / 2) as i32;
            draw_text_mut(&mut image, ink, x, y, scale, font, ERROR_PLACEHOLDER_LABEL);
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_colors() {
        let img = error_placeholder(120, 80, None);
        assert_eq!(img.dimensions(), (120, 80));
        assert_eq!(img.get_pixel(0, 0).0, ERROR_PLACEHOLDER_INK);
        assert_eq!(img.get_pixel(4, 40).0, ERROR_PLACEHOLDER_INK);
        assert_eq!(img.get_pixel(60, 40).0, ERROR_PLACEHOLDER_FILL);
    }

    #[test]
    fn test_placeholder_never_empty() {
        assert_eq!(error_placeholder(0, 0, None).dimensions(), (1, 1));
    }
}
