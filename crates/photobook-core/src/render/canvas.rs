//! Live page drawing onto the editor canvas
//!
//! The editor canvas is an abstract [`CanvasSurface`]; this module decides
//! what goes where and records the resulting boxes for hit testing.

use super::{RenderContext, layout_text, render_background, text_rect};
use crate::compose::{ComposeRequest, compose_or_placeholder, preset_frame};
use crate::editor::CanvasSurface;
use crate::model::Page;
use crate::types::{FontStyle, FrameSource, PixelRect, parse_hex_color};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

/// Identity of a drawn element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Photo(usize),
    Text(usize),
    PageFrame,
}

/// Page fill handed to the surface
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasBackground {
    Color(Rgba<u8>),
    Image(RgbaImage),
}

/// Content of a movable window on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum WindowContent {
    /// Composited photo
    Image(RgbaImage),
    /// Empty slot; clicking it should offer to add a photo
    AddPhoto,
    Text {
        text: String,
        font_family: String,
        /// Already scaled to the canvas height
        font_size_px: f32,
        font_style: FontStyle,
        color: Rgba<u8>,
    },
}

/// Boxes of the elements drawn by [`draw_page`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasLayout {
    /// Canvas size the boxes were computed for
    pub size: (u32, u32),
    /// Drawable area the fractions refer to
    pub area: PixelRect,
    /// Photo boxes in paint order, back to front
    pub photos: Vec<(usize, PixelRect)>,
    pub texts: Vec<(usize, PixelRect)>,
}

impl CanvasLayout {
    /// Topmost photo containing the point
    pub fn photo_at(&self, x: f32, y: f32) -> Option<usize> {
        self.photos
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(index, _)| *index)
    }

    /// Topmost photo under the point, ignoring `exclude`
    pub fn photo_at_except(&self, x: f32, y: f32, exclude: usize) -> Option<usize> {
        self.photos
            .iter()
            .rev()
            .filter(|(index, _)| *index != exclude)
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(index, _)| *index)
    }

    pub fn text_at(&self, x: f32, y: f32) -> Option<usize> {
        self.texts
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(index, _)| *index)
    }

    pub fn rect_of(&self, id: ElementId) -> Option<PixelRect> {
        match id {
            ElementId::Photo(index) => self.photos.iter().find(|(i, _)| *i == index).map(|(_, r)| *r),
            ElementId::Text(index) => self.texts.iter().find(|(i, _)| *i == index).map(|(_, r)| *r),
            ElementId::PageFrame => Some(PixelRect::new(0, 0, self.size.0, self.size.1)),
        }
    }
}

fn canvas_background(page: &Page, width: u32, height: u32) -> CanvasBackground {
    match &page.background {
        Some(crate::types::Background::Image { .. }) => {
            CanvasBackground::Image(render_background(page.background.as_ref(), width, height))
        }
        _ => {
            let fill = render_background(page.background.as_ref(), 1, 1);
            CanvasBackground::Color(*fill.get_pixel(0, 0))
        }
    }
}

fn page_frame_image(page: &Page, width: u32, height: u32) -> Option<RgbaImage> {
    match page.page_frame_path.as_ref()? {
        FrameSource::Preset(preset) => {
            Some(preset_frame(*preset, width, height, page.page_frame_thickness))
        }
        FrameSource::Custom(path) => match image::open(path) {
            Ok(img) => Some(img.resize_exact(width, height, FilterType::Lanczos3).to_rgba8()),
            Err(e) => {
                log::warn!("Skipping page frame {}: {}", path.display(), e);
                None
            }
        },
    }
}

/// Redraw `page` on the surface at its current size.
///
/// Same stacking as the exporter: photos in paint order, the page frame,
/// then texts.
pub fn draw_page(surface: &mut dyn CanvasSurface, page: &Page, ctx: &RenderContext) -> CanvasLayout {
    let (width, height) = surface.size();
    let area = page.drawable_area(width, height);
    let mut layout = CanvasLayout {
        size: (width, height),
        area,
        ..CanvasLayout::default()
    };

    surface.clear();
    if width <= 1 || height <= 1 {
        return layout;
    }
    surface.set_background(&canvas_background(page, width, height));

    let scale = ctx.scale_for(height);
    let label_font = ctx.fonts.fallback();

    for index in page.paint_order() {
        let (Some(slot), Some(rect)) = (page.slot(index), page.slot_rect(index, width, height))
        else {
            continue;
        };
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        let content = match slot.path() {
            Some(path) => {
                let properties = slot.effective_properties();
                let (master_w, master_h) = page
                    .slot_master_size(index, width, height)
                    .unwrap_or((rect.width, rect.height));
                let request = ComposeRequest::new(rect.width, rect.height, &properties)
                    .with_master(master_w, master_h)
                    .with_offset_scale(scale);
                WindowContent::Image(compose_or_placeholder(path, &request, label_font.as_ref()))
            }
            None => WindowContent::AddPhoto,
        };
        surface.place_window(ElementId::Photo(index), rect, &content);
        layout.photos.push((index, rect));
    }

    if let Some(frame) = page_frame_image(page, width, height) {
        surface.place_image(ElementId::PageFrame, PixelRect::new(0, 0, width, height), &frame);
    }

    for (index, text) in page.texts.iter().enumerate() {
        let size_px = text.scaled_font_size(height, ctx.reference_height);
        let font = ctx.fonts.resolve(&text.font_family, text.font_style);
        let measured = layout_text(&text.text, size_px, font.as_ref());
        let rect = text_rect(text, area, &measured);
        let color = parse_hex_color(&text.font_color).unwrap_or(Rgba([0, 0, 0, 255]));
        let content = WindowContent::Text {
            text: text.text.clone(),
            font_family: text.font_family.clone(),
            font_size_px: size_px,
            font_style: text.font_style,
            color,
        };
        surface.place_window(ElementId::Text(index), rect, &content);
        surface.raise(ElementId::Text(index));
        layout.texts.push((index, rect));
    }

    layout
}
