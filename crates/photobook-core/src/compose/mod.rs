//! Photo compositing
//!
//! Turns a source image and the slot's [`PhotoProperties`] into the pixel
//! buffer drawn for that slot:
//! 1. grayscale, brightness, contrast, saturation
//! 2. cover-and-pan (`fill`) or contain (`fit`) scaling with zoom
//! 3. decorative frame on top
//!
//! Compositing is a pure function of its inputs; the same request always
//! yields the same pixels.

mod enhance;
mod fit;
mod frame;
mod placeholder;

pub use enhance::luma;
pub use fit::{cover_size, fit_box, fit_frame_size};
pub use frame::{apply_frame, preset_frame};
pub use placeholder::error_placeholder;

use crate::model::PhotoProperties;
use crate::types::FitMode;
use crate::{PhotobookError, Result};
use ab_glyph::FontArc;
use image::RgbaImage;
use std::borrow::Cow;
use std::path::Path;

/// Everything needed to composite one slot
#[derive(Debug, Clone, Copy)]
pub struct ComposeRequest<'a> {
    /// Slot box in output pixels
    pub frame_width: u32,
    pub frame_height: u32,
    /// Template master box in output pixels, used by `fit` mode
    pub master_width: u32,
    pub master_height: u32,
    pub properties: &'a PhotoProperties,
    /// Multiplier for frame offsets, which are stored in editor pixels
    pub offset_scale: f32,
}

impl<'a> ComposeRequest<'a> {
    pub fn new(frame_width: u32, frame_height: u32, properties: &'a PhotoProperties) -> Self {
        Self {
            frame_width,
            frame_height,
            master_width: frame_width,
            master_height: frame_height,
            properties,
            offset_scale: 1.0,
        }
    }

    pub fn with_master(mut self, width: u32, height: u32) -> Self {
        self.master_width = width;
        self.master_height = height;
        self
    }

    pub fn with_offset_scale(mut self, offset_scale: f32) -> Self {
        self.offset_scale = offset_scale;
        self
    }

    /// Output size for a source image of `image` dimensions
    pub fn output_size(&self, image: (u32, u32)) -> (u32, u32) {
        match self.properties.fit_mode {
            FitMode::Fill => (self.frame_width, self.frame_height),
            FitMode::Fit => {
                let master = if self.master_width == 0 || self.master_height == 0 {
                    (self.frame_width, self.frame_height)
                } else {
                    (self.master_width, self.master_height)
                };
                fit_frame_size(master, image)
            }
        }
    }
}

/// Composite `source` according to `request`.
///
/// The output is `frame_width × frame_height` in `fill` mode and the
/// aspect-corrected master box in `fit` mode.
pub fn compose(source: &RgbaImage, request: &ComposeRequest) -> Result<RgbaImage> {
    if request.frame_width == 0 || request.frame_height == 0 {
        return Err(PhotobookError::InvalidInput(format!(
            "Empty slot box {}x{}",
            request.frame_width, request.frame_height
        )));
    }
    if source.width() == 0 || source.height() == 0 {
        return Err(PhotobookError::InvalidInput("Empty source image".to_string()));
    }

    let props = request.properties.clamped();

    let adjusted: Cow<RgbaImage> = if enhance::is_identity(&props) {
        Cow::Borrowed(source)
    } else {
        let mut image = source.clone();
        enhance::apply(&mut image, &props);
        Cow::Owned(image)
    };

    let (width, height) = request.output_size(source.dimensions());
    let mut out = match props.fit_mode {
        FitMode::Fill => fit::cover(&adjusted, width, height, props.zoom, props.pan_x, props.pan_y),
        FitMode::Fit => fit::contain(&adjusted, width, height, props.zoom, props.pan_x, props.pan_y),
    };

    if let Some(frame_source) = &props.frame_path {
        let offset = (
            (props.frame_offset_x as f32 * request.offset_scale).round() as i64,
            (props.frame_offset_y as f32 * request.offset_scale).round() as i64,
        );
        apply_frame(
            &mut out,
            frame_source,
            props.frame_thickness,
            props.frame_scale,
            offset,
        );
    }

    Ok(out)
}

/// Load the image at `path` and composite it
pub fn compose_path(path: impl AsRef<Path>, request: &ComposeRequest) -> Result<RgbaImage> {
    let source = image::open(path.as_ref())?.to_rgba8();
    compose(&source, request)
}

/// Like [`compose_path`], but any failure yields the error placeholder
pub fn compose_or_placeholder(
    path: impl AsRef<Path>,
    request: &ComposeRequest,
    label_font: Option<&FontArc>,
) -> RgbaImage {
    let path = path.as_ref();
    match compose_path(path, request) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("Could not render {}: {}", path.display(), e);
            error_placeholder(request.frame_width, request.frame_height, label_font)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ERROR_PLACEHOLDER_FILL;
    use crate::types::{FrameSource, FramePreset};
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255])
        })
    }

    #[test]
    fn test_fill_output_size() {
        let props = PhotoProperties::default();
        let out = compose(&gradient(64, 48), &ComposeRequest::new(30, 40, &props)).unwrap();
        assert_eq!(out.dimensions(), (30, 40));
    }

    #[test]
    fn test_fit_mode_uses_master_box() {
        let props = PhotoProperties {
            fit_mode: FitMode::Fit,
            ..PhotoProperties::default()
        };
        let request = ComposeRequest::new(50, 50, &props).with_master(100, 100);
        let out = compose(&gradient(200, 100), &request).unwrap();
        assert_eq!(out.dimensions(), (100, 50));
        assert_eq!(out.get_pixel(50, 25).0[3], 255);
    }

    #[test]
    fn test_frame_drawn_on_top() {
        let props = PhotoProperties::with_frame(FrameSource::Preset(FramePreset::Black));
        let source = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        let out = compose(&source, &ComposeRequest::new(40, 40, &props)).unwrap();
        assert_ne!(out.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(20, 20).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_frame_rejected() {
        let props = PhotoProperties::default();
        assert!(compose(&gradient(10, 10), &ComposeRequest::new(0, 10, &props)).is_err());
    }

    #[test]
    fn test_missing_file_gives_placeholder() {
        let props = PhotoProperties::default();
        let out = compose_or_placeholder(
            "/nonexistent/photo.jpg",
            &ComposeRequest::new(64, 32, &props),
            None,
        );
        assert_eq!(out.dimensions(), (64, 32));
        assert_eq!(out.get_pixel(32, 16).0, ERROR_PLACEHOLDER_FILL);
    }
}
