//! Page rendering
//!
//! This module draws pages from the model:
//! - Off-screen raster rendering at any page size (export, previews)
//! - Live drawing onto an abstract canvas surface for the editor
//! - Font resolution for text boxes

pub mod canvas;
mod fonts;
mod page;
mod text;

pub use fonts::*;
pub use page::*;
pub use text::*;

use crate::constants::REFERENCE_EDITOR_HEIGHT;
use crate::options::PhotobookConfig;

/// Shared resources for rendering
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub fonts: FontLibrary,
    /// Canvas height that font sizes and frame offsets are authored against
    pub reference_height: f32,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            fonts: FontLibrary::default(),
            reference_height: REFERENCE_EDITOR_HEIGHT,
        }
    }
}

impl RenderContext {
    pub fn from_config(config: &PhotobookConfig) -> Self {
        Self {
            fonts: FontLibrary::new(config.font_dirs.clone(), config.default_font.clone()),
            reference_height: config.reference_editor_height,
        }
    }

    /// Scale from authored units to a page `height` pixels tall
    pub fn scale_for(&self, height: u32) -> f32 {
        height as f32 / self.reference_height
    }
}
