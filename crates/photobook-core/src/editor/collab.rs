//! Collaborators supplied by the front-end
//!
//! The core never draws widgets or opens dialogs itself. A front-end
//! implements these traits and hands them to the editor session.

use crate::render::canvas::{CanvasBackground, ElementId, WindowContent};
use crate::types::PixelRect;
use image::RgbaImage;
use std::path::PathBuf;

/// File type offered by a file picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const IMAGE_FILES: FileFilter = FileFilter {
    name: "Image files",
    extensions: &["jpg", "jpeg", "png", "gif", "bmp"],
};

pub const FRAME_FILES: FileFilter = FileFilter {
    name: "PNG frames",
    extensions: &["png"],
};

pub const PROJECT_FILES: FileFilter = FileFilter {
    name: "Photo book project",
    extensions: &["lolaba", "json"],
};

/// Blocking dialogs. `None` or `false` means the user cancelled.
pub trait Dialogs {
    fn pick_file(&mut self, title: &str, filters: &[FileFilter]) -> Option<PathBuf>;
    fn pick_save_path(&mut self, title: &str, default_extension: &str) -> Option<PathBuf>;
    fn pick_directory(&mut self, title: &str) -> Option<PathBuf>;
    /// Returns a hex color string
    fn pick_color(&mut self, initial: &str) -> Option<String>;
    fn confirm(&mut self, question: &str) -> bool;
    fn notify(&mut self, message: &str);
    fn warn(&mut self, message: &str);
}

/// Drawing target of the live editor
pub trait CanvasSurface {
    fn size(&self) -> (u32, u32);
    /// Remove every placed element
    fn clear(&mut self);
    fn set_background(&mut self, background: &CanvasBackground);
    /// Static image, not interactive
    fn place_image(&mut self, id: ElementId, rect: PixelRect, image: &RgbaImage);
    /// Interactive element receiving press/drag/release
    fn place_window(&mut self, id: ElementId, rect: PixelRect, content: &WindowContent);
    fn move_element(&mut self, id: ElementId, dx: f32, dy: f32);
    fn raise(&mut self, id: ElementId);
    /// Toggle the selection highlight
    fn set_selected(&mut self, id: ElementId, selected: bool);
}

/// Busy cursor or spinner
pub trait BusyIndicator {
    fn set_busy(&mut self, busy: bool);
}

/// Shows the busy indicator until dropped
pub struct BusyGuard<'a> {
    indicator: &'a mut dyn BusyIndicator,
}

impl<'a> BusyGuard<'a> {
    pub fn new(indicator: &'a mut dyn BusyIndicator) -> Self {
        indicator.set_busy(true);
        Self { indicator }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.indicator.set_busy(false);
    }
}

/// Everything the session needs from the front-end for one command
pub struct Collaborators<'a> {
    pub dialogs: &'a mut dyn Dialogs,
    pub surface: &'a mut dyn CanvasSurface,
    pub busy: &'a mut dyn BusyIndicator,
}
