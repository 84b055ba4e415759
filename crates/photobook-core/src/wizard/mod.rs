//! Automatic page layout
//!
//! This module builds whole projects from a folder of images:
//! - Basic wizard: four images per page in file order
//! - Smart wizard: orientation-matched templates chosen by weighted lottery
//! - Themes: palette or asset-folder decoration of the generated pages
//!
//! Every entry point takes its random source as a parameter so runs can be
//! reproduced from a seed.

mod basic;
mod scan;
mod smart;
mod theme;

pub use basic::*;
pub use scan::*;
pub use smart::*;
pub use theme::*;

use std::path::PathBuf;

/// Outcome of a wizard run, shown to the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardReport {
    /// Images placed on pages
    pub images: usize,
    pub pages: usize,
    /// Name of the applied style or theme
    pub style: String,
    /// Images that could not be read
    pub skipped: Vec<PathBuf>,
}

impl WizardReport {
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} image(s) placed on {} page(s) using the '{}' style",
            self.images, self.pages, self.style
        );
        if !self.skipped.is_empty() {
            text.push_str(&format!("; {} unreadable image(s) skipped", self.skipped.len()));
        }
        text
    }
}
