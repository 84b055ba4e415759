pub mod classify;
pub mod compose;
pub mod constants;
pub mod editor;
pub mod export;
pub mod io;
pub mod model;
mod options;
mod preview;
pub mod render;
mod stats;
pub mod templates;
mod types;
pub mod wizard;

pub use classify::{AnalyzedImage, classify_images, classify_orientation};
pub use compose::{ComposeRequest, compose, compose_or_placeholder};
pub use export::{export_images, export_pdf, render_page};
pub use io::{load_project, save_project};
pub use model::{PhotoKey, PhotoProperties, PhotoSlot, Page, Project, TextBox, ZDirection};
pub use options::*;
pub use preview::{generate_layout_preview, generate_preview};
pub use render::{FontLibrary, RenderContext};
pub use stats::{ProjectStatistics, calculate_statistics};
pub use types::*;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotobookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Project file error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Page {0} does not exist")]
    PageOutOfRange(usize),
    #[error("Photo slot {slot} does not exist on page {page}")]
    SlotOutOfRange { page: usize, slot: usize },
    #[error("Text box {index} does not exist on page {page}")]
    TextOutOfRange { page: usize, index: usize },
    #[error("The last remaining page cannot be deleted")]
    LastPage,
    #[error("Nothing is selected")]
    NoSelection,
    #[error("No images found in {}", .0.display())]
    NoImages(PathBuf),
    #[error("No theme folders found in {}", .0.display())]
    NoThemes(PathBuf),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl PhotobookError {
    /// Errors that are rejected before any mutation and shown as a warning.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            PhotobookError::LastPage
                | PhotobookError::NoSelection
                | PhotobookError::PageOutOfRange(_)
                | PhotobookError::SlotOutOfRange { .. }
                | PhotobookError::TextOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PhotobookError>;
