//! Full-resolution export
//!
//! Every page is rendered at its own pixel size, independent of the editor
//! canvas. Rendering runs on a blocking task and files are written with
//! `tokio::fs`.

mod pdf;
mod raster;

pub use pdf::export_pdf_bytes;
pub use raster::{encode_page, image_file_names};

use crate::model::Project;
use crate::render::{RenderContext, RenderOptions, render_page_image};
use crate::types::ExportFormat;
use crate::{PhotobookError, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Render page `index` at its configured size
pub fn render_page(project: &Project, index: usize, ctx: &RenderContext) -> Result<RgbaImage> {
    let page = project.page(index)?;
    Ok(render_page_image(
        page,
        page.size.width,
        page.size.height,
        ctx,
        RenderOptions::default(),
    ))
}

fn ensure_pages(project: &Project) -> Result<()> {
    if project.pages.is_empty() {
        return Err(PhotobookError::InvalidInput(
            "The project has no pages to export".to_string(),
        ));
    }
    Ok(())
}

/// Export all pages into one PDF
pub async fn export_pdf(project: &Project, path: impl AsRef<Path>, ctx: &RenderContext) -> Result<()> {
    ensure_pages(project)?;
    let path = path.as_ref().to_owned();
    let project = project.clone();
    let ctx = ctx.clone();

    let bytes = tokio::task::spawn_blocking(move || export_pdf_bytes(&project, &ctx)).await??;

    tokio::fs::write(&path, bytes).await?;
    log::info!("Exported PDF to {}", path.display());
    Ok(())
}

/// Export one image file per page.
///
/// `base` names the output; with several pages each file gets a 1-based
/// `_N` suffix. Returns the written paths.
pub async fn export_images(
    project: &Project,
    base: impl AsRef<Path>,
    format: ExportFormat,
    jpeg_quality: u8,
    ctx: &RenderContext,
) -> Result<Vec<PathBuf>> {
    ensure_pages(project)?;
    if format == ExportFormat::Pdf {
        return Err(PhotobookError::InvalidInput(
            "Use PDF export for the pdf format".to_string(),
        ));
    }
    let paths = image_file_names(base.as_ref(), project.page_count(), format);

    for (index, path) in paths.iter().enumerate() {
        let project = project.clone();
        let ctx = ctx.clone();
        let bytes = tokio::task::spawn_blocking(move || {
            let image = render_page(&project, index, &ctx)?;
            encode_page(&image, format, jpeg_quality)
        })
        .await??;
        tokio::fs::write(path, bytes).await?;
        log::debug!("Wrote page {} to {}", index + 1, path.display());
    }

    log::info!("Exported {} page image(s)", paths.len());
    Ok(paths)
}
