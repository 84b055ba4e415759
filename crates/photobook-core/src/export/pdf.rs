use super::render_page;
use crate::constants::{PDF_DPI, px_to_mm};
use crate::model::Project;
use crate::render::RenderContext;
use crate::Result;
use ::image::DynamicImage;
use printpdf::*;

/// Render every page and assemble a PDF with one full-page image per page.
///
/// Each page is sized so that its raster lands at exactly `PDF_DPI`.
pub fn export_pdf_bytes(project: &Project, ctx: &RenderContext) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new("Photo book");
    let mut pages = Vec::with_capacity(project.page_count());

    for index in 0..project.page_count() {
        let rendered = render_page(project, index, ctx)?;
        let (width, height) = rendered.dimensions();
        let rgb = DynamicImage::ImageRgba8(rendered).into_rgb8();

        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let image_id = doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                dpi: Some(PDF_DPI),
                ..Default::default()
            },
        }];

        pages.push(PdfPage::new(
            Mm(px_to_mm(width, PDF_DPI)),
            Mm(px_to_mm(height, PDF_DPI)),
            ops,
        ));
        log::debug!("Added page {} ({}x{} px) to PDF", index + 1, width, height);
    }

    doc.pages = pages;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        log::debug!("PDF warning: {:?}", warning);
    }

    Ok(bytes)
}
