use crate::types::ExportFormat;
use crate::Result;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Output paths for `pages` pages: `base` itself for a single page,
/// otherwise `stem_1.ext`, `stem_2.ext`, ...
pub fn image_file_names(base: &Path, pages: usize, format: ExportFormat) -> Vec<PathBuf> {
    let base = base.with_extension(format.extension());
    if pages == 1 {
        return vec![base];
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    (1..=pages)
        .map(|n| base.with_file_name(format!("{stem}_{n}.{}", format.extension())))
        .collect()
}

/// Encode a rendered page; JPEG and PNG output drop the alpha channel
pub fn encode_page(image: &RgbaImage, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).into_rgb8());
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)?;
        }
        ExportFormat::Png | ExportFormat::Pdf => {
            rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_single_page_keeps_name() {
        let names = image_file_names(Path::new("out/book.png"), 1, ExportFormat::Png);
        assert_eq!(names, vec![PathBuf::from("out/book.png")]);
    }

    #[test]
    fn test_multi_page_suffixes() {
        let names = image_file_names(Path::new("out/book"), 3, ExportFormat::Jpeg);
        assert_eq!(
            names,
            vec![
                PathBuf::from("out/book_1.jpg"),
                PathBuf::from("out/book_2.jpg"),
                PathBuf::from("out/book_3.jpg"),
            ]
        );
    }

    #[test]
    fn test_encode_png_and_jpeg() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        let png = encode_page(&image, ExportFormat::Png, 90).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let jpeg = encode_page(&image, ExportFormat::Jpeg, 90).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
