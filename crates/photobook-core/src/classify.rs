//! Orientation and palette-mood classification of source images

use crate::constants::*;
use crate::types::{ColorCategory, Orientation};
use crate::Result;
use image::imageops::FilterType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A source image with its measured orientation
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}

/// Classify by aspect ratio `width / height`
pub fn classify_orientation(width: u32, height: u32) -> Orientation {
    if height == 0 {
        return Orientation::Landscape;
    }
    let ratio = width as f32 / height as f32;
    if ratio > LANDSCAPE_RATIO {
        Orientation::Landscape
    } else if ratio < PORTRAIT_RATIO {
        Orientation::Portrait
    } else {
        Orientation::Square
    }
}

/// Read the image header and classify its orientation
pub fn analyze_image(path: impl AsRef<Path>) -> Result<AnalyzedImage> {
    let path = path.as_ref();
    let (width, height) = image::image_dimensions(path)?;
    Ok(AnalyzedImage {
        path: path.to_path_buf(),
        width,
        height,
        orientation: classify_orientation(width, height),
    })
}

/// Analyze every path; unreadable files are logged and returned separately
pub fn analyze_images(paths: &[PathBuf]) -> (Vec<AnalyzedImage>, Vec<PathBuf>) {
    let mut analyzed = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();
    for path in paths {
        match analyze_image(path) {
            Ok(image) => analyzed.push(image),
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                skipped.push(path.clone());
            }
        }
    }
    (analyzed, skipped)
}

/// Bucket of a single pixel; thresholds are checked in taxonomy order
pub fn classify_pixel(r: u8, g: u8, b: u8) -> Option<ColorCategory> {
    if r > 150 && g > 150 && b < 100 {
        Some(ColorCategory::Warm)
    } else if r > 130 && g > 90 && g < 150 && b < 100 {
        Some(ColorCategory::Autumn)
    } else if b > 150 && r < 100 && g < 150 {
        Some(ColorCategory::Cool)
    } else if g > 130 && r < 130 && b < 130 {
        Some(ColorCategory::Forest)
    } else if r > 180 && g > 180 && b > 180 {
        Some(ColorCategory::Light)
    } else {
        None
    }
}

/// Pixel tallies per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: HashMap<ColorCategory, usize>,
}

impl CategoryCounts {
    pub fn add(&mut self, category: ColorCategory) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    pub fn get(&self, category: ColorCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn tally_image(&mut self, image: &image::RgbaImage) {
        for pixel in image.pixels() {
            let [r, g, b, _] = pixel.0;
            if let Some(category) = classify_pixel(r, g, b) {
                self.add(category);
            }
        }
    }

    /// Highest non-light bucket; light only wins when it is the sole
    /// non-zero bucket. Ties go to the earlier category.
    pub fn dominant(&self) -> Option<ColorCategory> {
        let mut best: Option<(ColorCategory, usize)> = None;
        for category in ColorCategory::ALL {
            if category == ColorCategory::Light {
                continue;
            }
            let count = self.get(category);
            if count > 0 && best.is_none_or(|(_, top)| count > top) {
                best = Some((category, count));
            }
        }
        match best {
            Some((category, _)) => Some(category),
            None if self.get(ColorCategory::Light) > 0 => Some(ColorCategory::Light),
            None => None,
        }
    }
}

/// Dominant palette mood over the first few images.
///
/// Each sampled image is reduced to a small thumbnail before its pixels are
/// tallied. Unreadable images are skipped.
pub fn classify_images(paths: &[PathBuf]) -> Option<ColorCategory> {
    let mut counts = CategoryCounts::default();
    for path in paths.iter().take(CLASSIFIER_SAMPLE_IMAGES) {
        match image::open(path) {
            Ok(img) => {
                let thumb = img
                    .resize_exact(
                        CLASSIFIER_SAMPLE_SIZE,
                        CLASSIFIER_SAMPLE_SIZE,
                        FilterType::Triangle,
                    )
                    .to_rgba8();
                counts.tally_image(&thumb);
            }
            Err(e) => log::warn!("Could not sample colors of {}: {}", path.display(), e),
        }
    }
    let dominant = counts.dominant();
    log::debug!("Color classification: {:?}", dominant);
    dominant
}
