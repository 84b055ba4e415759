use super::WizardReport;
use super::scan::list_images;
use crate::constants::*;
use crate::model::{Page, PhotoProperties, Project};
use crate::templates::template;
use crate::types::{Background, FramePreset, FrameSource, PageSize};
use crate::Result;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::path::{Path, PathBuf};

const BASIC_FRAMES: [FramePreset; 2] = [FramePreset::Black, FramePreset::White];

/// Lay `images` out four to a page in the given order.
///
/// Each photo gets a random black or white preset frame and each page a
/// random background color.
pub fn basic_layout<R: Rng + ?Sized>(images: &[PathBuf], size: PageSize, rng: &mut R) -> Project {
    let pages = images
        .chunks(BASIC_WIZARD_IMAGES_PER_PAGE)
        .map(|chunk| {
            let mut page = Page::from_template(&template(chunk.len()), size);
            for (slot, path) in page.photos.iter_mut().zip(chunk) {
                slot.path = Some(path.clone());
                if let Some(preset) = BASIC_FRAMES.choose(rng) {
                    slot.properties = Some(PhotoProperties::with_frame(FrameSource::Preset(*preset)));
                }
            }
            page.background = BASIC_WIZARD_BACKGROUNDS
                .choose(rng)
                .map(|hex| Background::Color(hex.to_string()));
            page
        })
        .collect();
    Project::from_pages(pages)
}

/// Basic wizard over the images directly inside `dir`
pub fn run_basic_wizard<R: Rng + ?Sized>(
    dir: &Path,
    size: PageSize,
    rng: &mut R,
) -> Result<(Project, WizardReport)> {
    let images = list_images(dir)?;
    let project = basic_layout(&images, size, rng);
    let report = WizardReport {
        images: images.len(),
        pages: project.page_count(),
        style: "Basic".to_string(),
        skipped: Vec::new(),
    };
    log::info!("{}", report.summary());
    Ok((project, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("img{i}.jpg"))).collect()
    }

    #[test]
    fn test_chunks_of_four_in_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let project = basic_layout(&paths(9), PageSize::default(), &mut rng);
        let counts: Vec<_> = project.pages.iter().map(|p| p.photos.len()).collect();
        assert_eq!(counts, vec![4, 4, 1]);
        assert_eq!(project.pages[1].photos[0].path(), Some(Path::new("img4.jpg")));
        assert_eq!(project.pages[2].photos[0].relwidth, 0.9);
        assert_eq!(project.current_page, 0);
    }

    #[test]
    fn test_decoration_choices() {
        let mut rng = StdRng::seed_from_u64(11);
        let project = basic_layout(&paths(8), PageSize::default(), &mut rng);
        for page in &project.pages {
            match &page.background {
                Some(Background::Color(hex)) => {
                    assert!(BASIC_WIZARD_BACKGROUNDS.contains(&hex.as_str()))
                }
                other => panic!("unexpected background {:?}", other),
            }
            for slot in &page.photos {
                let frame = slot.properties.as_ref().unwrap().frame_path.clone();
                assert!(matches!(
                    frame,
                    Some(FrameSource::Preset(FramePreset::Black | FramePreset::White))
                ));
            }
        }
    }
}
