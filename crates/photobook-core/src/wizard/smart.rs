use super::scan::{ImageGroup, list_image_groups, list_images};
use super::theme::{PageDecoration, Theme, ThemeMode, resolve_theme};
use super::WizardReport;
use crate::classify::{AnalyzedImage, analyze_images};
use crate::constants::*;
use crate::model::{Page, PhotoProperties, Project, SlotGeometry, TextBox};
use crate::templates::{candidates, template};
use crate::types::{FontStyle, Orientation, PageSize};
use crate::{PhotobookError, Result};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::path::{Path, PathBuf};

/// Settings of a smart wizard run
#[derive(Debug, Clone, PartialEq)]
pub struct SmartWizardOptions {
    pub theme: ThemeMode,
    /// One run per subfolder, each group opening with a title
    pub group_by_folder: bool,
    /// Shuffle images before matching templates
    pub shuffle: bool,
    pub page_size: PageSize,
}

impl Default for SmartWizardOptions {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Color,
            group_by_folder: false,
            shuffle: false,
            page_size: PageSize::default(),
        }
    }
}

/// Images and layout chosen for one page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Smart template name, `None` for the grid fallback
    pub template: Option<&'static str>,
    pub geometry: Vec<SlotGeometry>,
    pub images: Vec<PathBuf>,
}

/// Consume `images` front to back into page plans.
///
/// At each step every template whose orientation sequence matches the
/// next images is a candidate, and one is drawn with probability
/// proportional to its priority. With no candidate, all remaining images
/// go onto one grid page.
pub fn plan_pages<R: Rng + ?Sized>(images: &[AnalyzedImage], rng: &mut R) -> Vec<PagePlan> {
    let orientations: Vec<Orientation> = images.iter().map(|i| i.orientation).collect();
    let mut plans = Vec::new();
    let mut start = 0;

    while start < images.len() {
        let found = candidates(&orientations[start..]);
        match found.choose_weighted(rng, |t| t.priority) {
            Ok(chosen) => {
                let end = start + chosen.slot_count();
                log::debug!("Images {}..{} use template {}", start, end, chosen.name);
                plans.push(PagePlan {
                    template: Some(chosen.name),
                    geometry: chosen.geometry.to_vec(),
                    images: images[start..end].iter().map(|i| i.path.clone()).collect(),
                });
                start = end;
            }
            Err(_) => {
                let rest = &images[start..];
                log::debug!("No template matches; {} image(s) go on a grid page", rest.len());
                plans.push(PagePlan {
                    template: None,
                    geometry: template(rest.len()),
                    images: rest.iter().map(|i| i.path.clone()).collect(),
                });
                break;
            }
        }
    }

    plans
}

fn group_title(name: &str) -> TextBox {
    TextBox {
        font_size: GROUP_TITLE_FONT_SIZE,
        font_style: FontStyle::BOLD,
        ..TextBox::new(name, 0.5, GROUP_TITLE_RELY)
    }
}

fn build_page(plan: &PagePlan, decoration: PageDecoration, size: PageSize) -> Page {
    let mut page = Page::from_template(&plan.geometry, size);
    for (slot, path) in page.photos.iter_mut().zip(&plan.images) {
        slot.path = Some(path.clone());
        if let Some(frame) = &decoration.frame {
            slot.properties = Some(PhotoProperties::with_frame(frame.clone()));
        }
    }
    page.background = decoration.background;
    page
}

/// Smart wizard over `dir`.
///
/// Unreadable images are skipped and listed in the report. Errors only when
/// no image could be analyzed or an image theme has no theme folders.
pub fn run_smart_wizard<R: Rng + ?Sized>(
    dir: &Path,
    options: &SmartWizardOptions,
    rng: &mut R,
) -> Result<(Project, WizardReport)> {
    let groups = if options.group_by_folder {
        let mut groups = list_image_groups(dir)?;
        groups.shuffle(rng);
        groups
    } else {
        vec![ImageGroup {
            name: String::new(),
            images: list_images(dir)?,
        }]
    };

    let mut analyzed_groups = Vec::with_capacity(groups.len());
    let mut skipped = Vec::new();
    for group in groups {
        let (mut analyzed, failed) = analyze_images(&group.images);
        skipped.extend(failed);
        if options.shuffle {
            analyzed.shuffle(rng);
        }
        if !analyzed.is_empty() {
            analyzed_groups.push((group.name, analyzed));
        }
    }

    let all_paths: Vec<PathBuf> = analyzed_groups
        .iter()
        .flat_map(|(_, images)| images.iter().map(|i| i.path.clone()))
        .collect();
    if all_paths.is_empty() {
        return Err(PhotobookError::NoImages(dir.to_path_buf()));
    }

    let theme: Theme = resolve_theme(&options.theme, &all_paths, rng)?;

    let mut pages = Vec::new();
    for (name, images) in &analyzed_groups {
        for (index, plan) in plan_pages(images, rng).iter().enumerate() {
            let mut page = build_page(plan, theme.decorate(rng), options.page_size);
            if options.group_by_folder && index == 0 {
                page.texts.push(group_title(name));
            }
            pages.push(page);
        }
    }

    let project = Project::from_pages(pages);
    let report = WizardReport {
        images: all_paths.len(),
        pages: project.page_count(),
        style: theme.name(),
        skipped,
    };
    log::info!("{}", report.summary());
    Ok((project, report))
}
