//! Wizard themes: page background and photo frame pairings

use super::scan::{list_dirs, list_files};
use crate::classify::classify_images;
use crate::constants::THEME_PROFILE_SAMPLES;
use crate::types::{Background, ColorCategory, FramePreset, FrameSource};
use crate::{PhotobookError, Result};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::path::{Path, PathBuf};

/// How the smart wizard decorates pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeMode {
    /// Solid backgrounds from a palette matched to the photos
    Color,
    /// Asset theme folders, each with `backgrounds/` and `frames/`
    Image { themes_dir: PathBuf },
}

/// Palette theme derived from the photo colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTheme {
    pub name: &'static str,
    pub palette: &'static [&'static str],
    pub frame: FramePreset,
}

pub const AUTUMN_THEME: ColorTheme = ColorTheme {
    name: "Warm autumn",
    palette: &["#DABBAA", "#C4A484", "#A47A68", "#E6D3F5"],
    frame: FramePreset::Gold,
};

pub const WARM_THEME: ColorTheme = ColorTheme {
    name: "Sunny",
    palette: &["#F5E6D3", "#FFDDC1", "#FFD1D1", "#FFF9C4"],
    frame: FramePreset::Gold,
};

pub const COOL_THEME: ColorTheme = ColorTheme {
    name: "Cool waterside",
    palette: &["#D3E3F1", "#A9CCE3", "#D4E6F1", "#EAF2F8"],
    frame: FramePreset::White,
};

pub const FOREST_THEME: ColorTheme = ColorTheme {
    name: "Forest walk",
    palette: &["#D1F0D1", "#A9DFBF", "#ABEBC6", "#E8F5E9"],
    frame: FramePreset::White,
};

pub const LIGHT_THEME: ColorTheme = ColorTheme {
    name: "Clean modern",
    palette: &["#FFFFFF", "#F0F0F0", "#EAEAEA"],
    frame: FramePreset::Black,
};

impl ColorTheme {
    /// Theme for a dominant category; unclassified photos get the light theme
    pub fn for_category(category: Option<ColorCategory>) -> Self {
        match category {
            Some(ColorCategory::Autumn) => AUTUMN_THEME,
            Some(ColorCategory::Warm) => WARM_THEME,
            Some(ColorCategory::Cool) => COOL_THEME,
            Some(ColorCategory::Forest) => FOREST_THEME,
            Some(ColorCategory::Light) | None => LIGHT_THEME,
        }
    }
}

/// Asset theme folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTheme {
    pub name: String,
    pub dir: PathBuf,
    pub backgrounds: Vec<PathBuf>,
    pub frames: Vec<PathBuf>,
}

impl ImageTheme {
    pub fn open(dir: &Path) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            dir: dir.to_path_buf(),
            backgrounds: list_files(&dir.join("backgrounds"), &["png", "jpg"]),
            frames: list_files(&dir.join("frames"), &["png"]),
        }
    }

    /// Dominant category of the first few backgrounds
    pub fn profile(&self) -> Option<ColorCategory> {
        let samples: Vec<PathBuf> = self
            .backgrounds
            .iter()
            .take(THEME_PROFILE_SAMPLES)
            .cloned()
            .collect();
        classify_images(&samples)
    }

    /// Display name: folder name with the first letter capitalized
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Decoration applied to one generated page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDecoration {
    pub background: Option<Background>,
    /// Frame given to every photo on the page
    pub frame: Option<FrameSource>,
}

/// Resolved theme of a wizard run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    Color(ColorTheme),
    Image(ImageTheme),
}

impl Theme {
    pub fn name(&self) -> String {
        match self {
            Theme::Color(theme) => theme.name.to_string(),
            Theme::Image(theme) => theme.display_name(),
        }
    }

    /// Pick the decoration of the next page
    pub fn decorate<R: Rng + ?Sized>(&self, rng: &mut R) -> PageDecoration {
        match self {
            Theme::Color(theme) => PageDecoration {
                background: theme
                    .palette
                    .choose(rng)
                    .map(|hex| Background::Color(hex.to_string())),
                frame: Some(FrameSource::Preset(theme.frame)),
            },
            Theme::Image(theme) => PageDecoration {
                background: theme
                    .backgrounds
                    .choose(rng)
                    .map(|path| Background::Image { path: path.clone() }),
                frame: theme.frames.choose(rng).cloned().map(FrameSource::Custom),
            },
        }
    }
}

/// Pick the asset theme matching `category`.
///
/// Falls back to a random theme when the photos are unclassified or no
/// theme profile matches.
pub fn match_image_theme<R: Rng + ?Sized>(
    themes_dir: &Path,
    category: Option<ColorCategory>,
    rng: &mut R,
) -> Result<ImageTheme> {
    let themes: Vec<ImageTheme> = list_dirs(themes_dir)
        .iter()
        .map(|dir| ImageTheme::open(dir))
        .collect();
    if themes.is_empty() {
        return Err(PhotobookError::NoThemes(themes_dir.to_path_buf()));
    }

    let matching: Vec<&ImageTheme> = match category {
        Some(category) => themes
            .iter()
            .filter(|theme| {
                let profile = theme.profile();
                log::debug!("Theme '{}' profiles as {:?}", theme.name, profile);
                profile == Some(category)
            })
            .collect(),
        None => Vec::new(),
    };

    let chosen = match matching.choose(rng) {
        Some(theme) => (*theme).clone(),
        None => {
            log::info!("No theme matches {:?}; picking one at random", category);
            themes
                .choose(rng)
                .cloned()
                .ok_or_else(|| PhotobookError::NoThemes(themes_dir.to_path_buf()))?
        }
    };
    Ok(chosen)
}

/// Resolve `mode` against the photos that will be placed
pub fn resolve_theme<R: Rng + ?Sized>(mode: &ThemeMode, photos: &[PathBuf], rng: &mut R) -> Result<Theme> {
    let category = classify_images(photos);
    let theme = match mode {
        ThemeMode::Color => Theme::Color(ColorTheme::for_category(category)),
        ThemeMode::Image { themes_dir } => {
            Theme::Image(match_image_theme(themes_dir, category, rng)?)
        }
    };
    log::info!("Using theme '{}'", theme.name());
    Ok(theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn write_solid(path: &Path, color: [u8; 4]) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(8, 8, Rgba(color)).save(path).unwrap();
    }

    #[test]
    fn test_palette_table() {
        assert_eq!(ColorTheme::for_category(Some(ColorCategory::Autumn)).frame, FramePreset::Gold);
        assert_eq!(ColorTheme::for_category(Some(ColorCategory::Cool)).palette[1], "#A9CCE3");
        assert_eq!(ColorTheme::for_category(None), LIGHT_THEME);
        assert_eq!(LIGHT_THEME.palette.len(), 3);
    }

    #[test]
    fn test_color_theme_decoration() {
        let mut rng = StdRng::seed_from_u64(7);
        let theme = Theme::Color(FOREST_THEME);
        for _ in 0..10 {
            let decoration = theme.decorate(&mut rng);
            match decoration.background {
                Some(Background::Color(hex)) => assert!(FOREST_THEME.palette.contains(&hex.as_str())),
                other => panic!("unexpected background {:?}", other),
            }
            assert_eq!(decoration.frame, Some(FrameSource::Preset(FramePreset::White)));
        }
    }

    #[test]
    fn test_missing_themes_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            match_image_theme(dir.path(), Some(ColorCategory::Cool), &mut rng),
            Err(PhotobookError::NoThemes(_))
        ));
    }

    #[test]
    fn test_image_theme_matches_category() {
        let dir = TempDir::new().unwrap();
        write_solid(&dir.path().join("ocean/backgrounds/a.png"), [20, 40, 220, 255]);
        write_solid(&dir.path().join("ocean/frames/f.png"), [255, 255, 255, 255]);
        write_solid(&dir.path().join("meadow/backgrounds/a.png"), [20, 200, 20, 255]);

        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let theme = match_image_theme(dir.path(), Some(ColorCategory::Cool), &mut rng).unwrap();
            assert_eq!(theme.name, "ocean");
            assert_eq!(theme.display_name(), "Ocean");
            assert_eq!(theme.frames.len(), 1);
        }
    }
}
