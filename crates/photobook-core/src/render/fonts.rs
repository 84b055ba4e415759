use crate::constants::SYSTEM_FALLBACK_FONTS;
use crate::types::FontStyle;
use ab_glyph::FontArc;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

type FontCache = HashMap<(String, FontStyle), Option<FontArc>>;

/// Resolves font families to loaded fonts.
///
/// Lookup order for a family and style:
/// 1. `<family><suffix>.ttf` in each font directory, where the family is
///    lowercased without spaces and the suffix is `bd`, `i` or `bi`
/// 2. `<Family>.ttf` in each font directory
/// 3. the configured default font
/// 4. common system fonts
///
/// Results, including misses, are cached per family and style.
#[derive(Clone, Default)]
pub struct FontLibrary {
    dirs: Vec<PathBuf>,
    default_font: Option<PathBuf>,
    cache: Arc<Mutex<FontCache>>,
}

impl fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontLibrary")
            .field("dirs", &self.dirs)
            .field("default_font", &self.default_font)
            .finish_non_exhaustive()
    }
}

/// File name used for a family and style, e.g. `timesnewromanbd.ttf`
pub fn font_file_name(family: &str, style: FontStyle) -> String {
    let base: String = family
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ')
        .collect();
    let suffix = match (style.bold, style.italic) {
        (true, true) => "bi",
        (true, false) => "bd",
        (false, true) => "i",
        (false, false) => "",
    };
    format!("{base}{suffix}.ttf")
}

fn load_font(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    match FontArc::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("Invalid font file {}: {}", path.display(), e);
            None
        }
    }
}

impl FontLibrary {
    pub fn new(dirs: Vec<PathBuf>, default_font: Option<PathBuf>) -> Self {
        Self {
            dirs,
            default_font,
            cache: Arc::default(),
        }
    }

    fn candidates(&self, family: &str, style: FontStyle) -> Vec<PathBuf> {
        let styled = font_file_name(family, style);
        let plain = format!("{family}.ttf");
        let mut paths = Vec::new();
        for dir in &self.dirs {
            paths.push(dir.join(&styled));
            paths.push(dir.join(&plain));
        }
        paths
    }

    fn cached(&self, key: &(String, FontStyle), load: impl FnOnce() -> Option<FontArc>) -> Option<FontArc> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(key) {
                return hit.clone();
            }
        }
        let font = load();
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key.clone(), font.clone());
        }
        font
    }

    /// Default font, then the first loadable system font
    pub fn fallback(&self) -> Option<FontArc> {
        // The empty family never names a real font file
        self.cached(&(String::new(), FontStyle::NORMAL), || {
            self.default_font
                .iter()
                .cloned()
                .chain(SYSTEM_FALLBACK_FONTS.iter().map(PathBuf::from))
                .find_map(|path| load_font(&path))
        })
    }

    /// Font for `family` in `style`, falling back as described above
    pub fn resolve(&self, family: &str, style: FontStyle) -> Option<FontArc> {
        self.cached(&(family.to_string(), style), || {
            self.candidates(family, style)
                .iter()
                .find_map(|path| load_font(path))
                .or_else(|| {
                    log::warn!(
                        "Font '{}' ({}) not found, using fallback",
                        family,
                        style.as_str()
                    );
                    self.fallback()
                })
        })
    }
}
