use crate::constants::*;
use crate::{PhotobookError, Result};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a photo is framed inside its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Cover the slot, cropping the excess
    #[default]
    Fill,
    /// Resize the slot to the image aspect ratio
    Fit,
}

/// Aspect-ratio class of a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

/// Palette mood buckets of the color classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Warm,
    Autumn,
    Cool,
    Forest,
    Light,
}

impl ColorCategory {
    /// All categories in classification order
    pub const ALL: [ColorCategory; 5] = [
        ColorCategory::Warm,
        ColorCategory::Autumn,
        ColorCategory::Cool,
        ColorCategory::Forest,
        ColorCategory::Light,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorCategory::Warm => "warm",
            ColorCategory::Autumn => "autumn",
            ColorCategory::Cool => "cool",
            ColorCategory::Forest => "forest",
            ColorCategory::Light => "light",
        }
    }
}

/// Built-in decorative borders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePreset {
    Black,
    White,
    Gold,
}

impl FramePreset {
    pub const ALL: [FramePreset; 3] = [FramePreset::Black, FramePreset::White, FramePreset::Gold];

    /// Identifier stored in project files
    pub fn id(self) -> &'static str {
        match self {
            FramePreset::Black => "preset_black",
            FramePreset::White => "preset_white",
            FramePreset::Gold => "preset_gold",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Border color including its fixed alpha
    pub fn color(self) -> Rgba<u8> {
        match self {
            FramePreset::Black => Rgba([0, 0, 0, 200]),
            FramePreset::White => Rgba([255, 255, 255, 200]),
            FramePreset::Gold => Rgba([212, 175, 55, 220]),
        }
    }
}

/// Decorative frame: a named preset or a custom image asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    Preset(FramePreset),
    Custom(PathBuf),
}

impl FrameSource {
    pub fn is_preset(&self) -> bool {
        matches!(self, FrameSource::Preset(_))
    }

    /// Parse the project-file representation (`preset_*` or a path).
    /// Unknown `preset_*` ids are kept as custom paths, which later fail
    /// to load and are skipped.
    pub fn parse(value: &str) -> Self {
        match FramePreset::from_id(value) {
            Some(preset) => FrameSource::Preset(preset),
            None => FrameSource::Custom(PathBuf::from(value)),
        }
    }

    pub fn to_file_string(&self) -> String {
        match self {
            FrameSource::Preset(preset) => preset.id().to_string(),
            FrameSource::Custom(path) => path.to_string_lossy().into_owned(),
        }
    }
}

/// Page background
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// Solid fill as a hex string (`#RRGGBB`)
    Color(String),
    /// Image stretched over the page
    Image { path: PathBuf },
}

/// Bold/italic flags of a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
}

impl FontStyle {
    pub const NORMAL: FontStyle = FontStyle {
        bold: false,
        italic: false,
    };

    pub const BOLD: FontStyle = FontStyle {
        bold: true,
        italic: false,
    };

    /// Parse a style string; any string containing `bold`/`italic` sets the flag
    pub fn parse(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        Self {
            bold: lower.contains("bold"),
            italic: lower.contains("italic"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match (self.bold, self.italic) {
            (false, false) => "normal",
            (true, false) => "bold",
            (false, true) => "italic",
            (true, true) => "bold italic",
        }
    }
}

/// Page pixel dimensions at the reference DPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH_PX,
            height: DEFAULT_PAGE_HEIGHT_PX,
        }
    }
}

impl PageSize {
    /// Validate a user-entered custom size
    pub fn custom(width: u32, height: u32) -> Result<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |side: u32| (1..=MAX_PAGE_SIDE_PX).contains(&side);
        if !valid(self.width) || !valid(self.height) {
            return Err(PhotobookError::InvalidInput(format!(
                "Page size {}x{} is outside 1..={} pixels",
                self.width, self.height, MAX_PAGE_SIDE_PX
            )));
        }
        Ok(())
    }

    /// Physical size in millimeters at the reference DPI
    pub fn dimensions_mm(self) -> (f32, f32) {
        (
            px_to_mm(self.width, REFERENCE_DPI),
            px_to_mm(self.height, REFERENCE_DPI),
        )
    }

    /// Scale to fit within `max_side` on the longer edge
    pub fn scaled_to(self, max_side: u32) -> (u32, u32) {
        let longest = self.width.max(self.height) as f32;
        let factor = max_side as f32 / longest;
        (
            ((self.width as f32 * factor).round() as u32).max(1),
            ((self.height as f32 * factor).round() as u32).max(1),
        )
    }
}

/// Standard page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSizePreset {
    A4Portrait,
    A4Landscape,
    A5Portrait,
    LetterPortrait,
    /// 20 x 20 cm square book
    Square20,
}

impl PageSizePreset {
    pub fn size(self) -> PageSize {
        let (width, height) = match self {
            PageSizePreset::A4Portrait => (2480, 3508),
            PageSizePreset::A4Landscape => (3508, 2480),
            PageSizePreset::A5Portrait => (1748, 2480),
            PageSizePreset::LetterPortrait => (2550, 3300),
            PageSizePreset::Square20 => (2362, 2362),
        };
        PageSize { width, height }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSizePreset::A4Portrait => "A4 portrait",
            PageSizePreset::A4Landscape => "A4 landscape",
            PageSizePreset::A5Portrait => "A5 portrait",
            PageSizePreset::LetterPortrait => "Letter portrait",
            PageSizePreset::Square20 => "20x20 cm",
        }
    }
}

/// Raster or document export target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }
}

/// Integer pixel rectangle; origin may be negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && py >= self.y as f32
            && px < (self.x + self.width as i64) as f32
            && py < (self.y + self.height as i64) as f32
    }
}

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>> {
    let invalid = || PhotobookError::InvalidInput(format!("Invalid hex color: {value:?}"));
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = channel(&c.to_string())?;
                rgb[i] = v * 17;
            }
            Ok(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        }
        6 | 8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let a = if hex.len() == 8 {
                channel(&hex[6..8])?
            } else {
                255
            };
            Ok(Rgba([r, g, b, a]))
        }
        _ => Err(invalid()),
    }
}

mod serde_impls {
    use super::*;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use std::fmt;

    impl Serialize for FrameSource {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(&self.to_file_string())
        }
    }

    impl<'de> Deserialize<'de> for FrameSource {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Ok(FrameSource::parse(&s))
        }
    }

    impl Serialize for FontStyle {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> Deserialize<'de> for FontStyle {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Ok(FontStyle::parse(&s))
        }
    }

    impl Serialize for Background {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match self {
                Background::Color(hex) => serializer.serialize_str(hex),
                Background::Image { path } => {
                    let mut map = serializer.serialize_map(Some(2))?;
                    map.serialize_entry("type", "image")?;
                    map.serialize_entry("path", path)?;
                    map.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for Background {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct BackgroundVisitor;

            impl<'de> Visitor<'de> for BackgroundVisitor {
                type Value = Background;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a hex color string or an image background")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<Background, E>
                where
                    E: de::Error,
                {
                    Ok(Background::Color(value.to_string()))
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<Background, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut kind: Option<String> = None;
                    let mut path: Option<PathBuf> = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "type" => kind = Some(map.next_value()?),
                            "path" => path = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (kind.as_deref(), path) {
                        (Some("image"), Some(path)) => Ok(Background::Image { path }),
                        (Some("image"), None) => Err(de::Error::missing_field("path")),
                        (Some(other), _) => Err(de::Error::unknown_variant(other, &["image"])),
                        (None, _) => Err(de::Error::missing_field("type")),
                    }
                }
            }

            deserializer.deserialize_any(BackgroundVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF8000").unwrap(), Rgba([255, 128, 0, 255]));
        assert_eq!(parse_hex_color("#fff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(
            parse_hex_color("#11223344").unwrap(),
            Rgba([0x11, 0x22, 0x33, 0x44])
        );
        assert!(parse_hex_color("FF8000").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(parse_hex_color("#12345").is_err());
    }

    #[test]
    fn test_frame_source_parse() {
        assert_eq!(
            FrameSource::parse("preset_gold"),
            FrameSource::Preset(FramePreset::Gold)
        );
        assert_eq!(
            FrameSource::parse("frames/leaf.png"),
            FrameSource::Custom(PathBuf::from("frames/leaf.png"))
        );
    }

    #[test]
    fn test_font_style_strings() {
        assert_eq!(FontStyle::parse("bold italic"), FontStyle { bold: true, italic: true });
        assert_eq!(FontStyle::parse("normal"), FontStyle::NORMAL);
        assert_eq!(FontStyle::BOLD.as_str(), "bold");
    }

    #[test]
    fn test_background_json() {
        let color: Background = serde_json::from_str("\"#D3E3F1\"").unwrap();
        assert_eq!(color, Background::Color("#D3E3F1".to_string()));

        let image: Background =
            serde_json::from_str(r#"{"type": "image", "path": "bg/paper.jpg"}"#).unwrap();
        assert_eq!(
            image,
            Background::Image {
                path: PathBuf::from("bg/paper.jpg")
            }
        );

        let json = serde_json::to_string(&image).unwrap();
        assert!(json.contains("\"type\":\"image\""));
    }

    #[test]
    fn test_custom_page_size_validation() {
        assert!(PageSize::custom(1000, 1000).is_ok());
        assert!(matches!(
            PageSize::custom(0, 1000),
            Err(PhotobookError::InvalidInput(_))
        ));
        assert!(PageSize::custom(1000, MAX_PAGE_SIDE_PX + 1).is_err());
    }

    #[test]
    fn test_page_size_scaled_to() {
        let size = PageSizePreset::A4Portrait.size();
        let (w, h) = size.scaled_to(350);
        assert_eq!(h, 350);
        assert_eq!(w, 247);
    }
}
