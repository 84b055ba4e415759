//! Shared constants for page composition
//!
//! This module centralizes magic numbers and constants used throughout
//! composition, layout and export.

// =============================================================================
// Page Dimensions
// =============================================================================

/// Resolution at which page pixel sizes are expressed
pub const REFERENCE_DPI: f32 = 300.0;

/// Default page width in pixels (A4 portrait at 300 DPI)
pub const DEFAULT_PAGE_WIDTH_PX: u32 = 2480;

/// Default page height in pixels (A4 portrait at 300 DPI)
pub const DEFAULT_PAGE_HEIGHT_PX: u32 = 3508;

/// Largest accepted custom page side in pixels
pub const MAX_PAGE_SIDE_PX: u32 = 20_000;

/// Photo zoom range; 1.0 fills the slot
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 3.0;

/// Canvas height that text sizes and frame offsets are authored against.
/// Rendering at height `h` scales them by `h / REFERENCE_EDITOR_HEIGHT`.
pub const REFERENCE_EDITOR_HEIGHT: f32 = 800.0;

/// Resolution written into exported PDF pages
pub const PDF_DPI: f32 = 300.0;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Convert a pixel length at `dpi` to millimeters
#[inline]
pub fn px_to_mm(px: u32, dpi: f32) -> f32 {
    px as f32 * MM_PER_INCH / dpi
}

// =============================================================================
// Colors
// =============================================================================

/// Page fill used when no (valid) background is set
pub const DEFAULT_BACKGROUND: &str = "#F5F5F5";

/// Fill of an empty photo slot in previews
pub const EMPTY_SLOT_COLOR: [u8; 4] = [204, 204, 204, 255];

/// Fill of the error placeholder drawn for unrenderable photos
pub const ERROR_PLACEHOLDER_FILL: [u8; 4] = [255, 228, 228, 255];

/// Border and label color of the error placeholder
pub const ERROR_PLACEHOLDER_INK: [u8; 4] = [211, 47, 47, 255];

/// Border width of the error placeholder (pixels)
pub const ERROR_PLACEHOLDER_BORDER: u32 = 5;

/// Label drawn on the error placeholder
pub const ERROR_PLACEHOLDER_LABEL: &str = "Image error";

// =============================================================================
// Frames
// =============================================================================

/// Default frame band width as a fraction of the shorter side
pub const DEFAULT_FRAME_THICKNESS: f32 = 0.05;

/// Frame overlay scale range relative to the slot
pub const MIN_FRAME_SCALE: f32 = 0.5;
pub const MAX_FRAME_SCALE: f32 = 1.5;

/// Preset id prefix used in project files
pub const PRESET_FRAME_PREFIX: &str = "preset_";

// =============================================================================
// Slots and Templates
// =============================================================================

/// Geometry of a slot added by hand: (relx, rely, relwidth, relheight)
pub const NEW_SLOT_GEOMETRY: (f32, f32, f32, f32) = (0.35, 0.3, 0.3, 0.4);

/// Outer padding of the generic grid template
pub const GRID_PADDING: f32 = 0.05;

/// Spacing between cells of the generic grid template
pub const GRID_SPACING: f32 = 0.03;

// =============================================================================
// Text
// =============================================================================

pub const DEFAULT_FONT_FAMILY: &str = "Arial";

pub const DEFAULT_FONT_SIZE: f32 = 24.0;

pub const DEFAULT_FONT_COLOR: &str = "#000000";

pub const NEW_TEXT: &str = "New text";

/// Font size of the folder title placed by the grouping wizard
pub const GROUP_TITLE_FONT_SIZE: f32 = 32.0;

/// Vertical center of the folder title
pub const GROUP_TITLE_RELY: f32 = 0.025;

/// Fonts tried after the configured font directories and default font
pub const SYSTEM_FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// =============================================================================
// Classification
// =============================================================================

/// Aspect ratio above which an image is landscape
pub const LANDSCAPE_RATIO: f32 = 1.1;

/// Aspect ratio below which an image is portrait
pub const PORTRAIT_RATIO: f32 = 0.9;

/// Images sampled by the color classifier
pub const CLASSIFIER_SAMPLE_IMAGES: usize = 5;

/// Side of the thumbnail each sampled image is reduced to
pub const CLASSIFIER_SAMPLE_SIZE: u32 = 50;

/// Backgrounds sampled when profiling an asset theme
pub const THEME_PROFILE_SAMPLES: usize = 3;

// =============================================================================
// Wizards
// =============================================================================

pub const BASIC_WIZARD_IMAGES_PER_PAGE: usize = 4;

pub const BASIC_WIZARD_BACKGROUNDS: &[&str] = &["#F0F0F0", "#D3E3F1", "#D1F0D1", "#F5E6D3"];

/// File extensions picked up by the wizards
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

// =============================================================================
// Project File
// =============================================================================

/// Format version written by this crate; files without a version are 1
pub const PROJECT_FORMAT_VERSION: u32 = 2;
