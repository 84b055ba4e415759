//! Typed editor commands and the property panels they carry

use crate::model::{PhotoKey, PhotoProperties, PhotoSlot, TextBox, ZDirection};
use crate::types::{Background, ExportFormat, FitMode, FontStyle, FrameSource, PageSize};
use crate::wizard::ThemeMode;
use std::path::PathBuf;

/// Slider values of the photo tools
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoPanel {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    pub relwidth: f32,
    pub relheight: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub grayscale: bool,
    pub fit_mode: FitMode,
    pub frame_scale: f32,
    pub frame_offset_x: i32,
    pub frame_offset_y: i32,
    pub frame_thickness: f32,
}

impl PhotoPanel {
    /// Panel for a slot; unset properties show their defaults
    pub fn from_slot(slot: &PhotoSlot) -> Self {
        let props = slot.effective_properties();
        Self {
            zoom: props.zoom,
            pan_x: props.pan_x,
            pan_y: props.pan_y,
            relwidth: slot.relwidth,
            relheight: slot.relheight,
            brightness: props.brightness,
            contrast: props.contrast,
            saturation: props.saturation,
            grayscale: props.grayscale,
            fit_mode: props.fit_mode,
            frame_scale: props.frame_scale,
            frame_offset_x: props.frame_offset_x,
            frame_offset_y: props.frame_offset_y,
            frame_thickness: props.frame_thickness,
        }
    }

    /// Copy panel values onto `props`, keeping its frame choice
    pub fn apply_to(&self, props: &mut PhotoProperties) {
        props.zoom = self.zoom;
        props.pan_x = self.pan_x;
        props.pan_y = self.pan_y;
        props.brightness = self.brightness;
        props.contrast = self.contrast;
        props.saturation = self.saturation;
        props.grayscale = self.grayscale;
        props.fit_mode = self.fit_mode;
        props.frame_scale = self.frame_scale;
        props.frame_offset_x = self.frame_offset_x;
        props.frame_offset_y = self.frame_offset_y;
        props.frame_thickness = self.frame_thickness;
        *props = props.clamped();
    }
}

/// Fields of the text tool window
#[derive(Debug, Clone, PartialEq)]
pub struct TextPanel {
    pub text: String,
    pub font_family: String,
    pub font_size: f32,
    pub font_style: FontStyle,
    pub font_color: String,
    pub show_bg_on_select: bool,
}

impl TextPanel {
    pub fn from_text(text: &TextBox) -> Self {
        Self {
            text: text.text.clone(),
            font_family: text.font_family.clone(),
            font_size: text.font_size,
            font_style: text.font_style,
            font_color: text.font_color.clone(),
            show_bg_on_select: text.show_bg_on_select,
        }
    }

    /// Copy panel values onto `text`, leaving its position alone
    pub fn apply_to(&self, text: &mut TextBox) {
        text.text = self.text.clone();
        text.font_family = self.font_family.clone();
        text.font_size = self.font_size.max(1.0);
        text.font_style = self.font_style;
        text.font_color = self.font_color.clone();
        text.show_bg_on_select = self.show_bg_on_select;
    }
}

/// Wizard to run from the editor
#[derive(Debug, Clone, PartialEq)]
pub enum WizardKind {
    Basic,
    Smart {
        theme: ThemeMode,
        group_by_folder: bool,
    },
}

/// Editor action; every index is explicit
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    // Pages
    NewProject { slots: usize, size: PageSize },
    SelectPage(usize),
    AddPage { slots: usize },
    DeletePage(usize),
    RegenerateLayout { page: usize, slots: usize },
    SetPageSize { page: usize, size: PageSize },

    // Photo slots
    AddPhotoSlot { page: usize },
    DeletePhotoSlot(PhotoKey),
    /// Ask for an image file and put it into the slot
    AddPhotoToSlot(PhotoKey),
    SetPhotoPath { key: PhotoKey, path: Option<PathBuf> },
    UpdatePhoto { key: PhotoKey, panel: PhotoPanel },
    ResizeSlot { key: PhotoKey, relwidth: f32, relheight: f32 },
    SetFitMode { key: PhotoKey, mode: FitMode },
    Reorder { key: PhotoKey, direction: ZDirection },
    SwapPhotos { page: usize, first: usize, second: usize },
    SetPhotoFrame { key: PhotoKey, frame: Option<FrameSource> },
    /// Ask for a PNG overlay and use it as the photo frame
    ChoosePhotoFrame(PhotoKey),

    // Page decoration
    SetBackground { page: usize, background: Option<Background> },
    /// Ask for a color and validate it
    ChooseBackgroundColor { page: usize },
    /// Ask for a background image
    ChooseBackgroundImage { page: usize },
    SetPageFrame { page: usize, frame: Option<FrameSource> },
    /// Ask for a PNG page frame
    ChoosePageFrame { page: usize },
    SetPageFrameThickness { page: usize, thickness: f32 },

    // Text
    AddText { page: usize },
    DeleteText { page: usize, index: usize },
    UpdateText { page: usize, index: usize, panel: TextPanel },
    ChooseTextColor { page: usize, index: usize },

    // Files
    Save,
    SaveAs,
    Open,
    Export { format: ExportFormat },

    // Wizards
    RunWizard(WizardKind),
}
