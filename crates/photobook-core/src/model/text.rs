use crate::constants::*;
use crate::types::FontStyle;
use serde::{Deserialize, Serialize};

/// Free text placed on a page, anchored at its center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub text: String,
    pub relx: f32,
    pub rely: f32,
    #[serde(default = "default_family")]
    pub font_family: String,
    /// Size at the reference editor height
    #[serde(default = "default_size")]
    pub font_size: f32,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default = "default_color")]
    pub font_color: String,
    #[serde(default)]
    pub show_bg_on_select: bool,
}

fn default_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_color() -> String {
    DEFAULT_FONT_COLOR.to_string()
}

impl Default for TextBox {
    fn default() -> Self {
        Self {
            text: NEW_TEXT.to_string(),
            relx: 0.5,
            rely: 0.5,
            font_family: default_family(),
            font_size: default_size(),
            font_style: FontStyle::NORMAL,
            font_color: default_color(),
            show_bg_on_select: false,
        }
    }
}

impl TextBox {
    pub fn new(text: impl Into<String>, relx: f32, rely: f32) -> Self {
        Self {
            text: text.into(),
            relx,
            rely,
            ..Self::default()
        }
    }

    /// Font size in pixels for a page rendered `target_height` pixels tall
    pub fn scaled_font_size(&self, target_height: u32, reference_height: f32) -> f32 {
        self.font_size * target_height as f32 / reference_height
    }
}
