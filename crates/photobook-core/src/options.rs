use crate::constants::*;
use crate::types::*;
use crate::{PhotobookError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Defaults for image and PDF export
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// JPEG quality, 1 to 100
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Pdf,
            jpeg_quality: 95,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotobookConfig {
    /// Root holding `backgrounds/`, `frames/` and `themes/`
    pub assets_dir: PathBuf,
    pub font_dirs: Vec<PathBuf>,
    pub default_font: Option<PathBuf>,
    pub default_page_size: PageSize,
    /// Canvas height at which text sizes are authored
    pub reference_editor_height: f32,
    pub export: ExportOptions,
}

impl Default for PhotobookConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            font_dirs: vec![PathBuf::from("assets/fonts")],
            default_font: None,
            default_page_size: PageSize::default(),
            reference_editor_height: REFERENCE_EDITOR_HEIGHT,
            export: ExportOptions::default(),
        }
    }
}

impl PhotobookConfig {
    /// Load configuration from JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| PhotobookError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PhotobookError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn backgrounds_dir(&self) -> PathBuf {
        self.assets_dir.join("backgrounds")
    }

    pub fn frames_dir(&self) -> PathBuf {
        self.assets_dir.join("frames")
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.assets_dir.join("themes")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.default_page_size
            .validate()
            .map_err(|e| PhotobookError::Config(e.to_string()))?;

        if !self.reference_editor_height.is_finite() || self.reference_editor_height <= 0.0 {
            return Err(PhotobookError::Config(
                "Reference editor height must be positive".to_string(),
            ));
        }

        if !(1..=100).contains(&self.export.jpeg_quality) {
            return Err(PhotobookError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.export.jpeg_quality
            )));
        }

        Ok(())
    }
}
