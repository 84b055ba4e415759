use crate::constants::*;
use crate::types::{FitMode, FrameSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fractional box inside the page drawable area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub relx: f32,
    pub rely: f32,
    pub relwidth: f32,
    pub relheight: f32,
}

impl SlotGeometry {
    pub const fn new(relx: f32, rely: f32, relwidth: f32, relheight: f32) -> Self {
        Self {
            relx,
            rely,
            relwidth,
            relheight,
        }
    }
}

/// Visual settings of a placed photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoProperties {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub grayscale: bool,
    pub fit_mode: FitMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_path: Option<FrameSource>,
    pub frame_scale: f32,
    pub frame_offset_x: i32,
    pub frame_offset_y: i32,
    pub frame_thickness: f32,
}

impl Default for PhotoProperties {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.5,
            pan_y: 0.5,
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            grayscale: false,
            fit_mode: FitMode::Fill,
            frame_path: None,
            frame_scale: 1.0,
            frame_offset_x: 0,
            frame_offset_y: 0,
            frame_thickness: DEFAULT_FRAME_THICKNESS,
        }
    }
}

impl PhotoProperties {
    /// Default properties carrying only a decorative frame
    pub fn with_frame(frame: FrameSource) -> Self {
        Self {
            frame_path: Some(frame),
            ..Self::default()
        }
    }

    /// Copy with values pulled back into their valid ranges
    pub fn clamped(&self) -> Self {
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        Self {
            zoom: finite_or(self.zoom, 1.0).clamp(MIN_ZOOM, MAX_ZOOM),
            pan_x: finite_or(self.pan_x, 0.5).clamp(0.0, 1.0),
            pan_y: finite_or(self.pan_y, 0.5).clamp(0.0, 1.0),
            brightness: finite_or(self.brightness, 1.0).max(0.0),
            contrast: finite_or(self.contrast, 1.0).max(0.0),
            saturation: finite_or(self.saturation, 1.0).max(0.0),
            frame_scale: finite_or(self.frame_scale, 1.0)
                .clamp(MIN_FRAME_SCALE, MAX_FRAME_SCALE),
            frame_thickness: finite_or(self.frame_thickness, DEFAULT_FRAME_THICKNESS)
                .clamp(0.0, 0.5),
            ..self.clone()
        }
    }
}

/// A rectangular region of a page reserved for one photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SlotRecord")]
pub struct PhotoSlot {
    pub path: Option<PathBuf>,
    pub relx: f32,
    pub rely: f32,
    pub relwidth: f32,
    pub relheight: f32,
    /// Master size assigned by the layout template
    pub layout_relwidth: f32,
    pub layout_relheight: f32,
    /// Stored separately in the project file, keyed by `(page, slot)`
    #[serde(skip)]
    pub properties: Option<PhotoProperties>,
}

impl PhotoSlot {
    /// Empty slot whose master size equals its current size
    pub fn from_geometry(geometry: SlotGeometry) -> Self {
        Self {
            path: None,
            relx: geometry.relx,
            rely: geometry.rely,
            relwidth: geometry.relwidth,
            relheight: geometry.relheight,
            layout_relwidth: geometry.relwidth,
            layout_relheight: geometry.relheight,
            properties: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_properties(mut self, properties: PhotoProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none()
    }

    pub fn geometry(&self) -> SlotGeometry {
        SlotGeometry::new(self.relx, self.rely, self.relwidth, self.relheight)
    }

    /// Stored properties or the documented defaults
    pub fn effective_properties(&self) -> PhotoProperties {
        self.properties.clone().unwrap_or_default()
    }

    /// Mutable properties, creating the default entry on first access
    pub fn properties_mut(&mut self) -> &mut PhotoProperties {
        self.properties.get_or_insert_with(PhotoProperties::default)
    }
}

impl Default for PhotoSlot {
    fn default() -> Self {
        let (relx, rely, relwidth, relheight) = NEW_SLOT_GEOMETRY;
        Self::from_geometry(SlotGeometry::new(relx, rely, relwidth, relheight))
    }
}

/// On-disk shape of a slot; older files lack the master size
#[derive(Deserialize)]
struct SlotRecord {
    #[serde(default)]
    path: Option<PathBuf>,
    relx: f32,
    rely: f32,
    relwidth: f32,
    relheight: f32,
    #[serde(default)]
    layout_relwidth: Option<f32>,
    #[serde(default)]
    layout_relheight: Option<f32>,
}

impl From<SlotRecord> for PhotoSlot {
    fn from(record: SlotRecord) -> Self {
        Self {
            path: record.path,
            relx: record.relx,
            rely: record.rely,
            relwidth: record.relwidth,
            relheight: record.relheight,
            layout_relwidth: record.layout_relwidth.unwrap_or(record.relwidth),
            layout_relheight: record.layout_relheight.unwrap_or(record.relheight),
            properties: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FramePreset;

    #[test]
    fn test_missing_properties_fall_back_to_defaults() {
        let props: PhotoProperties = serde_json::from_str(r#"{"zoom": 1.5}"#).unwrap();
        assert_eq!(props.zoom, 1.5);
        assert_eq!(props.pan_x, 0.5);
        assert_eq!(props.fit_mode, FitMode::Fill);
        assert!(props.frame_path.is_none());
    }

    #[test]
    fn test_clamped_properties() {
        let props = PhotoProperties {
            zoom: 0.2,
            pan_x: 1.7,
            pan_y: f32::NAN,
            ..PhotoProperties::default()
        };
        let clamped = props.clamped();
        assert_eq!(clamped.zoom, 1.0);
        assert_eq!(clamped.pan_x, 1.0);
        assert_eq!(clamped.pan_y, 0.5);

        let huge = PhotoProperties {
            zoom: 100_000.0,
            frame_scale: 100_000.0,
            ..PhotoProperties::default()
        }
        .clamped();
        assert_eq!(huge.zoom, MAX_ZOOM);
        assert_eq!(huge.frame_scale, MAX_FRAME_SCALE);
        let tiny = PhotoProperties {
            frame_scale: 0.0,
            ..PhotoProperties::default()
        };
        assert_eq!(tiny.clamped().frame_scale, MIN_FRAME_SCALE);
    }

    #[test]
    fn test_slot_without_master_size() {
        let slot: PhotoSlot = serde_json::from_str(
            r#"{"path": null, "relx": 0.1, "rely": 0.2, "relwidth": 0.3, "relheight": 0.4}"#,
        )
        .unwrap();
        assert_eq!(slot.layout_relwidth, 0.3);
        assert_eq!(slot.layout_relheight, 0.4);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_properties_mut_creates_entry() {
        let mut slot = PhotoSlot::default();
        assert!(slot.properties.is_none());
        slot.properties_mut().frame_path = Some(FrameSource::Preset(FramePreset::Gold));
        assert_eq!(
            slot.effective_properties().frame_path,
            Some(FrameSource::Preset(FramePreset::Gold))
        );
    }
}
