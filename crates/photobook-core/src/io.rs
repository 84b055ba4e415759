//! Project file I/O
//!
//! The file keeps the flat layout of earlier versions: pages hold slots and
//! texts, while photo properties and paint orders live in top-level maps
//! keyed by `"(page, slot)"` and page index.

use crate::constants::PROJECT_FORMAT_VERSION;
use crate::model::{Page, PhotoKey, PhotoProperties, Project};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

fn legacy_version() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
struct ProjectFile {
    #[serde(default = "legacy_version")]
    version: u32,
    #[serde(default)]
    pages: Vec<Page>,
    #[serde(default)]
    photo_properties: BTreeMap<String, PhotoProperties>,
    #[serde(default)]
    z_order: BTreeMap<String, Vec<usize>>,
}

impl ProjectFile {
    fn from_project(project: &Project) -> Self {
        let mut photo_properties = BTreeMap::new();
        let mut z_order = BTreeMap::new();
        for (page_index, page) in project.pages.iter().enumerate() {
            for (slot_index, slot) in page.photos.iter().enumerate() {
                if let Some(properties) = &slot.properties {
                    let key = PhotoKey::new(page_index, slot_index);
                    photo_properties.insert(key.to_string(), properties.clone());
                }
            }
            z_order.insert(page_index.to_string(), page.paint_order());
        }
        Self {
            version: PROJECT_FORMAT_VERSION,
            pages: project.pages.clone(),
            photo_properties,
            z_order,
        }
    }

    fn into_project(self) -> Project {
        let mut pages = self.pages;

        for (raw_key, properties) in self.photo_properties {
            let key = match raw_key.parse::<PhotoKey>() {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("Dropping photo properties with bad key {:?}: {}", raw_key, e);
                    continue;
                }
            };
            match pages.get_mut(key.page).and_then(|p| p.slot_mut(key.slot)) {
                Some(slot) => slot.properties = Some(properties.clamped()),
                None => log::warn!("Dropping photo properties for missing slot {}", key),
            }
        }

        for (raw_index, order) in self.z_order {
            let Some(page) = raw_index.parse::<usize>().ok().and_then(|i| pages.get_mut(i)) else {
                log::warn!("Dropping paint order for missing page {:?}", raw_index);
                continue;
            };
            page.z_order = order;
        }

        if self.version > PROJECT_FORMAT_VERSION {
            log::warn!(
                "Project file version {} is newer than supported version {}",
                self.version,
                PROJECT_FORMAT_VERSION
            );
        }

        // Files are always upgraded to the current layout on save
        Project::from_pages(pages)
    }
}

/// Parse a project file
pub fn project_from_json(bytes: &[u8]) -> Result<Project> {
    let file: ProjectFile = serde_json::from_slice(bytes)?;
    log::debug!("Parsed project file version {}", file.version);
    Ok(file.into_project())
}

/// Serialize a project in the current file format
pub fn project_to_json(project: &Project) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&ProjectFile::from_project(project))?)
}

/// Load a project file
pub async fn load_project(path: impl AsRef<Path>) -> Result<Project> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let project = tokio::task::spawn_blocking(move || project_from_json(&bytes)).await??;
    log::info!(
        "Loaded {} page(s) from {}",
        project.page_count(),
        path.display()
    );
    Ok(project)
}

/// Save a project file
pub async fn save_project(project: &Project, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = project_to_json(project)?;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Saved project to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Background, FramePreset, FrameSource, PageSize};
    use std::path::PathBuf;

    #[test]
    fn test_legacy_file_defaults() {
        let json = br##"{
            "pages": [{
                "photos": [{"path": null, "relx": 0.1, "rely": 0.1, "relwidth": 0.4, "relheight": 0.3}],
                "texts": [],
                "background": "#FFFFFF"
            }]
        }"##;
        let project = project_from_json(json).unwrap();
        let page = &project.pages[0];
        assert_eq!(page.size, PageSize::default());
        assert_eq!(page.photos[0].layout_relwidth, 0.4);
        assert_eq!(page.photos[0].layout_relheight, 0.3);
        assert_eq!(page.z_order, vec![0]);
        assert_eq!(page.background, Some(Background::Color("#FFFFFF".to_string())));
    }

    #[test]
    fn test_invalid_keys_are_dropped() {
        let json = br#"{
            "version": 2,
            "pages": [{"photos": [{"relx": 0, "rely": 0, "relwidth": 1, "relheight": 1}]}],
            "photo_properties": {
                "(0, 0)": {"zoom": 2.0},
                "(0, 5)": {"zoom": 3.0},
                "(4, 0)": {"zoom": 3.0},
                "nonsense": {"zoom": 3.0}
            },
            "z_order": {"0": [0, 0], "9": [0]}
        }"#;
        let project = project_from_json(json).unwrap();
        let slot = &project.pages[0].photos[0];
        assert_eq!(slot.properties.as_ref().unwrap().zoom, 2.0);
        assert_eq!(project.pages[0].z_order, vec![0]);
    }

    #[test]
    fn test_written_file_shape() {
        let mut project = Project::new(2, PageSize::default());
        let key = PhotoKey::new(0, 1);
        project
            .set_photo_path(key, Some(PathBuf::from("a.jpg")))
            .unwrap();
        *project.properties_mut(key).unwrap() =
            PhotoProperties::with_frame(FrameSource::Preset(FramePreset::Gold));
        project.pages[0].z_order = vec![1, 0];

        let bytes = project_to_json(&project).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["version"], 2);
        assert_eq!(value["photo_properties"]["(0, 1)"]["frame_path"], "preset_gold");
        assert_eq!(value["z_order"]["0"], serde_json::json!([1, 0]));
        assert!(value["pages"][0]["photos"][0].get("properties").is_none());
    }
}
