//! Directory scanning for wizards and asset pickers

use crate::constants::IMAGE_EXTENSIONS;
use crate::{PhotobookError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Images of one folder, used by the grouping mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGroup {
    /// Folder name, used as the group title
    pub name: String,
    pub images: Vec<PathBuf>,
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Files directly inside `dir` with one of `extensions`, sorted by name
pub fn list_files(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), extensions))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Subdirectories directly inside `dir`, sorted by name
pub fn list_dirs(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();
    dirs.sort();
    dirs
}

/// Images directly inside `dir`; errors when there are none
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let images = list_files(dir, IMAGE_EXTENSIONS);
    if images.is_empty() {
        return Err(PhotobookError::NoImages(dir.to_path_buf()));
    }
    log::info!("Found {} image(s) in {}", images.len(), dir.display());
    Ok(images)
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Images grouped per folder across the whole tree under `root`.
///
/// Every folder holding at least one image becomes a group, the root
/// included. Groups come back in path order.
pub fn list_image_groups(root: &Path) -> Result<Vec<ImageGroup>> {
    let groups: Vec<ImageGroup> = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            let images = list_files(entry.path(), IMAGE_EXTENSIONS);
            (!images.is_empty()).then(|| ImageGroup {
                name: folder_name(entry.path()),
                images,
            })
        })
        .collect();

    if groups.is_empty() {
        return Err(PhotobookError::NoImages(root.to_path_buf()));
    }
    log::info!("Found {} image group(s) under {}", groups.len(), root.display());
    Ok(groups)
}

/// Background images offered in the background picker
pub fn list_background_presets(assets_dir: &Path) -> Vec<PathBuf> {
    list_files(&assets_dir.join("backgrounds"), &["png", "jpg"])
}

/// Frame overlays offered in the frame pickers
pub fn list_frame_presets(assets_dir: &Path) -> Vec<PathBuf> {
    list_files(&assets_dir.join("frames"), &["png"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_list_images_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.JPG"));
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("nested/c.jpg"));

        let images = list_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG"]);
    }

    #[test]
    fn test_empty_folder_is_an_error() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("readme.md"));
        assert!(matches!(
            list_images(dir.path()),
            Err(PhotobookError::NoImages(_))
        ));
    }

    #[test]
    fn test_groups_per_folder() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("summer/1.jpg"));
        touch(&dir.path().join("summer/2.jpg"));
        touch(&dir.path().join("winter/1.png"));
        touch(&dir.path().join("empty/readme.txt"));

        let groups = list_image_groups(dir.path()).unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["summer", "winter"]);
        assert_eq!(groups[0].images.len(), 2);
    }

    #[test]
    fn test_asset_presets() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("backgrounds/paper.jpg"));
        touch(&dir.path().join("backgrounds/linen.jpeg"));
        touch(&dir.path().join("frames/gold.png"));
        touch(&dir.path().join("frames/gold.jpg"));

        assert_eq!(list_background_presets(dir.path()).len(), 1);
        assert_eq!(
            list_frame_presets(dir.path()),
            vec![dir.path().join("frames/gold.png")]
        );
        assert!(list_frame_presets(&dir.path().join("missing")).is_empty());
    }
}
