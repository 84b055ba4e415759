use super::page::{Page, ZDirection};
use super::slot::{PhotoProperties, PhotoSlot};
use super::text::TextBox;
use super::PhotoKey;
use crate::constants::*;
use crate::templates::template;
use crate::types::{Background, FitMode, FrameSource, PageSize, parse_hex_color};
use crate::{PhotobookError, Result};
use std::path::PathBuf;

/// A photo book: ordered pages plus the page cursor of the editor
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub version: u32,
    pub pages: Vec<Page>,
    pub current_page: usize,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            version: PROJECT_FORMAT_VERSION,
            pages: Vec::new(),
            current_page: 0,
        }
    }
}

impl Project {
    /// Project with a single page laid out for `slots` photos
    pub fn new(slots: usize, size: PageSize) -> Self {
        Self {
            pages: vec![Page::from_template(&template(slots), size)],
            ..Self::default()
        }
    }

    pub fn from_pages(pages: Vec<Page>) -> Self {
        let mut project = Self {
            pages,
            ..Self::default()
        };
        project.normalize();
        project
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Result<&Page> {
        self.pages
            .get(index)
            .ok_or(PhotobookError::PageOutOfRange(index))
    }

    pub fn page_mut(&mut self, index: usize) -> Result<&mut Page> {
        self.pages
            .get_mut(index)
            .ok_or(PhotobookError::PageOutOfRange(index))
    }

    pub fn current(&self) -> Result<&Page> {
        self.page(self.current_page)
    }

    pub fn current_mut(&mut self) -> Result<&mut Page> {
        self.page_mut(self.current_page)
    }

    pub fn select_page(&mut self, index: usize) -> Result<()> {
        self.page(index)?;
        self.current_page = index;
        Ok(())
    }

    /// Append a page laid out for `slots` photos and make it current
    pub fn add_page(&mut self, slots: usize, size: PageSize) -> usize {
        self.pages.push(Page::from_template(&template(slots), size));
        self.current_page = self.pages.len() - 1;
        self.current_page
    }

    /// Remove a page; the last remaining page cannot be removed
    pub fn delete_page(&mut self, index: usize) -> Result<Page> {
        self.page(index)?;
        if self.pages.len() <= 1 {
            return Err(PhotobookError::LastPage);
        }
        let removed = self.pages.remove(index);
        if self.current_page >= self.pages.len() {
            self.current_page = self.pages.len() - 1;
        } else if self.current_page > index {
            self.current_page -= 1;
        }
        Ok(removed)
    }

    pub fn slot(&self, key: PhotoKey) -> Result<&PhotoSlot> {
        self.page(key.page)?
            .slot(key.slot)
            .ok_or(PhotobookError::SlotOutOfRange {
                page: key.page,
                slot: key.slot,
            })
    }

    pub fn slot_mut(&mut self, key: PhotoKey) -> Result<&mut PhotoSlot> {
        self.page_mut(key.page)?
            .slot_mut(key.slot)
            .ok_or(PhotobookError::SlotOutOfRange {
                page: key.page,
                slot: key.slot,
            })
    }

    /// Stored properties of a slot, if any were ever set
    pub fn properties(&self, key: PhotoKey) -> Option<&PhotoProperties> {
        self.slot(key).ok()?.properties.as_ref()
    }

    pub fn properties_mut(&mut self, key: PhotoKey) -> Result<&mut PhotoProperties> {
        Ok(self.slot_mut(key)?.properties_mut())
    }

    pub fn set_photo_path(&mut self, key: PhotoKey, path: Option<PathBuf>) -> Result<()> {
        self.slot_mut(key)?.path = path;
        Ok(())
    }

    pub fn add_photo_slot(&mut self, page: usize) -> Result<usize> {
        Ok(self.page_mut(page)?.add_photo_slot())
    }

    pub fn delete_photo_slot(&mut self, key: PhotoKey) -> Result<PhotoSlot> {
        self.page_mut(key.page)?
            .delete_photo_slot(key.slot)
            .ok_or(PhotobookError::SlotOutOfRange {
                page: key.page,
                slot: key.slot,
            })
    }

    pub fn reorder(&mut self, key: PhotoKey, direction: ZDirection) -> Result<()> {
        let page = self.page_mut(key.page)?;
        if page.reorder(key.slot, direction) {
            Ok(())
        } else {
            Err(PhotobookError::SlotOutOfRange {
                page: key.page,
                slot: key.slot,
            })
        }
    }

    pub fn swap_photos(&mut self, page: usize, i: usize, j: usize) -> Result<()> {
        let target = self.page_mut(page)?;
        if target.swap_photos(i, j) {
            Ok(())
        } else {
            Err(PhotobookError::SlotOutOfRange {
                page,
                slot: i.max(j),
            })
        }
    }

    pub fn move_slot(&mut self, key: PhotoKey, relx: f32, rely: f32) -> Result<()> {
        let slot = self.slot_mut(key)?;
        slot.relx = relx;
        slot.rely = rely;
        Ok(())
    }

    pub fn resize_slot(&mut self, key: PhotoKey, relwidth: f32, relheight: f32) -> Result<()> {
        self.slot(key)?;
        self.page_mut(key.page)?
            .resize_slot(key.slot, relwidth, relheight);
        Ok(())
    }

    pub fn resize_slot_master(
        &mut self,
        key: PhotoKey,
        relwidth: f32,
        relheight: f32,
    ) -> Result<()> {
        self.slot(key)?;
        self.page_mut(key.page)?
            .resize_slot_master(key.slot, relwidth, relheight);
        Ok(())
    }

    pub fn apply_fit_mode(
        &mut self,
        key: PhotoKey,
        mode: FitMode,
        image_size: (u32, u32),
    ) -> Result<()> {
        self.slot(key)?;
        self.page_mut(key.page)?
            .apply_fit_mode(key.slot, mode, image_size);
        Ok(())
    }

    /// Replace a page's slots with a fresh `slots`-photo template.
    ///
    /// Photos are kept by position. When photos would be dropped, `confirm`
    /// is asked with the number of photos lost; declining leaves the page
    /// untouched and returns `false`.
    pub fn regenerate_layout(
        &mut self,
        page: usize,
        slots: usize,
        confirm: impl FnOnce(usize) -> bool,
    ) -> Result<bool> {
        let target = self.page_mut(page)?;
        let lost = target.photos_lost_by_relayout(slots);
        if lost > 0 && !confirm(lost) {
            log::debug!("Relayout of page {} to {} slots declined", page, slots);
            return Ok(false);
        }
        target.apply_template(&template(slots));
        log::debug!(
            "Page {} relaid out to {} slots ({} photos dropped)",
            page,
            slots,
            lost
        );
        Ok(true)
    }

    /// Set a page background; color strings must be valid hex
    pub fn set_background(&mut self, page: usize, background: Option<Background>) -> Result<()> {
        if let Some(Background::Color(hex)) = &background {
            parse_hex_color(hex)?;
        }
        self.page_mut(page)?.background = background;
        Ok(())
    }

    pub fn set_page_frame(&mut self, page: usize, frame: Option<FrameSource>) -> Result<()> {
        self.page_mut(page)?.page_frame_path = frame;
        Ok(())
    }

    pub fn set_page_size(&mut self, page: usize, size: PageSize) -> Result<()> {
        size.validate()?;
        self.page_mut(page)?.size = size;
        Ok(())
    }

    pub fn add_text_box(&mut self, page: usize, text: TextBox) -> Result<usize> {
        let target = self.page_mut(page)?;
        target.texts.push(text);
        Ok(target.texts.len() - 1)
    }

    pub fn text(&self, page: usize, index: usize) -> Result<&TextBox> {
        self.page(page)?
            .texts
            .get(index)
            .ok_or(PhotobookError::TextOutOfRange { page, index })
    }

    pub fn text_mut(&mut self, page: usize, index: usize) -> Result<&mut TextBox> {
        self.page_mut(page)?
            .texts
            .get_mut(index)
            .ok_or(PhotobookError::TextOutOfRange { page, index })
    }

    pub fn delete_text_box(&mut self, page: usize, index: usize) -> Result<TextBox> {
        self.text(page, index)?;
        Ok(self.page_mut(page)?.texts.remove(index))
    }

    pub fn move_text(&mut self, page: usize, index: usize, relx: f32, rely: f32) -> Result<()> {
        let text = self.text_mut(page, index)?;
        text.relx = relx;
        text.rely = rely;
        Ok(())
    }

    /// Set a text color after validating the hex string
    pub fn set_text_color(&mut self, page: usize, index: usize, color: &str) -> Result<()> {
        parse_hex_color(color)?;
        self.text_mut(page, index)?.font_color = color.to_string();
        Ok(())
    }

    /// Repair paint orders and the page cursor
    pub fn normalize(&mut self) {
        for (index, page) in self.pages.iter_mut().enumerate() {
            if page.repair_z_order() {
                log::debug!("Reset paint order of page {}", index);
            }
        }
        if self.current_page >= self.pages.len() {
            self.current_page = self.pages.len().saturating_sub(1);
        }
    }

    /// Every slot key in page/slot order
    pub fn photo_keys(&self) -> impl Iterator<Item = PhotoKey> + '_ {
        self.pages.iter().enumerate().flat_map(|(page, p)| {
            (0..p.photos.len()).map(move |slot| PhotoKey::new(page, slot))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FramePreset;

    #[test]
    fn test_new_project() {
        let project = Project::new(3, PageSize::default());
        assert_eq!(project.page_count(), 1);
        assert_eq!(project.pages[0].photos.len(), 3);
        assert_eq!(project.pages[0].z_order, vec![0, 1, 2]);
        assert_eq!(project.version, PROJECT_FORMAT_VERSION);
    }

    #[test]
    fn test_delete_last_page_blocked() {
        let mut project = Project::new(1, PageSize::default());
        assert!(matches!(
            project.delete_page(0),
            Err(PhotobookError::LastPage)
        ));
        assert_eq!(project.page_count(), 1);
    }

    #[test]
    fn test_delete_page_moves_cursor() {
        let mut project = Project::new(1, PageSize::default());
        project.add_page(2, PageSize::default());
        project.add_page(3, PageSize::default());
        assert_eq!(project.current_page, 2);
        project.delete_page(2).unwrap();
        assert_eq!(project.current_page, 1);
        project.delete_page(0).unwrap();
        assert_eq!(project.current_page, 0);
        assert_eq!(project.pages[0].photos.len(), 2);
    }

    #[test]
    fn test_regenerate_layout_confirmation() {
        let mut project = Project::new(3, PageSize::default());
        for slot in 0..3 {
            project
                .set_photo_path(PhotoKey::new(0, slot), Some(format!("{slot}.jpg").into()))
                .unwrap();
        }

        let mut asked = None;
        let applied = project
            .regenerate_layout(0, 1, |lost| {
                asked = Some(lost);
                false
            })
            .unwrap();
        assert!(!applied);
        assert_eq!(asked, Some(2));
        assert_eq!(project.pages[0].photos.len(), 3);

        assert!(project.regenerate_layout(0, 1, |_| true).unwrap());
        assert_eq!(project.pages[0].photos.len(), 1);
        assert_eq!(project.pages[0].photos[0].path, Some("0.jpg".into()));
    }

    #[test]
    fn test_regenerate_growing_needs_no_confirmation() {
        let mut project = Project::new(1, PageSize::default());
        let applied = project
            .regenerate_layout(0, 4, |_| panic!("no photos are lost"))
            .unwrap();
        assert!(applied);
        assert_eq!(project.pages[0].photos.len(), 4);
    }

    #[test]
    fn test_invalid_background_keeps_previous() {
        let mut project = Project::new(1, PageSize::default());
        project
            .set_background(0, Some(Background::Color("#D3E3F1".into())))
            .unwrap();
        let result = project.set_background(0, Some(Background::Color("blue".into())));
        assert!(matches!(result, Err(PhotobookError::InvalidInput(_))));
        assert_eq!(
            project.pages[0].background,
            Some(Background::Color("#D3E3F1".into()))
        );
    }

    #[test]
    fn test_out_of_range_keys() {
        let mut project = Project::new(2, PageSize::default());
        assert!(matches!(
            project.delete_photo_slot(PhotoKey::new(0, 5)),
            Err(PhotobookError::SlotOutOfRange { page: 0, slot: 5 })
        ));
        assert!(matches!(
            project.add_photo_slot(3),
            Err(PhotobookError::PageOutOfRange(3))
        ));
        assert!(project.properties(PhotoKey::new(0, 0)).is_none());
        project.properties_mut(PhotoKey::new(0, 0)).unwrap().frame_path =
            Some(FrameSource::Preset(FramePreset::White));
        assert!(project.properties(PhotoKey::new(0, 0)).is_some());
    }

    #[test]
    fn test_text_boxes() {
        let mut project = Project::new(1, PageSize::default());
        let index = project.add_text_box(0, TextBox::default()).unwrap();
        project.move_text(0, index, 0.2, 0.8).unwrap();
        assert_eq!(project.text(0, index).unwrap().relx, 0.2);
        assert!(project.set_text_color(0, index, "#12").is_err());
        project.delete_text_box(0, index).unwrap();
        assert!(matches!(
            project.text(0, 0),
            Err(PhotobookError::TextOutOfRange { page: 0, index: 0 })
        ));
    }
}
