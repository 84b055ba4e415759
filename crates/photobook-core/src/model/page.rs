use super::slot::{PhotoSlot, SlotGeometry};
use super::text::TextBox;
use crate::constants::*;
use crate::types::{Background, FitMode, FrameSource, PageSize, PixelRect};
use serde::{Deserialize, Serialize};

/// Paint-order move for one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZDirection {
    /// One step toward the viewer
    Forward,
    /// One step away from the viewer
    Backward,
    ToFront,
    ToBack,
}

/// One page of a photo book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub photos: Vec<PhotoSlot>,
    #[serde(default)]
    pub texts: Vec<TextBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_frame_path: Option<FrameSource>,
    #[serde(default = "default_frame_thickness")]
    pub page_frame_thickness: f32,
    #[serde(default = "default_frame_scale")]
    pub page_frame_scale: f32,
    #[serde(default)]
    pub page_frame_offset_x: i32,
    #[serde(default)]
    pub page_frame_offset_y: i32,
    #[serde(default)]
    pub size: PageSize,
    /// Back-to-front paint order; stored in the project-level map on disk
    #[serde(skip)]
    pub z_order: Vec<usize>,
}

fn default_frame_thickness() -> f32 {
    DEFAULT_FRAME_THICKNESS
}

fn default_frame_scale() -> f32 {
    1.0
}

impl Default for Page {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Page {
    pub fn new(size: PageSize) -> Self {
        Self {
            photos: Vec::new(),
            texts: Vec::new(),
            background: None,
            page_frame_path: None,
            page_frame_thickness: DEFAULT_FRAME_THICKNESS,
            page_frame_scale: 1.0,
            page_frame_offset_x: 0,
            page_frame_offset_y: 0,
            size,
            z_order: Vec::new(),
        }
    }

    /// Page whose slots follow `geometry`, all empty
    pub fn from_template(geometry: &[SlotGeometry], size: PageSize) -> Self {
        let mut page = Self::new(size);
        page.photos = geometry.iter().copied().map(PhotoSlot::from_geometry).collect();
        page.z_order = (0..page.photos.len()).collect();
        page
    }

    pub fn slot(&self, index: usize) -> Option<&PhotoSlot> {
        self.photos.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut PhotoSlot> {
        self.photos.get_mut(index)
    }

    /// Append an empty slot at the default position; returns its index
    pub fn add_photo_slot(&mut self) -> usize {
        self.repair_z_order();
        self.photos.push(PhotoSlot::default());
        let index = self.photos.len() - 1;
        self.z_order.push(index);
        index
    }

    /// Remove slot `index` together with its properties; later slots and
    /// their paint-order entries shift down by one
    pub fn delete_photo_slot(&mut self, index: usize) -> Option<PhotoSlot> {
        if index >= self.photos.len() {
            return None;
        }
        self.repair_z_order();
        let removed = self.photos.remove(index);
        self.z_order.retain(|&z| z != index);
        for z in &mut self.z_order {
            if *z > index {
                *z -= 1;
            }
        }
        Some(removed)
    }

    /// Move a slot within the paint order; the slot list is untouched
    pub fn reorder(&mut self, index: usize, direction: ZDirection) -> bool {
        if index >= self.photos.len() {
            return false;
        }
        self.repair_z_order();
        let Some(pos) = self.z_order.iter().position(|&z| z == index) else {
            return false;
        };
        let last = self.z_order.len() - 1;
        match direction {
            ZDirection::Forward if pos < last => self.z_order.swap(pos, pos + 1),
            ZDirection::Backward if pos > 0 => self.z_order.swap(pos, pos - 1),
            ZDirection::ToFront => {
                let entry = self.z_order.remove(pos);
                self.z_order.push(entry);
            }
            ZDirection::ToBack => {
                let entry = self.z_order.remove(pos);
                self.z_order.insert(0, entry);
            }
            _ => {}
        }
        true
    }

    /// Exchange the photos and properties of two slots, keeping geometry
    pub fn swap_photos(&mut self, i: usize, j: usize) -> bool {
        if i >= self.photos.len() || j >= self.photos.len() {
            return false;
        }
        if i == j {
            return true;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let (head, tail) = self.photos.split_at_mut(hi);
        let (a, b) = (&mut head[lo], &mut tail[0]);
        std::mem::swap(&mut a.path, &mut b.path);
        std::mem::swap(&mut a.properties, &mut b.properties);
        true
    }

    pub fn move_slot(&mut self, index: usize, relx: f32, rely: f32) -> bool {
        match self.photos.get_mut(index) {
            Some(slot) => {
                slot.relx = relx;
                slot.rely = rely;
                true
            }
            None => false,
        }
    }

    /// Change the current box only; the master size is kept
    pub fn resize_slot(&mut self, index: usize, relwidth: f32, relheight: f32) -> bool {
        match self.photos.get_mut(index) {
            Some(slot) => {
                slot.relwidth = relwidth;
                slot.relheight = relheight;
                true
            }
            None => false,
        }
    }

    /// Change both the current box and the master size
    pub fn resize_slot_master(&mut self, index: usize, relwidth: f32, relheight: f32) -> bool {
        match self.photos.get_mut(index) {
            Some(slot) => {
                slot.relwidth = relwidth;
                slot.relheight = relheight;
                slot.layout_relwidth = relwidth;
                slot.layout_relheight = relheight;
                true
            }
            None => false,
        }
    }

    /// Switch fit mode and resize the slot box to match.
    ///
    /// `fit` shrinks the master box to the image aspect ratio, `fill` restores
    /// the master box. `image_size` is ignored for `fill`.
    pub fn apply_fit_mode(&mut self, index: usize, mode: FitMode, image_size: (u32, u32)) -> bool {
        let area = self.drawable_area(self.size.width, self.size.height);
        let Some(slot) = self.photos.get_mut(index) else {
            return false;
        };
        slot.properties_mut().fit_mode = mode;
        match mode {
            FitMode::Fill => {
                slot.relwidth = slot.layout_relwidth;
                slot.relheight = slot.layout_relheight;
            }
            FitMode::Fit => {
                let master_w = slot.layout_relwidth * area.width as f32;
                let master_h = slot.layout_relheight * area.height as f32;
                let (w, h) = crate::compose::fit_box(master_w, master_h, image_size.0, image_size.1);
                slot.relwidth = w / area.width.max(1) as f32;
                slot.relheight = h / area.height.max(1) as f32;
            }
        }
        true
    }

    /// Replace the slots with `geometry`, keeping photos and properties by
    /// position; slots beyond the new count are dropped
    pub fn apply_template(&mut self, geometry: &[SlotGeometry]) {
        let mut old = std::mem::take(&mut self.photos).into_iter();
        self.photos = geometry
            .iter()
            .map(|g| {
                let mut slot = PhotoSlot::from_geometry(*g);
                if let Some(previous) = old.next() {
                    slot.path = previous.path;
                    slot.properties = previous.properties;
                }
                slot
            })
            .collect();
        self.z_order = (0..self.photos.len()).collect();
    }

    /// Number of photos that `apply_template` with `count` slots would drop
    pub fn photos_lost_by_relayout(&self, count: usize) -> usize {
        self.photos
            .iter()
            .skip(count)
            .filter(|slot| !slot.is_empty())
            .count()
    }

    pub fn z_order_is_valid(&self) -> bool {
        if self.z_order.len() != self.photos.len() {
            return false;
        }
        let mut seen = vec![false; self.photos.len()];
        for &z in &self.z_order {
            if z >= seen.len() || seen[z] {
                return false;
            }
            seen[z] = true;
        }
        true
    }

    /// Reset the paint order to slot order if it is not a permutation of
    /// the slot indices; returns whether a repair happened
    pub fn repair_z_order(&mut self) -> bool {
        if self.z_order_is_valid() {
            return false;
        }
        self.z_order = (0..self.photos.len()).collect();
        true
    }

    /// Back-to-front paint order without mutating the page
    pub fn paint_order(&self) -> Vec<usize> {
        if self.z_order_is_valid() {
            self.z_order.clone()
        } else {
            (0..self.photos.len()).collect()
        }
    }

    /// Width of the preset page-frame band at the given page size
    pub fn frame_inset(&self, width: u32, height: u32) -> u32 {
        match &self.page_frame_path {
            Some(frame) if frame.is_preset() => {
                (self.page_frame_thickness.max(0.0) * width.min(height) as f32) as u32
            }
            _ => 0,
        }
    }

    /// Region that slot and text fractions refer to
    pub fn drawable_area(&self, width: u32, height: u32) -> PixelRect {
        let inset = self.frame_inset(width, height).min(width / 2).min(height / 2);
        PixelRect::new(
            inset as i64,
            inset as i64,
            width - 2 * inset,
            height - 2 * inset,
        )
    }

    /// Pixel box of slot `index` when the page is `width × height`
    pub fn slot_rect(&self, index: usize, width: u32, height: u32) -> Option<PixelRect> {
        let slot = self.photos.get(index)?;
        let area = self.drawable_area(width, height);
        let aw = area.width as f32;
        let ah = area.height as f32;
        Some(PixelRect::new(
            area.x + (slot.relx * aw) as i64,
            area.y + (slot.rely * ah) as i64,
            (slot.relwidth * aw).max(0.0) as u32,
            (slot.relheight * ah).max(0.0) as u32,
        ))
    }

    /// Master box of slot `index` in pixels
    pub fn slot_master_size(&self, index: usize, width: u32, height: u32) -> Option<(u32, u32)> {
        let slot = self.photos.get(index)?;
        let area = self.drawable_area(width, height);
        Some((
            (slot.layout_relwidth * area.width as f32).max(0.0) as u32,
            (slot.layout_relheight * area.height as f32).max(0.0) as u32,
        ))
    }
}
