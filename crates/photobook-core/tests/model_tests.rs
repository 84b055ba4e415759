use photobook_core::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn props_with_zoom(zoom: f32) -> PhotoProperties {
    PhotoProperties {
        zoom,
        ..PhotoProperties::default()
    }
}

fn assert_page_consistent(page: &Page) {
    let n = page.photos.len();
    assert!(page.z_order_is_valid(), "paint order {:?} for {} slots", page.z_order, n);
    let mut sorted = page.z_order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..n).collect::<Vec<_>>());
}

#[test]
fn test_delete_then_reindex() {
    let mut project = Project::new(3, PageSize::default());
    for slot in 0..3 {
        *project.properties_mut(PhotoKey::new(0, slot)).unwrap() = props_with_zoom(1.0 + slot as f32);
    }

    project.delete_photo_slot(PhotoKey::new(0, 1)).unwrap();

    assert_eq!(project.properties(PhotoKey::new(0, 0)).unwrap().zoom, 1.0);
    assert_eq!(project.properties(PhotoKey::new(0, 1)).unwrap().zoom, 3.0);
    assert!(project.properties(PhotoKey::new(0, 2)).is_none());
    assert!(matches!(
        project.slot(PhotoKey::new(0, 2)),
        Err(PhotobookError::SlotOutOfRange { page: 0, slot: 2 })
    ));
    assert_page_consistent(&project.pages[0]);
}

#[test]
fn test_reindex_after_random_edits() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut project = Project::new(4, PageSize::default());
    let mut tag = 0.0f32;

    for _ in 0..200 {
        let n = project.pages[0].photos.len();
        match rng.random_range(0..4) {
            0 => {
                let index = project.add_photo_slot(0).unwrap();
                tag += 1.0;
                *project.properties_mut(PhotoKey::new(0, index)).unwrap() = props_with_zoom(1.0 + tag);
            }
            1 if n > 0 => {
                let index = rng.random_range(0..n);
                let before: Vec<_> = project.pages[0]
                    .photos
                    .iter()
                    .map(|s| s.properties.clone())
                    .collect();
                project.delete_photo_slot(PhotoKey::new(0, index)).unwrap();
                let after: Vec<_> = project.pages[0]
                    .photos
                    .iter()
                    .map(|s| s.properties.clone())
                    .collect();
                let mut expected = before;
                expected.remove(index);
                assert_eq!(after, expected);
            }
            2 if n > 0 => {
                let index = rng.random_range(0..n);
                let direction = [
                    ZDirection::Forward,
                    ZDirection::Backward,
                    ZDirection::ToFront,
                    ZDirection::ToBack,
                ][rng.random_range(0..4)];
                project.reorder(PhotoKey::new(0, index), direction).unwrap();
            }
            _ => {
                let slots = rng.random_range(0..7);
                project.regenerate_layout(0, slots, |_| true).unwrap();
            }
        }
        assert_page_consistent(&project.pages[0]);
        assert!(project.photo_keys().all(|key| key.slot < project.pages[0].photos.len()));
    }
}

#[test]
fn test_reorder_keeps_slot_list() {
    let mut project = Project::new(3, PageSize::default());
    let before = project.pages[0].photos.clone();
    project.reorder(PhotoKey::new(0, 0), ZDirection::ToFront).unwrap();
    assert_eq!(project.pages[0].paint_order(), vec![1, 2, 0]);
    assert_eq!(project.pages[0].photos, before);
}

#[test]
fn test_swap_keeps_geometry_and_moves_frames() {
    let mut project = Project::new(2, PageSize::default());
    project.set_photo_path(PhotoKey::new(0, 0), Some("a.jpg".into())).unwrap();
    project.set_photo_path(PhotoKey::new(0, 1), Some("b.jpg".into())).unwrap();
    project.properties_mut(PhotoKey::new(0, 0)).unwrap().frame_path =
        Some(FrameSource::Preset(FramePreset::Gold));
    project.properties_mut(PhotoKey::new(0, 1)).unwrap().frame_path =
        Some(FrameSource::Custom("frames/leaf.png".into()));
    let geometry: Vec<_> = project.pages[0].photos.iter().map(PhotoSlot::geometry).collect();

    project.swap_photos(0, 0, 1).unwrap();

    let page = &project.pages[0];
    assert_eq!(page.photos[0].path.as_deref(), Some("b.jpg".as_ref()));
    assert_eq!(page.photos[1].path.as_deref(), Some("a.jpg".as_ref()));
    assert_eq!(
        page.photos[0].effective_properties().frame_path,
        Some(FrameSource::Custom("frames/leaf.png".into()))
    );
    assert_eq!(
        page.photos[1].effective_properties().frame_path,
        Some(FrameSource::Preset(FramePreset::Gold))
    );
    let after: Vec<_> = page.photos.iter().map(PhotoSlot::geometry).collect();
    assert_eq!(after, geometry);
}

#[test]
fn test_template_slots_start_at_master_size() {
    for n in 0..12 {
        let project = Project::new(n, PageSize::default());
        let page = &project.pages[0];
        assert_eq!(page.photos.len(), n);
        for slot in &page.photos {
            assert_eq!(slot.relwidth, slot.layout_relwidth);
            assert_eq!(slot.relheight, slot.layout_relheight);
            assert!(slot.relx >= 0.0 && slot.relx + slot.relwidth <= 1.0 + 1e-6);
            assert!(slot.rely >= 0.0 && slot.rely + slot.relheight <= 1.0 + 1e-6);
        }
    }
}

#[test]
fn test_structural_errors_leave_project_untouched() {
    let mut project = Project::new(2, PageSize::default());
    let before = project.clone();

    let err = project.delete_page(0).unwrap_err();
    assert!(matches!(err, PhotobookError::LastPage));
    assert!(err.is_structural());

    assert!(project.delete_photo_slot(PhotoKey::new(0, 5)).is_err());
    assert!(project.delete_text_box(0, 0).is_err());
    assert!(project.select_page(3).is_err());
    assert!(project
        .set_background(0, Some(Background::Color("not-a-color".to_string())))
        .is_err());
    assert_eq!(project, before);
}
