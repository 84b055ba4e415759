use image::{Rgba, RgbaImage};
use photobook_core::*;

const MARK: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Landscape source with red and blue side bands and a vertical blue ramp
/// in the middle
fn banded_landscape(width: u32, height: u32) -> RgbaImage {
    let band = width / 10;
    RgbaImage::from_fn(width, height, |x, y| {
        if x < band {
            Rgba([255, 0, 0, 255])
        } else if x >= width - band {
            Rgba([0, 0, 255, 255])
        } else {
            Rgba([0, 255, (y * 255 / (height - 1)) as u8, 255])
        }
    })
}

#[test]
fn test_basic_composite_crops_left_and_right() {
    let source = banded_landscape(4000, 3000);
    let props = PhotoProperties::default();
    let out = compose(&source, &ComposeRequest::new(300, 300, &props)).unwrap();

    assert_eq!(out.dimensions(), (300, 300));

    // Side bands are cut away
    for x in [0, 150, 299] {
        let px = out.get_pixel(x, 150).0;
        assert!(px[0] < 30, "red band visible at column {}: {:?}", x, px);
        assert!(px[1] > 225, "center columns missing at column {}: {:?}", x, px);
    }

    // Top and bottom rows survive
    assert!(out.get_pixel(150, 0).0[2] < 20);
    assert!(out.get_pixel(150, 299).0[2] > 235);
}

#[test]
fn test_cover_crop_keeps_center_pixel() {
    // Same height as the slot, so cover needs no resampling
    let mut source = RgbaImage::from_pixel(48, 16, Rgba([10, 10, 10, 255]));
    source.put_pixel(24, 8, MARK);
    let props = PhotoProperties::default();

    let out = compose(&source, &ComposeRequest::new(16, 16, &props)).unwrap();

    assert_eq!(out.dimensions(), (16, 16));
    assert_eq!(*out.get_pixel(8, 8), MARK);
    assert_eq!(out.pixels().filter(|p| **p == MARK).count(), 1);
}

#[test]
fn test_compose_is_repeatable() {
    let source = banded_landscape(320, 200);
    let requests = [
        PhotoProperties::default(),
        PhotoProperties {
            zoom: 1.8,
            pan_x: 0.2,
            pan_y: 0.9,
            brightness: 1.3,
            contrast: 0.7,
            saturation: 1.5,
            ..PhotoProperties::default()
        },
        PhotoProperties {
            fit_mode: FitMode::Fit,
            grayscale: true,
            frame_path: Some(FrameSource::Preset(FramePreset::Gold)),
            frame_offset_x: 4,
            ..PhotoProperties::default()
        },
    ];

    for props in &requests {
        let request = ComposeRequest::new(90, 70, props)
            .with_master(100, 80)
            .with_offset_scale(0.5);
        let first = compose(&source, &request).unwrap();
        let second = compose(&source, &request).unwrap();
        assert_eq!(first, second);
    }
    assert_eq!(source, banded_landscape(320, 200));
}

#[test]
fn test_grayscale_output_has_equal_channels() {
    let source = banded_landscape(100, 50);
    let props = PhotoProperties {
        grayscale: true,
        ..PhotoProperties::default()
    };
    let out = compose(&source, &ComposeRequest::new(40, 40, &props)).unwrap();
    for px in out.pixels() {
        assert_eq!(px.0[0], px.0[1]);
        assert_eq!(px.0[1], px.0[2]);
    }
}

#[test]
fn test_out_of_range_file_values_are_bounded() {
    let json = br#"{
        "pages": [{"photos": [
            {"path": null, "relx": 0.1, "rely": 0.1, "relwidth": 0.5, "relheight": 0.5},
            {"path": null, "relx": 0.5, "rely": 0.5, "relwidth": 0.3, "relheight": 0.3}
        ]}],
        "photo_properties": {
            "(0, 0)": {"zoom": 100000.0},
            "(0, 1)": {"frame_scale": 100000.0, "frame_path": "preset_gold"}
        }
    }"#;
    let project = io::project_from_json(json).unwrap();

    let zoomed = project.properties(PhotoKey::new(0, 0)).unwrap();
    assert_eq!(zoomed.zoom, constants::MAX_ZOOM);
    let framed = project.properties(PhotoKey::new(0, 1)).unwrap();
    assert_eq!(framed.frame_scale, constants::MAX_FRAME_SCALE);

    let source = banded_landscape(40, 30);
    for props in [zoomed, framed] {
        let out = compose(&source, &ComposeRequest::new(300, 300, props)).unwrap();
        assert_eq!(out.dimensions(), (300, 300));
    }
}
