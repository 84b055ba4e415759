use image::{Rgba, RgbaImage};
use photobook_core::templates::{SMART_TEMPLATES, candidates};
use photobook_core::wizard::*;
use photobook_core::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([color[0], color[1], color[2], 255]))
        .save(&path)
        .unwrap();
    path
}

fn placed_photos(project: &Project) -> Vec<PathBuf> {
    let mut placed: Vec<PathBuf> = project
        .pages
        .iter()
        .flat_map(|p| p.photos.iter().filter_map(|s| s.path.clone()))
        .collect();
    placed.sort();
    placed
}

#[test]
fn test_orientation_rules_are_positional() {
    use Orientation::{Landscape, Portrait, Square};

    let head = [Landscape, Square, Square, Square, Square];
    let found = candidates(&head);
    assert_eq!(found[0].name, "1_landscape_4_square");

    let mut rng = StdRng::seed_from_u64(3);
    let all = [Landscape, Portrait, Square];
    for _ in 0..500 {
        let len = rng.random_range(1..7);
        let queue: Vec<Orientation> = (0..len).map(|_| all[rng.random_range(0..3)]).collect();
        for template in SMART_TEMPLATES {
            let fits = template.slot_count() <= queue.len()
                && template
                    .orientations
                    .iter()
                    .zip(&queue)
                    .all(|(rule, &o)| rule.accepts(o));
            assert_eq!(template.matches(&queue), fits, "{} vs {:?}", template.name, queue);
        }
        for template in candidates(&queue) {
            assert!(template.matches(&queue));
        }
    }
}

#[test]
fn test_smart_wizard_places_every_readable_image() {
    let dir = TempDir::new().unwrap();
    let mut expected = vec![write_png(dir.path(), "a_wide.png", 60, 40, [220, 120, 30])];
    for i in 0..4 {
        expected.push(write_png(dir.path(), &format!("b_square_{i}.png"), 40, 40, [230, 140, 40]));
    }
    expected.push(write_png(dir.path(), "c_tall.png", 40, 60, [200, 100, 20]));
    std::fs::write(dir.path().join("d_broken.jpg"), b"not an image").unwrap();
    expected.sort();

    let options = SmartWizardOptions {
        page_size: PageSize::custom(400, 300).unwrap(),
        ..SmartWizardOptions::default()
    };
    let (project, report) =
        run_smart_wizard(dir.path(), &options, &mut StdRng::seed_from_u64(11)).unwrap();

    assert_eq!(placed_photos(&project), expected);
    assert_eq!(report.images, 6);
    assert_eq!(report.pages, project.page_count());
    assert_eq!(report.skipped, vec![dir.path().join("d_broken.jpg")]);
    assert!(report.summary().contains("1 unreadable image(s) skipped"));

    for page in &project.pages {
        assert_eq!(page.size, PageSize::custom(400, 300).unwrap());
        assert!(matches!(page.background, Some(Background::Color(_))));
        assert!(page.z_order_is_valid());
        for slot in &page.photos {
            assert!(slot.path.is_some());
            assert!(slot.effective_properties().frame_path.is_some());
        }
    }
}

#[test]
fn test_smart_wizard_is_reproducible() {
    let dir = TempDir::new().unwrap();
    for i in 0..7 {
        let (w, h) = [(60, 40), (40, 60), (40, 40)][i % 3];
        write_png(dir.path(), &format!("{i}.png"), w, h, [40, 90, 200]);
    }
    let options = SmartWizardOptions {
        shuffle: true,
        ..SmartWizardOptions::default()
    };

    let (a, _) = run_smart_wizard(dir.path(), &options, &mut StdRng::seed_from_u64(5)).unwrap();
    let (b, _) = run_smart_wizard(dir.path(), &options, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_smart_wizard_groups_get_titles() {
    let root = TempDir::new().unwrap();
    for (folder, count) in [("Beach", 2), ("Mountains", 3)] {
        let dir = root.path().join(folder);
        std::fs::create_dir(&dir).unwrap();
        for i in 0..count {
            write_png(&dir, &format!("{i}.png"), 60, 40, [30, 160, 40]);
        }
    }
    let options = SmartWizardOptions {
        group_by_folder: true,
        ..SmartWizardOptions::default()
    };

    let (project, report) =
        run_smart_wizard(root.path(), &options, &mut StdRng::seed_from_u64(1)).unwrap();

    assert_eq!(report.images, 5);
    let mut titles: Vec<&str> = project
        .pages
        .iter()
        .flat_map(|p| p.texts.iter().map(|t| t.text.as_str()))
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Beach", "Mountains"]);
}

#[test]
fn test_basic_wizard_four_per_page() {
    let dir = TempDir::new().unwrap();
    for i in 0..9 {
        write_png(dir.path(), &format!("{i}.png"), 30, 20, [128, 128, 128]);
    }

    let (project, report) =
        run_basic_wizard(dir.path(), PageSize::default(), &mut StdRng::seed_from_u64(2)).unwrap();

    let counts: Vec<usize> = project.pages.iter().map(|p| p.photos.len()).collect();
    assert_eq!(counts, vec![4, 4, 1]);
    assert_eq!(report.style, "Basic");
    assert_eq!(placed_photos(&project).len(), 9);
}

#[test]
fn test_wizards_reject_empty_folder() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"no photos here").unwrap();

    let basic = run_basic_wizard(dir.path(), PageSize::default(), &mut StdRng::seed_from_u64(0));
    assert!(matches!(basic, Err(PhotobookError::NoImages(_))));

    let smart = run_smart_wizard(
        dir.path(),
        &SmartWizardOptions::default(),
        &mut StdRng::seed_from_u64(0),
    );
    assert!(matches!(smart, Err(PhotobookError::NoImages(_))));
}

#[test]
fn test_image_theme_without_theme_folders() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 40, 40, [200, 200, 200]);
    let themes = TempDir::new().unwrap();

    let options = SmartWizardOptions {
        theme: ThemeMode::Image {
            themes_dir: themes.path().to_path_buf(),
        },
        ..SmartWizardOptions::default()
    };
    let result = run_smart_wizard(dir.path(), &options, &mut StdRng::seed_from_u64(0));
    assert!(matches!(result, Err(PhotobookError::NoThemes(_))));
}
