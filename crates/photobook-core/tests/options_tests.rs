use photobook_core::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_config_is_valid() {
    let config = PhotobookConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.export.format, ExportFormat::Pdf);
    assert_eq!(config.export.jpeg_quality, 95);
    assert_eq!(config.themes_dir(), PathBuf::from("assets/themes"));
    assert_eq!(config.frames_dir(), PathBuf::from("assets/frames"));
    assert_eq!(config.backgrounds_dir(), PathBuf::from("assets/backgrounds"));
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = PhotobookConfig::default();
    config.export.jpeg_quality = 0;
    match config.validate() {
        Err(PhotobookError::Config(msg)) => assert!(msg.contains("JPEG quality")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    let mut config = PhotobookConfig::default();
    config.reference_editor_height = 0.0;
    assert!(matches!(config.validate(), Err(PhotobookError::Config(_))));

    let mut config = PhotobookConfig::default();
    config.default_page_size = PageSize {
        width: 0,
        height: 100,
    };
    assert!(matches!(config.validate(), Err(PhotobookError::Config(_))));
}

#[test]
fn test_page_size_presets() {
    assert_eq!(PageSizePreset::A4Portrait.size(), PageSize::default());
    let landscape = PageSizePreset::A4Landscape.size();
    assert_eq!((landscape.width, landscape.height), (3508, 2480));

    let (w, h) = PageSizePreset::A4Portrait.size().dimensions_mm();
    assert!((w - 210.0).abs() < 0.5);
    assert!((h - 297.0).abs() < 0.5);

    assert!(PageSize::custom(0, 10).is_err());
    assert!(PageSize::custom(constants::MAX_PAGE_SIDE_PX + 1, 10).is_err());
    assert_eq!(PageSize::custom(1200, 900).unwrap().scaled_to(400), (400, 300));
}

#[tokio::test]
async fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photobook.json");

    let mut config = PhotobookConfig::default();
    config.assets_dir = PathBuf::from("/opt/photobook/assets");
    config.export.format = ExportFormat::Jpeg;
    config.export.jpeg_quality = 80;
    config.save(&path).await.unwrap();

    let loaded = PhotobookConfig::load(&path).await.unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.themes_dir(), PathBuf::from("/opt/photobook/assets/themes"));
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photobook.json");
    tokio::fs::write(&path, br#"{"export": {"format": "png"}}"#)
        .await
        .unwrap();

    let loaded = PhotobookConfig::load(&path).await.unwrap();
    assert_eq!(loaded.export.format, ExportFormat::Png);
    assert_eq!(loaded.export.jpeg_quality, 95);
    assert_eq!(loaded.assets_dir, PathBuf::from("assets"));
}

#[tokio::test]
async fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photobook.json");
    tokio::fs::write(&path, br#"{"export": {"jpeg_quality": 250}}"#)
        .await
        .unwrap();

    assert!(matches!(
        PhotobookConfig::load(&path).await,
        Err(PhotobookError::Config(_))
    ));
}
