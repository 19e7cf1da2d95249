//! Error cases
//!
//! Failure paths of the CLI library surface as typed errors

use axe_catalog::config::Config;
use axe_catalog::crop;
use axe_catalog::error::CatalogError;
use axe_catalog::templates;
use std::path::Path;
use tempfile::tempdir;

/// Cropping a missing file
#[test]
fn test_crop_missing_file() {
    let spec = crop::crop_spec(0.0, 0.0, 50.0, 50.0).unwrap();
    let result = crop::crop_file(Path::new("/nonexistent/stamp.png"), &spec, Path::new("/tmp/out.jpg"));
    assert!(matches!(result, Err(CatalogError::FileNotFound(_))));
}

/// A file that is not an image
#[test]
fn test_crop_not_an_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("notes.png");
    std::fs::write(&input, "not an image").unwrap();

    let spec = crop::crop_spec(0.0, 0.0, 50.0, 50.0).unwrap();
    let result = crop::crop_file(&input, &spec, &dir.path().join("out.jpg"));
    assert!(matches!(result, Err(CatalogError::Image(_))));
}

/// Broken config JSON
#[test]
fn test_config_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Config::load_from(&path), Err(CatalogError::JsonParse(_))));
}

/// Broken template file
#[test]
fn test_templates_invalid_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let err = templates::load_catalog(Some(&path)).unwrap_err();
    assert!(matches!(err, CatalogError::Catalog(_)));
}

/// Display output of each variant
#[test]
fn test_error_display() {
    let errors = vec![
        CatalogError::Config("bad url".to_string()),
        CatalogError::FileNotFound("stamp.jpg".to_string()),
        CatalogError::InvalidCrop("width=0".to_string()),
        CatalogError::Server("HTTP 500".to_string()),
        CatalogError::Catalog(axe_catalog_common::Error::TemplateNotFound("Yxa".to_string())),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "empty Display for {:?}", err);
    }
}
