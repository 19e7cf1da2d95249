//! Stamp cropping
//!
//! Percent geometry applied to real image files

use axe_catalog::crop;
use image::{Rgb, RgbImage};
use tempfile::tempdir;

fn write_quadrants(path: &std::path::Path) {
    // 200x100: left half red, right half blue
    let img = RgbImage::from_fn(200, 100, |x, _| if x < 100 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) });
    img.save(path).unwrap();
}

#[test]
fn test_crop_right_half() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("stamp.png");
    write_quadrants(&input);

    let spec = crop::crop_spec(50.0, 0.0, 50.0, 100.0).unwrap();
    let output = crop::default_output(&input);
    let rect = crop::crop_file(&input, &spec, &output).unwrap();
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (100, 0, 100, 100));

    let cropped = image::open(&output).unwrap().to_rgb8();
    assert_eq!(cropped.dimensions(), (100, 100));
    let center = cropped.get_pixel(50, 50);
    assert!(center[2] > 200 && center[0] < 60, "expected blue, got {:?}", center);
}

#[test]
fn test_crop_clamped_to_bounds() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("stamp.png");
    write_quadrants(&input);

    let spec = crop::crop_spec(90.0, 50.0, 50.0, 80.0).unwrap();
    let output = dir.path().join("out.jpg");
    let rect = crop::crop_file(&input, &spec, &output).unwrap();
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (180, 50, 20, 50));
    assert_eq!(image::open(&output).unwrap().to_rgb8().dimensions(), (20, 50));
}
