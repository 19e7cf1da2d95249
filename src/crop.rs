//! Local stamp cropping with the browser cropper's geometry

use crate::error::{CatalogError, Result};
use axe_catalog_common::{CropSpec, PixelRect, JPEG_QUALITY};
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub fn jpeg_quality() -> u8 {
    (JPEG_QUALITY * 100.0).round() as u8
}

/// `<dir>/<stem>_crop.jpg`
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "stamp".to_string());
    input.with_file_name(format!("{}_crop.jpg", stem))
}

pub fn crop_spec(x: f64, y: f64, width: f64, height: f64) -> Result<CropSpec> {
    CropSpec::new(x, y, width, height).ok_or_else(|| {
        CatalogError::InvalidCrop(format!(
            "x={} y={} width={} height={} (width and height must be positive)",
            x, y, width, height
        ))
    })
}

/// Crop `input` and write the region as JPEG to `output`
pub fn crop_file(input: &Path, spec: &CropSpec, output: &Path) -> Result<PixelRect> {
    if !input.exists() {
        return Err(CatalogError::FileNotFound(input.display().to_string()));
    }

    let img = image::open(input)?;
    let rect = spec
        .to_pixels(img.width(), img.height())
        .ok_or_else(|| CatalogError::InvalidCrop(format!("{} has no pixels", input.display())))?;
    tracing::debug!(?rect, width = img.width(), height = img.height(), "cropping");

    let cropped = img.crop_imm(rect.x, rect.y, rect.width, rect.height).to_rgb8();
    let mut writer = BufWriter::new(File::create(output)?);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality());
    encoder.encode_image(&cropped)?;

    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("/tmp/stamps/gransfors.png")),
            PathBuf::from("/tmp/stamps/gransfors_crop.jpg")
        );
    }

    #[test]
    fn test_quality() {
        assert_eq!(jpeg_quality(), 90);
    }

    #[test]
    fn test_crop_spec_rejects_zero_width() {
        assert!(matches!(crop_spec(0.0, 0.0, 0.0, 10.0), Err(CatalogError::InvalidCrop(_))));
    }
}
