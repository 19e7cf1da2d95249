//! Stamp crop geometry
//!
//! Crop rectangles are stored as percentages of the source image and
//! converted to pixels once the natural size is known.

use serde::{Deserialize, Serialize};

/// Canvas/JPEG encoder quality for cropped output
pub const JPEG_QUALITY: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSpec {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropSpec {
    /// Checked constructor: all values finite, width and height positive
    pub fn new(origin_x: f64, origin_y: f64, width: f64, height: f64) -> Option<Self> {
        let finite = [origin_x, origin_y, width, height].iter().all(|v| v.is_finite());
        if !finite || width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self { origin_x, origin_y, width, height })
    }

    /// From the `data-stamp-width`, `data-stamp-height`, `data-crop-x`,
    /// `data-crop-y` attribute values
    pub fn from_attributes(
        width: Option<&str>,
        height: Option<&str>,
        crop_x: Option<&str>,
        crop_y: Option<&str>,
    ) -> Option<Self> {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<f64>().ok());
        Self::new(parse(crop_x)?, parse(crop_y)?, parse(width)?, parse(height)?)
    }

    /// Pixel rectangle inside an image of the given natural size. Rounded to
    /// the nearest pixel and clamped so it never leaves the image; at least
    /// one pixel wide and high.
    pub fn to_pixels(&self, natural_width: u32, natural_height: u32) -> Option<PixelRect> {
        if natural_width == 0 || natural_height == 0 {
            return None;
        }
        let scale = |pct: f64, total: u32| ((pct / 100.0) * total as f64).round().max(0.0) as u32;

        let x = scale(self.origin_x, natural_width).min(natural_width - 1);
        let y = scale(self.origin_y, natural_height).min(natural_height - 1);
        let width = scale(self.width, natural_width).clamp(1, natural_width - x);
        let height = scale(self.height, natural_height).clamp(1, natural_height - y);

        Some(PixelRect { x, y, width, height })
    }

    /// CSS `object-position` used when the canvas path is unavailable
    pub fn fallback_object_position(&self) -> String {
        format!("-{}% -{}%", self.origin_x, self.origin_y)
    }
}
