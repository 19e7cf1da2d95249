//! Client-side stamp image cropping
//!
//! The source is loaded off-DOM, the crop drawn onto a canvas and the visible
//! image swapped for the JPEG data URL. Anything that fails falls back to CSS
//! positioning.

use axe_catalog_common::{CropSpec, JPEG_QUALITY};
use gloo::console;
use gloo::utils::document;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::dom;

pub const CROP_SELECTOR: &str = ".stamp-crop-container img[data-stamp-width]";

/// Start cropping every stamp image on the page; returns how many were queued
pub fn crop_stamp_images() -> usize {
    dom::query_all::<HtmlImageElement>(CROP_SELECTOR)
        .into_iter()
        .filter(|img| crop_image(img))
        .count()
}

fn crop_spec(img: &HtmlImageElement) -> Option<CropSpec> {
    CropSpec::from_attributes(
        img.get_attribute("data-stamp-width").as_deref(),
        img.get_attribute("data-stamp-height").as_deref(),
        img.get_attribute("data-crop-x").as_deref(),
        img.get_attribute("data-crop-y").as_deref(),
    )
}

fn crop_image(img: &HtmlImageElement) -> bool {
    let Some(spec) = crop_spec(img) else {
        console::warn!(format!("invalid crop metadata on {}", img.src()));
        return false;
    };
    let src = img.src();
    if src.is_empty() || src.starts_with("data:") {
        return false;
    }

    let source = match HtmlImageElement::new() {
        Ok(source) => source,
        Err(e) => {
            console::error!(format!("could not create image: {:?}", e));
            apply_css_fallback(img, &spec);
            return true;
        }
    };
    source.set_cross_origin(Some("anonymous"));

    let target = img.clone();
    let loaded = source.clone();
    let onload = Closure::wrap(Box::new(move |_: web_sys::Event| {
        match draw_cropped(&loaded, &spec) {
            Ok(data_url) => apply_cropped(&target, &data_url),
            Err(e) => {
                console::warn!(format!("canvas crop failed, using CSS: {:?}", e));
                apply_css_fallback(&target, &spec);
            }
        }
    }) as Box<dyn FnMut(_)>);

    let target = img.clone();
    let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
        console::warn!(format!("could not load {}, using CSS crop", target.src()));
        apply_css_fallback(&target, &spec);
    }) as Box<dyn FnMut(_)>);

    source.set_onload(Some(onload.as_ref().unchecked_ref()));
    source.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    source.set_src(&src);
    true
}

fn draw_cropped(source: &HtmlImageElement, spec: &CropSpec) -> Result<String, JsValue> {
    let rect = spec
        .to_pixels(source.natural_width(), source.natural_height())
        .ok_or_else(|| JsValue::from_str("image has no natural size"))?;

    let canvas: HtmlCanvasElement = document().create_element("canvas")?.dyn_into()?;
    canvas.set_width(rect.width);
    canvas.set_height(rect.height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;

    let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        source, x, y, w, h, 0.0, 0.0, w, h,
    )?;

    // throws SecurityError on a tainted canvas
    canvas.to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(JPEG_QUALITY))
}

fn apply_cropped(img: &HtmlImageElement, data_url: &str) {
    img.set_src(data_url);
    set_fit(img, "center");
}

pub fn apply_css_fallback(img: &HtmlImageElement, spec: &CropSpec) {
    set_fit(img, &spec.fallback_object_position());
}

fn set_fit(img: &HtmlImageElement, position: &str) {
    let style = img.style();
    let result = style
        .set_property("width", "100%")
        .and_then(|_| style.set_property("height", "100%"))
        .and_then(|_| style.set_property("object-fit", "contain"))
        .and_then(|_| style.set_property("object-position", position));
    if let Err(e) = result {
        console::error!(format!("style update failed: {:?}", e));
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn image(attrs: &[(&str, &str)]) -> HtmlImageElement {
        let img = HtmlImageElement::new().unwrap();
        for (name, value) in attrs {
            img.set_attribute(name, value).unwrap();
        }
        img
    }

    #[wasm_bindgen_test]
    fn test_css_fallback_position() {
        let img = image(&[]);
        let spec = CropSpec::new(12.5, 40.0, 20.0, 20.0).unwrap();
        apply_css_fallback(&img, &spec);
        let style = img.style();
        assert_eq!(style.get_property_value("object-fit").unwrap(), "contain");
        assert_eq!(style.get_property_value("object-position").unwrap(), "-12.5% -40%");
    }

    #[wasm_bindgen_test]
    fn test_data_url_is_skipped() {
        let img = image(&[
            ("data-stamp-width", "50"),
            ("data-stamp-height", "50"),
            ("data-crop-x", "0"),
            ("data-crop-y", "0"),
            ("src", "data:image/jpeg;base64,AAAA"),
        ]);
        assert!(!crop_image(&img));
    }

    #[wasm_bindgen_test]
    fn test_invalid_metadata_is_skipped() {
        let img = image(&[("data-stamp-width", "0"), ("src", "/media/a.jpg")]);
        assert!(crop_spec(&img).is_none());
        assert!(!crop_image(&img));
    }
}
