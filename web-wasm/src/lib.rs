//! Axe Catalog Web (Leptos + WASM)

mod api;
mod app;
mod components;
mod config;
mod cropper;
mod debounce;
mod dom;
mod notifier;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    app::start();
}
