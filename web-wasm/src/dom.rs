//! Helpers over the server-rendered document

use gloo::console;
use gloo::timers::future::TimeoutFuture;
use gloo::utils::{document, window};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub const CSRF_SELECTOR: &str = "[name=csrfmiddlewaretoken]";

/// First element matching `selector`, cast to `T`
pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// All elements matching `selector` that cast to `T`
pub fn query_all<T: JsCast>(selector: &str) -> Vec<T> {
    let Ok(list) = document().query_selector_all(selector) else {
        console::warn!(format!("invalid selector: {}", selector));
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn csrf_token() -> Option<String> {
    let el: Element = query(CSRF_SELECTOR)?;
    let token = match el.dyn_ref::<HtmlInputElement>() {
        Some(input) => input.value(),
        None => el.get_attribute("value").unwrap_or_default(),
    };
    (!token.is_empty()).then_some(token)
}

/// Current value of a filter control (select or input); empty when absent
pub fn control_value(selector: &str) -> String {
    let Some(el) = query::<Element>(selector) else {
        return String::new();
    };
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        el.get_attribute("value").unwrap_or_default()
    }
}

/// Value of the checked radio in group `name`
pub fn checked_value(name: &str) -> Option<String> {
    query::<HtmlInputElement>(&format!("input[name=\"{}\"]:checked", name)).map(|input| input.value())
}

/// Non-empty values of every input matching `selector`
pub fn input_values(selector: &str) -> Vec<String> {
    query_all::<HtmlInputElement>(selector)
        .into_iter()
        .map(|input| input.value())
        .filter(|v| !v.trim().is_empty())
        .collect()
}

pub fn set_display(el: &HtmlElement, shown: bool) {
    let value = if shown { "block" } else { "none" };
    if let Err(e) = el.style().set_property("display", value) {
        console::error!(format!("style update failed: {:?}", e));
    }
}

/// Set a select's value and let listeners know
pub fn select_option(select: &HtmlSelectElement, value: &str) {
    select.set_value(value);
    match Event::new("change") {
        Ok(event) => {
            if let Err(e) = select.dispatch_event(&event) {
                console::error!(format!("change dispatch failed: {:?}", e));
            }
        }
        Err(e) => console::error!(format!("change event: {:?}", e)),
    }
}

/// Scroll an element into view once pending renders have flushed
pub fn scroll_into_view_later(id: &'static str) {
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(0).await;
        if let Some(el) = by_id::<Element>(id) {
            el.scroll_into_view();
        }
    });
}

pub fn reload_after(millis: u32) {
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(millis).await;
        if let Err(e) = window().location().reload() {
            console::error!(format!("reload failed: {:?}", e));
        }
    });
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn append(html: &str) -> HtmlElement {
        let host: HtmlElement = document()
            .create_element("div")
            .unwrap()
            .dyn_into()
            .unwrap();
        host.set_inner_html(html);
        document().body().unwrap().append_child(&host).unwrap();
        host
    }

    #[wasm_bindgen_test]
    fn test_csrf_token_from_hidden_input() {
        let host = append(r#"<input type="hidden" name="csrfmiddlewaretoken" value="tok123">"#);
        assert_eq!(csrf_token().as_deref(), Some("tok123"));
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_checked_value_and_inputs() {
        let host = append(
            r#"<input type="radio" name="dom_test_mode" value="partial">
               <input type="radio" name="dom_test_mode" value="exact" checked>
               <input type="hidden" name="dom_test_sym" value="3">
               <input type="hidden" name="dom_test_sym" value="">
               <input type="hidden" name="dom_test_sym" value="9">"#,
        );
        assert_eq!(checked_value("dom_test_mode").as_deref(), Some("exact"));
        assert_eq!(input_values("input[name=\"dom_test_sym\"]"), vec!["3", "9"]);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_control_value_missing_is_empty() {
        assert_eq!(control_value("#no-such-control"), "");
    }

    #[wasm_bindgen_test]
    fn test_set_display() {
        let host = append("");
        set_display(&host, false);
        assert_eq!(host.style().get_property_value("display").unwrap(), "none");
        set_display(&host, true);
        assert_eq!(host.style().get_property_value("display").unwrap(), "block");
        host.remove();
    }
}
