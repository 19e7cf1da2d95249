//! Start-up wiring
//!
//! Reads the page configuration once, creates the shared notifier and mounts
//! each component onto its host element. Missing hosts are logged and
//! skipped.

use axe_catalog_common::MeasurementRecord;
use gloo::console;
use leptos::prelude::*;
use web_sys::HtmlElement;

use crate::components::{
    batch_form::{BatchEditor, BatchFormView, TemplateButtons},
    measurement_form::{MeasurementFormView, SingleForm},
    measurement_table::{MeasurementEditor, MeasurementTableView},
    notification::NotificationToast,
    stamp_search,
};
use crate::config::{PageConfig, PageContext, MEASUREMENT_HOST_ID};
use crate::cropper;
use crate::dom;
use crate::notifier::Notifier;

/// Measurement section of an axe page
#[component]
pub fn MeasurementApp(
    page: PageContext,
    records: Vec<MeasurementRecord>,
    notifier: Notifier,
) -> impl IntoView {
    let page = StoredValue::new(page);
    let editor = MeasurementEditor::new(records, page, notifier);
    let batch = BatchEditor::new(page, notifier);
    let single = SingleForm::new(page, notifier);

    view! {
        <MeasurementTableView editor=editor />
        <TemplateButtons editor=batch />
        <BatchFormView editor=batch />
        <MeasurementFormView form=single />
    }
}

pub fn start() {
    let notifier = Notifier::new();
    leptos::mount::mount_to_body(move || view! { <NotificationToast notifier=notifier /> });

    mount_measurements(notifier);
    stamp_search::mount();

    let queued = cropper::crop_stamp_images();
    if queued > 0 {
        console::debug!(format!("cropping {} stamp images", queued));
    }
}

fn mount_measurements(notifier: Notifier) {
    let Some(host) = dom::by_id::<HtmlElement>(MEASUREMENT_HOST_ID) else {
        console::debug!("no measurement host on this page");
        return;
    };
    let csrf_token = dom::csrf_token().unwrap_or_else(|| {
        console::warn!("CSRF token not found, measurement requests will be rejected");
        String::new()
    });

    match PageConfig::from_element(&host, csrf_token) {
        Ok(config) => {
            let (page, records) = config.into_parts();
            console::debug!(format!("measurement app: axe {}, {} records", page.axe_id, records.len()));
            leptos::mount::mount_to(host, move || {
                view! { <MeasurementApp page=page records=records notifier=notifier /> }
            })
            .forget();
        }
        Err(e) => console::error!(format!("measurement app not mounted: {}", e)),
    }
}
