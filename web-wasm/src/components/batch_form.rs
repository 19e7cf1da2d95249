//! Batch entry from measurement templates

use axe_catalog_common::batch::field_name;
use axe_catalog_common::timing::RELOAD_DELAY_MS;
use axe_catalog_common::submit::ADD_FAILED;
use axe_catalog_common::{BatchField, BatchForm, BatchRow, SubmitOutcome};
use gloo::console;
use leptos::prelude::*;
use web_sys::SubmitEvent;

use crate::api::measurements;
use crate::config::PageContext;
use crate::dom;
use crate::notifier::Notifier;

pub const BATCH_CONTAINER_ID: &str = "batchMeasurementFormContainer";

#[derive(Clone, Copy)]
pub struct BatchEditor {
    form: RwSignal<BatchForm>,
    visible: RwSignal<bool>,
    submitting: RwSignal<bool>,
    page: StoredValue<PageContext>,
    notifier: Notifier,
}

impl BatchEditor {
    pub fn new(page: StoredValue<PageContext>, notifier: Notifier) -> Self {
        Self {
            form: RwSignal::new(BatchForm::default()),
            visible: RwSignal::new(false),
            submitting: RwSignal::new(false),
            page,
            notifier,
        }
    }

    pub fn template_names(&self) -> Vec<String> {
        self.page
            .with_value(|p| p.catalog.templates.iter().map(|t| t.name.clone()).collect())
    }

    /// Rebuild the rows from a template and reveal the form
    pub fn load_template(&self, name: &str) {
        let form = self.form;
        let loaded = self
            .page
            .with_value(|p| form.try_update(|f| f.load_template(&p.catalog, name)));
        match loaded {
            Some(Ok(rows)) => {
                console::debug!(format!("template {} loaded with {} rows", name, rows));
                self.visible.set(true);
                dom::scroll_into_view_later(BATCH_CONTAINER_ID);
            }
            Some(Err(e)) => self.notifier.error(e.user_message(ADD_FAILED)),
            None => {}
        }
    }

    /// Remove the row at `index`; later rows are renumbered
    pub fn remove_row(&self, index: usize) {
        self.form.update(|f| {
            f.remove_row(index);
        });
    }

    pub fn set_value(&self, key: u64, value: String) {
        self.form.update(|f| f.set_value(key, &value));
    }

    pub fn set_unit(&self, key: u64, value: String) {
        self.form.update(|f| f.set_unit(key, &value));
    }

    pub fn hide(&self) {
        self.visible.set(false);
    }

    pub fn submit(&self, ev: SubmitEvent) {
        ev.prevent_default();
        if self.submitting.get_untracked() {
            return;
        }
        let fields = self.form.with_untracked(|f| f.form_fields());
        if fields.is_empty() {
            self.notifier.error("Välj en mall först");
            return;
        }

        let Self { submitting, page, notifier, .. } = *self;
        let (action, csrf_token) = page.with_value(|p| (p.batch_action.clone(), p.csrf_token.clone()));
        submitting.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let reply = measurements::submit_measurements(&action, &csrf_token, &fields).await;
            let outcome = SubmitOutcome::from_reply(reply, "Mått tillagda");
            if outcome.re_enable {
                console::error!(format!("batch submit failed: {}", outcome.notification.message));
                submitting.set(false);
            }
            notifier.show(outcome.notification);
            if outcome.reload {
                dom::reload_after(RELOAD_DELAY_MS);
            }
        });
    }
}

#[component]
pub fn TemplateButtons(editor: BatchEditor) -> impl IntoView {
    let buttons = editor
        .template_names()
        .into_iter()
        .map(|name| {
            let template = name.clone();
            let data_template = name.clone();
            view! {
                <button
                    type="button"
                    class="btn btn-outline-secondary btn-sm me-2 mb-2 template-btn"
                    data-template=data_template
                    on:click=move |_| editor.load_template(&template)
                >
                    <i class="fas fa-list me-1"></i>
                    {name}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="measurement-templates mb-3">
            <h6>"Lägg till från mall"</h6>
            {buttons}
        </div>
    }
}

#[component]
pub fn BatchFormView(editor: BatchEditor) -> impl IntoView {
    let form = editor.form;
    let submitting = editor.submitting;
    let title = move || form.with(|f| f.template().map(|t| format!("Mall: {}", t)).unwrap_or_default());

    view! {
        <div
            id=BATCH_CONTAINER_ID
            class="card mb-4"
            style:display=move || if editor.visible.get() { "block" } else { "none" }
        >
            <div class="card-body">
                <h6 class="card-title">{title}</h6>
                <form id="batchMeasurementForm" on:submit=move |ev| editor.submit(ev)>
                    <div id="batchMeasurementRows">
                        <For
                            each=move || form.with(|f| f.rows().iter().map(|r| r.key).collect::<Vec<_>>())
                            key=|key| *key
                            children=move |key| view! { <BatchRowView editor=editor key=key /> }
                        />
                    </div>
                    <button type="submit" class="btn btn-primary me-2" disabled=move || submitting.get()>
                        <i class="fas fa-save me-1"></i>
                        "Spara alla"
                    </button>
                    <button type="button" class="btn btn-secondary" on:click=move |_| editor.hide()>
                        "Avbryt"
                    </button>
                </form>
            </div>
        </div>
    }
}

#[component]
fn BatchRowView(editor: BatchEditor, key: u64) -> impl IntoView {
    let form = editor.form;
    let index = move || form.with(|f| f.index_of(key).unwrap_or_default());
    let read = move |pick: fn(&BatchRow) -> String| form.with(|f| f.row(key).map(pick).unwrap_or_default());

    view! {
        <div class="row mb-2 align-items-end batch-row" id=move || format!("batch-row-{}", index())>
            <div class="col-md-4">
                <label class="form-label">"Måttyp"</label>
                <input
                    type="text"
                    class="form-control"
                    name=move || field_name(index(), BatchField::Name)
                    prop:value=move || read(|r| r.name.clone())
                    readonly=true
                />
            </div>
            <div class="col-md-3">
                <label class="form-label">"Värde"</label>
                <input
                    type="number"
                    step="any"
                    class="form-control"
                    name=move || field_name(index(), BatchField::Value)
                    prop:value=move || read(|r| r.value.clone())
                    required=true
                    on:input=move |ev| editor.set_value(key, event_target_value(&ev))
                />
            </div>
            <div class="col-md-3">
                <label class="form-label">"Enhet"</label>
                <input
                    type="text"
                    class="form-control"
                    name=move || field_name(index(), BatchField::Unit)
                    prop:value=move || read(|r| r.unit.clone())
                    on:input=move |ev| editor.set_unit(key, event_target_value(&ev))
                />
            </div>
            <div class="col-md-2">
                <button
                    type="button"
                    class="btn btn-outline-danger remove-batch-row"
                    data-row=move || index().to_string()
                    title="Ta bort rad"
                    on:click=move |_| editor.remove_row(index())
                >
                    <i class="fas fa-trash"></i>
                </button>
            </div>
        </div>
    }
}

