//! Single measurement form

use axe_catalog_common::timing::RELOAD_DELAY_MS;
use axe_catalog_common::submit::ADD_FAILED;
use axe_catalog_common::{MeasurementInput, SubmitOutcome, OTHER};
use gloo::console;
use leptos::prelude::*;
use web_sys::SubmitEvent;

use crate::api::measurements;
use crate::config::PageContext;
use crate::dom;
use crate::notifier::Notifier;

#[derive(Clone, Copy)]
pub struct SingleForm {
    input: RwSignal<MeasurementInput>,
    submitting: RwSignal<bool>,
    page: StoredValue<PageContext>,
    notifier: Notifier,
}

impl SingleForm {
    pub fn new(page: StoredValue<PageContext>, notifier: Notifier) -> Self {
        Self {
            input: RwSignal::new(MeasurementInput::default()),
            submitting: RwSignal::new(false),
            page,
            notifier,
        }
    }

    pub fn select_type(&self, choice: String) {
        let input = self.input;
        self.page
            .with_value(|p| input.update(|i| i.select_type(&choice, &p.catalog)));
    }

    pub fn submit(&self, ev: SubmitEvent) {
        ev.prevent_default();
        if self.submitting.get_untracked() {
            return;
        }
        let draft = match self.input.with_untracked(|i| i.validate()) {
            Ok(draft) => draft,
            Err(e) => {
                self.notifier.error(e.user_message(ADD_FAILED));
                return;
            }
        };

        let Self { submitting, page, notifier, .. } = *self;
        let (action, csrf_token) = page.with_value(|p| (p.single_action.clone(), p.csrf_token.clone()));
        submitting.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let reply = measurements::submit_measurements(&action, &csrf_token, &draft.form_fields()).await;
            let outcome = SubmitOutcome::from_reply(reply, "Mått tillagt");
            if outcome.re_enable {
                console::error!(format!("measurement submit failed: {}", outcome.notification.message));
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
pub fn MeasurementFormView(form: SingleForm) -> impl IntoView {
    let input = form.input;
    let read = move |pick: fn(&MeasurementInput) -> String| input.with(|i| pick(i));
    let type_choice = move || read(|i| i.type_choice.clone());
    let options = form
        .page
        .with_value(|p| p.catalog.selector_options())
        .into_iter()
        .map(|name| {
            let option = name.clone();
            let value = name.clone();
            view! {
                <option value=value selected=move || type_choice() == option>
                    {name}
                </option>
            }
        })
        .collect_view();

    view! {
        <form id="measurementForm" class="card card-body mb-4" on:submit=move |ev| form.submit(ev)>
            <h6>"Lägg till mått"</h6>
            <div class="row g-2 align-items-end">
                <div class="col-md-4">
                    <label class="form-label" for="id_name">"Måttyp"</label>
                    <select
                        id="id_name"
                        name="name"
                        class="form-select"
                        prop:value=type_choice
                        on:change=move |ev| form.select_type(event_target_value(&ev))
                    >
                        <option value="" selected=move || type_choice().is_empty()>"Välj måttyp"</option>
                        {options}
                    </select>
                    <input
                        type="text"
                        id="id_custom_name"
                        name="custom_name"
                        class="form-control mt-1"
                        placeholder="Ange måttyp"
                        style:display=move || if input.with(|i| i.shows_custom_name()) { "block" } else { "none" }
                        prop:value=move || read(|i| i.custom_name.clone())
                        on:input=move |ev| input.update(|i| i.custom_name = event_target_value(&ev))
                    />
                </div>
                <div class="col-md-3">
                    <label class="form-label" for="id_value">"Värde"</label>
                    <input
                        type="number"
                        step="any"
                        id="id_value"
                        name="value"
                        class="form-control"
                        prop:value=move || read(|i| i.value.clone())
                        on:input=move |ev| input.update(|i| i.value = event_target_value(&ev))
                    />
                </div>
                <div class="col-md-3">
                    <label class="form-label" for="id_unit">"Enhet"</label>
                    <input
                        type="text"
                        id="id_unit"
                        name="unit"
                        class="form-control"
                        prop:value=move || read(|i| i.unit.clone())
                        on:input=move |ev| input.update(|i| i.unit = event_target_value(&ev))
                    />
                </div>
                <div class="col-md-2">
                    <button type="submit" class="btn btn-primary w-100" disabled=move || form.submitting.get()>
                        <i class="fas fa-plus me-1"></i>
                        "Lägg till"
                    </button>
                </div>
            </div>
            <small class="text-muted mt-2">{format!("Välj \"{}\" för en egen måttyp", OTHER)}</small>
        </form>
    }
}
