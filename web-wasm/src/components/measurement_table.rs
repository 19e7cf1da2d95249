//! Measurement table with inline row editing
//!
//! The table model lives in `MeasurementTable`; rows re-render from it. Each
//! row moves Viewing -> Editing -> (Saving) -> Viewing.

use axe_catalog_common::{MeasurementInput, MeasurementRecord, MeasurementTable, RowMode};
use gloo::console;
use leptos::prelude::*;

use crate::api::measurements::{self, DELETE_FAILED, UPDATE_FAILED};
use crate::config::PageContext;
use crate::notifier::Notifier;

pub const DELETE_CONFIRM: &str = "Är du säker på att du vill ta bort detta mått?";

/// Handle shared by the table and its rows
#[derive(Clone, Copy)]
pub struct MeasurementEditor {
    table: RwSignal<MeasurementTable>,
    page: StoredValue<PageContext>,
    notifier: Notifier,
}

impl MeasurementEditor {
    pub fn new(records: Vec<MeasurementRecord>, page: StoredValue<PageContext>, notifier: Notifier) -> Self {
        Self {
            table: RwSignal::new(MeasurementTable::new(records)),
            page,
            notifier,
        }
    }

    pub fn table(&self) -> RwSignal<MeasurementTable> {
        self.table
    }

    pub fn selector_options(&self) -> Vec<String> {
        self.page.with_value(|p| p.catalog.selector_options())
    }

    pub fn start_edit(&self, id: u32) {
        let table = self.table;
        self.page.with_value(|p| {
            table.update(|t| {
                t.start_edit(id, &p.catalog);
            })
        });
    }

    pub fn select_type(&self, id: u32, choice: String) {
        let table = self.table;
        self.page.with_value(|p| {
            table.update(|t| {
                t.update_input(id, |input| input.select_type(&choice, &p.catalog));
            })
        });
    }

    fn edit_input(&self, id: u32, f: impl FnOnce(&mut MeasurementInput)) {
        self.table.update(|t| {
            t.update_input(id, f);
        });
    }

    pub fn set_custom_name(&self, id: u32, value: String) {
        self.edit_input(id, |input| input.custom_name = value);
    }

    pub fn set_value(&self, id: u32, value: String) {
        self.edit_input(id, |input| input.value = value);
    }

    pub fn set_unit(&self, id: u32, value: String) {
        self.edit_input(id, |input| input.unit = value);
    }

    pub fn cancel_edit(&self, id: u32) {
        self.table.update(|t| {
            t.cancel_edit(id);
        });
    }

    /// Validate and send the row's edit. Ignored while a save is in flight.
    pub fn confirm_edit(&self, id: u32) {
        let draft = match self.table.try_update(|t| t.begin_confirm(id)) {
            Some(Ok(Some(draft))) => draft,
            Some(Ok(None)) | None => return,
            Some(Err(e)) => {
                self.notifier.error(e.user_message(UPDATE_FAILED));
                return;
            }
        };

        let Self { table, page, notifier } = *self;
        let (axe_id, csrf_token) = page.with_value(|p| (p.axe_id, p.csrf_token.clone()));
        wasm_bindgen_futures::spawn_local(async move {
            match measurements::update_measurement(axe_id, &csrf_token, id, &draft).await {
                Ok(()) => {
                    table.update(|t| {
                        t.complete_save(id, draft);
                    });
                    notifier.success("Mått uppdaterat");
                }
                Err(e) => {
                    console::error!(format!("update of measurement {} failed: {}", id, e));
                    table.update(|t| t.fail_save(id));
                    notifier.error(e.user_message(UPDATE_FAILED));
                }
            }
        });
    }

    /// Ask, then delete. The row only goes away on a confirmed success;
    /// clicks while the request is in flight are ignored.
    pub fn confirm_delete(&self, id: u32) {
        if !self.table.with_untracked(|t| t.can_delete(id)) {
            return;
        }
        if !gloo::dialogs::confirm(DELETE_CONFIRM) {
            return;
        }
        if !self.table.try_update(|t| t.begin_delete(id)).unwrap_or(false) {
            return;
        }

        let Self { table, page, notifier } = *self;
        let (axe_id, csrf_token) = page.with_value(|p| (p.axe_id, p.csrf_token.clone()));
        wasm_bindgen_futures::spawn_local(async move {
            match measurements::delete_measurement(axe_id, &csrf_token, id).await {
                Ok(()) => {
                    table.update(|t| {
                        t.remove(id);
                    });
                    notifier.success("Mått borttaget");
                }
                Err(e) => {
                    console::error!(format!("delete of measurement {} failed: {}", id, e));
                    table.update(|t| t.fail_delete(id));
                    notifier.error(e.user_message(DELETE_FAILED));
                }
            }
        });
    }
}

#[component]
pub fn MeasurementTableView(editor: MeasurementEditor) -> impl IntoView {
    let table = editor.table();
    let count = move || table.with(|t| t.len());

    view! {
        <div class="measurement-section mb-4">
            <h5>
                "Mått "
                <span class="badge bg-secondary measurement-count">{count}</span>
            </h5>
            <p
                class="text-muted measurement-empty-state"
                style:display=move || if count() == 0 { "block" } else { "none" }
            >
                "Inga mått registrerade"
            </p>
            <table
                class="table table-sm measurement-list"
                style:display=move || if count() == 0 { "none" } else { "table" }
            >
                <thead>
                    <tr>
                        <th>"Måttyp"</th>
                        <th>"Värde"</th>
                        <th>"Enhet"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || table.with(|t| t.ids())
                        key=|id| *id
                        children=move |id| view! { <MeasurementRowView editor=editor id=id /> }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn MeasurementRowView(editor: MeasurementEditor, id: u32) -> impl IntoView {
    let table = editor.table();
    // memoized so keystrokes in the inputs don't rebuild the row
    let mode = Memo::new(move |_| table.with(|t| t.mode(id)).unwrap_or(RowMode::Viewing));

    view! {
        <tr class="measurement-row" data-measurement-id=id.to_string()>
            <Show
                when=move || mode.get() != RowMode::Viewing
                fallback=move || view! { <DisplayCells editor=editor id=id /> }
            >
                <EditCells editor=editor id=id mode=mode />
            </Show>
        </tr>
    }
}

#[component]
fn DisplayCells(editor: MeasurementEditor, id: u32) -> impl IntoView {
    let table = editor.table();
    let read = move |pick: fn(&MeasurementRecord) -> String| {
        table.with(|t| t.get(id).map(|row| pick(&row.record)).unwrap_or_default())
    };

    let deleting = move || table.with(|t| t.is_deleting(id));

    view! {
        <td class="measurement-name">{move || read(|r| r.name.clone())}</td>
        <td class="measurement-value">{move || read(|r| r.value.clone())}</td>
        <td class="measurement-unit">{move || read(|r| r.unit.clone())}</td>
        <td class="text-end text-nowrap">
            <button
                type="button"
                class="btn btn-sm btn-outline-primary me-1 edit-measurement"
                title="Redigera"
                on:click=move |_| editor.start_edit(id)
            >
                <i class="fas fa-edit"></i>
            </button>
            <button
                type="button"
                class="btn btn-sm btn-outline-danger delete-measurement"
                title="Ta bort"
                disabled=deleting
                on:click=move |_| editor.confirm_delete(id)
            >
                <i class="fas fa-trash"></i>
            </button>
        </td>
    }
}

#[component]
fn EditCells(editor: MeasurementEditor, id: u32, mode: Memo<RowMode>) -> impl IntoView {
    let table = editor.table();
    let read = move |pick: fn(&MeasurementInput) -> String| {
        table.with(|t| t.session(id).map(|s| pick(&s.input)).unwrap_or_default())
    };
    let type_choice = move || read(|i| i.type_choice.clone());
    let shows_custom = move || {
        table.with(|t| t.session(id).is_some_and(|s| s.input.shows_custom_name()))
    };
    let saving = move || mode.get() == RowMode::Saving;

    let options = editor
        .selector_options()
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
        <td>
            <select
                class="form-select form-select-sm"
                prop:value=type_choice
                disabled=saving
                on:change=move |ev| editor.select_type(id, event_target_value(&ev))
            >
                {options}
            </select>
            <input
                type="text"
                class="form-control form-control-sm mt-1"
                placeholder="Ange måttyp"
                style:display=move || if shows_custom() { "block" } else { "none" }
                prop:value=move || read(|i| i.custom_name.clone())
                disabled=saving
                on:input=move |ev| editor.set_custom_name(id, event_target_value(&ev))
            />
        </td>
        <td>
            <input
                type="number"
                step="any"
                class="form-control form-control-sm"
                prop:value=move || read(|i| i.value.clone())
                disabled=saving
                on:input=move |ev| editor.set_value(id, event_target_value(&ev))
            />
        </td>
        <td>
            <input
                type="text"
                class="form-control form-control-sm"
                prop:value=move || read(|i| i.unit.clone())
                disabled=saving
                on:input=move |ev| editor.set_unit(id, event_target_value(&ev))
            />
        </td>
        <td class="text-end text-nowrap">
            <button
                type="button"
                class="btn btn-sm btn-success me-1 confirm-edit"
                title="Spara"
                disabled=saving
                on:click=move |_| editor.confirm_edit(id)
            >
                {move || {
                    if saving() {
                        view! { <i class="fas fa-spinner fa-spin"></i> }.into_any()
                    } else {
                        view! { <i class="fas fa-check"></i> }.into_any()
                    }
                }}
            </button>
            <button
                type="button"
                class="btn btn-sm btn-secondary cancel-edit"
                title="Avbryt"
                disabled=saving
                on:click=move |_| editor.cancel_edit(id)
            >
                <i class="fas fa-times"></i>
            </button>
        </td>
    }
}
