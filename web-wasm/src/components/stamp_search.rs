//! Stamp search dropdown
//!
//! Binds to the server-rendered `#stamp-search-input` and filter controls and
//! renders grouped, highlighted results into `#stamp-search-results`.

use axe_catalog_common::timing::{RESULTS_BLUR_HIDE_MS, SEARCH_DEBOUNCE_MS};
use axe_catalog_common::{
    group_results, highlight, status_badge_class, CombineMode, MatchMode, RequestSequencer,
    SearchQuery, StampResult,
};
use gloo::console;
use gloo::events::EventListener;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, Node};

use crate::api::stamps;
use crate::debounce::Debounced;
use crate::dom;

pub const SEARCH_INPUT_ID: &str = "stamp-search-input";
pub const SEARCH_RESULTS_ID: &str = "stamp-search-results";
/// Present only on the record-creation page, where results are selectable
pub const SELECT_FORM_SELECTOR: &str = "form[action*=\"stampel/lagg-till\"]";
pub const STAMP_SELECT_SELECTOR: &str = "select[name=\"stamp\"]";
const FILTER_SELECTOR: &str = "#manufacturer-filter, #stamp-type-filter, \
    input[name=\"search_type\"], input[name=\"search_logic\"], input[name=\"symbols\"]";
const SYMBOL_SELECTOR: &str =
    "input[name=\"symbols\"]:not([type=\"checkbox\"]), input[name=\"symbols\"]:checked";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    Idle,
    Loading,
    Empty,
    Failed,
    Results {
        query: SearchQuery,
        results: Vec<StampResult>,
    },
}

#[derive(Clone, Copy)]
pub struct StampSearch {
    view: RwSignal<SearchView>,
    visible: RwSignal<bool>,
    debounce: Debounced,
    blur_hide: Debounced,
    sequencer: StoredValue<RequestSequencer>,
    selectable: bool,
}

impl StampSearch {
    pub fn new(selectable: bool) -> Self {
        Self {
            view: RwSignal::new(SearchView::Idle),
            visible: RwSignal::new(false),
            debounce: Debounced::new(SEARCH_DEBOUNCE_MS),
            blur_hide: Debounced::new(RESULTS_BLUR_HIDE_MS),
            sequencer: StoredValue::new(RequestSequencer::default()),
            selectable,
        }
    }

    pub fn schedule(&self) {
        let search = *self;
        self.debounce.trigger(move || search.run());
    }

    /// Search with the current control state; latest response wins
    pub fn run(&self) {
        let query = read_query();
        if query.is_empty() {
            self.sequencer.update_value(|s| s.invalidate());
            self.view.set(SearchView::Idle);
            self.visible.set(false);
            return;
        }

        let Some(ticket) = self.sequencer.try_update_value(|s| s.issue()) else {
            return;
        };
        self.view.set(SearchView::Loading);
        self.visible.set(true);

        let Self { view, visible, sequencer, .. } = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = stamps::search_stamps(&query).await;
            if !sequencer.try_with_value(|s| s.is_latest(ticket)).unwrap_or(false) {
                return;
            }
            let next = match outcome {
                Ok(results) if results.is_empty() => SearchView::Empty,
                Ok(results) => SearchView::Results { query, results },
                Err(e) => {
                    console::error!(format!("stamp search failed: {}", e));
                    SearchView::Failed
                }
            };
            view.set(next);
            visible.set(true);
        });
    }

    pub fn on_focus(&self) {
        self.blur_hide.cancel();
        if self.view.with_untracked(|v| *v != SearchView::Idle) {
            self.visible.set(true);
        }
    }

    pub fn on_blur(&self) {
        let visible = self.visible;
        self.blur_hide.trigger(move || visible.set(false));
    }

    pub fn hide(&self) {
        self.blur_hide.cancel();
        self.visible.set(false);
    }

    /// Put the chosen stamp into the form's select
    pub fn select(&self, stamp_id: u32) {
        match dom::query::<HtmlSelectElement>(STAMP_SELECT_SELECTOR) {
            Some(select) => dom::select_option(&select, &stamp_id.to_string()),
            None => console::warn!("stamp select not found"),
        }
        self.hide();
    }
}

fn read_query() -> SearchQuery {
    SearchQuery {
        text: dom::by_id::<HtmlInputElement>(SEARCH_INPUT_ID)
            .map(|input| input.value())
            .unwrap_or_default(),
        manufacturer: dom::control_value("#manufacturer-filter"),
        stamp_type: dom::control_value("#stamp-type-filter"),
        match_mode: MatchMode::parse(&dom::checked_value("search_type").unwrap_or_default()),
        combine_mode: CombineMode::parse(&dom::checked_value("search_logic").unwrap_or_default()),
        symbol_ids: dom::input_values(SYMBOL_SELECTOR),
    }
}

/// Wire the search to the page. Returns false when the page has no search.
pub fn mount() -> bool {
    let Some(input) = dom::by_id::<HtmlInputElement>(SEARCH_INPUT_ID) else {
        console::debug!("no stamp search on this page");
        return false;
    };
    let Some(host) = dom::by_id::<HtmlElement>(SEARCH_RESULTS_ID) else {
        console::warn!(format!("#{} missing, stamp search disabled", SEARCH_RESULTS_ID));
        return false;
    };

    let selectable = dom::query::<Element>(SELECT_FORM_SELECTOR).is_some();
    let search = StampSearch::new(selectable);

    EventListener::new(&input, "input", move |_| search.schedule()).forget();
    EventListener::new(&input, "focus", move |_| search.on_focus()).forget();
    EventListener::new(&input, "blur", move |_| search.on_blur()).forget();

    let document = gloo::utils::document();
    EventListener::new(&document, "change", move |ev| {
        let is_filter = ev
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| el.matches(FILTER_SELECTOR).unwrap_or(false));
        if is_filter {
            search.schedule();
        }
    })
    .forget();

    let (input_node, host_node) = (input.clone(), host.clone());
    EventListener::new(&document, "click", move |ev| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return;
        };
        if !input_node.contains(Some(&target)) && !host_node.contains(Some(&target)) {
            search.hide();
        }
    })
    .forget();

    let visible = search.visible;
    let results_host = host.clone();
    Effect::new(move |_| dom::set_display(&results_host, visible.get()));

    leptos::mount::mount_to(host, move || view! { <SearchResults search=search /> }).forget();
    console::debug!(format!("stamp search mounted (selectable: {})", selectable));
    true
}

#[component]
pub fn SearchResults(search: StampSearch) -> impl IntoView {
    let state = search.view;
    move || {
        state.with(|current| match current {
            SearchView::Idle => ().into_any(),
            SearchView::Loading => view! {
                <div class="dropdown-item text-muted">
                    <i class="fas fa-spinner fa-spin me-2"></i>
                    "Söker..."
                </div>
            }
            .into_any(),
            SearchView::Empty => view! {
                <div class="dropdown-item text-muted">"Inga resultat hittades"</div>
            }
            .into_any(),
            SearchView::Failed => view! {
                <div class="dropdown-item text-danger">"Ett fel uppstod vid sökning"</div>
            }
            .into_any(),
            SearchView::Results { query, results } => render_results(search, query, results).into_any(),
        })
    }
}

fn render_results(search: StampSearch, query: &SearchQuery, results: &[StampResult]) -> impl IntoView {
    let summary = query.summary(results.len());
    let text = query.text().to_string();
    let groups = group_results(results, query)
        .into_iter()
        .map(|group| {
            let header = format!("{} ({})", group.bucket.label(), group.items.len());
            let icon = format!("{} me-2", group.bucket.icon());
            let items = group
                .items
                .into_iter()
                .map(|stamp| result_item(search, stamp, &text))
                .collect_view();
            view! {
                <h6 class="dropdown-header">
                    <i class=icon></i>
                    {header}
                </h6>
                {items}
            }
        })
        .collect_view();

    view! {
        <div class="dropdown-header text-muted small">
            <i class="fas fa-info-circle me-2"></i>
            {summary}
        </div>
        {groups}
    }
}

fn result_item(search: StampSearch, stamp: &StampResult, text: &str) -> AnyView {
    let body = result_body(stamp, text);
    if search.selectable {
        let id = stamp.id;
        view! {
            <div class="dropdown-item stamp-result" style="cursor: pointer;" on:click=move |_| search.select(id)>
                {body}
            </div>
        }
        .into_any()
    } else {
        let href = stamp.url.clone().unwrap_or_else(|| "#".to_string());
        view! { <a class="dropdown-item stamp-result" href=href>{body}</a> }.into_any()
    }
}

fn result_body(stamp: &StampResult, text: &str) -> impl IntoView {
    let name = highlight(&stamp.name, text);
    let origin = format!("{} • {}", stamp.manufacturer, stamp.stamp_type);
    let description = stamp
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| highlight(d, text));
    let transcription = stamp
        .transcription
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| highlight(t, text));
    let symbols = (!stamp.symbols.is_empty()).then(|| stamp.symbols.join(", "));
    let badge = format!("badge bg-{} ms-2", status_badge_class(&stamp.status));
    let status = stamp.status.clone();

    view! {
        <div class="d-flex justify-content-between align-items-start">
            <div class="flex-grow-1">
                <strong inner_html=name></strong>
                <br />
                <small class="text-muted">{origin}</small>
                {description.map(|d| view! {
                    <br />
                    <small class="text-muted" inner_html=d></small>
                })}
                {transcription.map(|t| view! {
                    <br />
                    <small class="text-info">
                        <i class="fas fa-font me-1"></i>
                        <span inner_html=t></span>
                    </small>
                })}
                {symbols.map(|s| view! {
                    <br />
                    <small class="text-success">
                        <i class="fas fa-icons me-1"></i>
                        {s}
                    </small>
                })}
            </div>
            <span class=badge>{status}</span>
        </div>
    }
}
