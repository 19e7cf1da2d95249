//! Timer-backed debouncing on top of the shared generation counter

use axe_catalog_common::Debouncer;
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct Debounced {
    state: StoredValue<Debouncer>,
    delay_ms: u32,
}

impl Debounced {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            state: StoredValue::new(Debouncer::default()),
            delay_ms,
        }
    }

    /// Run `f` after the quiet period unless triggered or cancelled again
    pub fn trigger(&self, f: impl FnOnce() + 'static) {
        let state = self.state;
        let Some(generation) = state.try_update_value(|d| d.arm()) else {
            return;
        };
        let delay = self.delay_ms;
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if state.try_with_value(|d| d.should_fire(generation)).unwrap_or(false) {
                f();
            }
        });
    }

    pub fn cancel(&self) {
        self.state.update_value(|d| d.cancel());
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_burst_runs_once() {
        let debounced = Debounced::new(50);
        let runs = Rc::new(Cell::new(0));
        for _ in 0..5 {
            let runs = runs.clone();
            debounced.trigger(move || runs.set(runs.get() + 1));
        }
        TimeoutFuture::new(120).await;
        assert_eq!(runs.get(), 1);
    }

    #[wasm_bindgen_test]
    async fn test_cancel() {
        let debounced = Debounced::new(50);
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        debounced.trigger(move || counter.set(1));
        debounced.cancel();
        TimeoutFuture::new(120).await;
        assert_eq!(runs.get(), 0);
    }
}
