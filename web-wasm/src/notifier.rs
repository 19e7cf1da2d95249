//! Shared status notifier
//!
//! One notification is visible at a time; showing a new one replaces the
//! current one and restarts its dismissal timer.

use axe_catalog_common::notify::DISMISS_AFTER_MS;
use axe_catalog_common::Notification;
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<(u64, Notification)>>,
    next_id: StoredValue<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
        }
    }

    pub fn show(&self, notification: Notification) {
        let id = self
            .next_id
            .try_update_value(|n| {
                *n += 1;
                *n
            })
            .unwrap_or_default();
        self.current.set(Some((id, notification)));

        let current = self.current;
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            // a newer notification owns its own timer
            if current.with_untracked(|c| matches!(c, Some((shown, _)) if *shown == id)) {
                current.set(None);
            }
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Notification::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Notification::error(message));
    }

    /// Currently visible notification (tracked)
    pub fn current(&self) -> Option<Notification> {
        self.current.with(|c| c.as_ref().map(|(_, n)| n.clone()))
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use axe_catalog_common::NotificationKind;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_auto_dismiss() {
        let notifier = Notifier::new();
        notifier.success("Mått borttaget");
        assert_eq!(notifier.current().map(|n| n.kind), Some(NotificationKind::Success));
        TimeoutFuture::new(DISMISS_AFTER_MS + 100).await;
        assert!(notifier.current().is_none());
    }

    #[wasm_bindgen_test]
    async fn test_newer_notification_survives_older_timer() {
        let notifier = Notifier::new();
        notifier.success("först");
        TimeoutFuture::new(DISMISS_AFTER_MS / 2).await;
        notifier.error("sedan");
        TimeoutFuture::new(DISMISS_AFTER_MS / 2 + 200).await;
        assert_eq!(notifier.current().map(|n| n.message), Some("sedan".to_string()));
    }
}
