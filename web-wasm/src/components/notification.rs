//! Notification toast

use leptos::prelude::*;

use crate::notifier::Notifier;

#[component]
pub fn NotificationToast(notifier: Notifier) -> impl IntoView {
    move || {
        notifier.current().map(|n| {
            let class = n.css_class();
            view! {
                <div
                    id="notification"
                    class=class
                    role="alert"
                    style="position: fixed; top: 1rem; right: 1rem; z-index: 1080; min-width: 250px;"
                    on:click=move |_| notifier.dismiss()
                >
                    <span id="notification-message">{n.message.clone()}</span>
                </div>
            }
        })
    }
}
