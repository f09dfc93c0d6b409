//! Stack of transient notifications.

use leptos::prelude::*;

use crate::state::toast::ToastQueue;

/// Renders queued toasts; each one dismisses itself after a timeout.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastQueue>>();

    #[cfg(feature = "csr")]
    Effect::new(move |scheduled: Option<Vec<uuid::Uuid>>| {
        let scheduled = scheduled.unwrap_or_default();
        let ids: Vec<uuid::Uuid> = toasts.with(|q| q.toasts.iter().map(|t| t.id).collect());
        for &id in ids.iter().filter(|id| !scheduled.contains(id)) {
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(crate::state::toast::TOAST_TIMEOUT_MS).await;
                toasts.update(|q| q.dismiss(id));
            });
        }
        ids
    });

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For each=move || toasts.get().toasts key=|toast| toast.id let:toast>
                <div class=toast.kind.css_class()>
                    <i class=format!("fas {}", toast.kind.icon())></i>
                    <span class="toast__message">{toast.message.clone()}</span>
                    <button
                        type="button"
                        class="toast__close"
                        aria-label="Dismiss"
                        on:click=move |_| toasts.update(|q| q.dismiss(toast.id))
                    >
                        "✕"
                    </button>
                </div>
            </For>
        </div>
    }
}
