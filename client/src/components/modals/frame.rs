//! Dialog chrome shared by every modal.

use leptos::prelude::*;

/// Backdrop, dialog box, title bar and close button.
///
/// Escape and backdrop clicks close; Tab and Shift+Tab stay inside the
/// dialog. Focus moves to the first focusable element on mount.
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "csr")]
    Effect::new(move || {
        if let Some(dialog) = dialog_ref.get() {
            if let Some(first) = crate::util::focus::focusable_within(&dialog).first() {
                let _ = first.focus();
            }
        }
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Escape" => {
            ev.prevent_default();
            on_close.run(());
        }
        "Tab" => {
            #[cfg(feature = "csr")]
            {
                if let Some(dialog) = dialog_ref.get_untracked() {
                    if crate::util::focus::cycle_focus(&dialog, ev.shift_key()) {
                        ev.prevent_default();
                    }
                }
            }
        }
        _ => {}
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog"
                class:dialog--wide=wide
                role="dialog"
                aria-modal="true"
                aria-labelledby="dialog-title"
                tabindex="-1"
                node_ref=dialog_ref
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
            >
                <header class="dialog__header">
                    <h2 id="dialog-title">{move || title.get()}</h2>
                    <button
                        type="button"
                        class="dialog__close"
                        aria-label="Close"
                        title="Close"
                        on:click=move |_| on_close.run(())
                    >
                        "✕"
                    </button>
                </header>
                {children()}
            </div>
        </div>
    }
}
