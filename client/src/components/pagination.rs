//! Previous/next controls for server-paginated lists.

use leptos::prelude::*;

#[component]
pub fn Pagination(
    #[prop(into)] label: Signal<String>,
    #[prop(into)] has_prev: Signal<bool>,
    #[prop(into)] has_next: Signal<bool>,
    on_prev: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <nav class="pagination" aria-label="Pagination">
            <button
                type="button"
                class="btn btn--small"
                disabled=move || !has_prev.get()
                on:click=move |_| on_prev.run(())
            >
                "‹ Previous"
            </button>
            <span class="pagination__label">{move || label.get()}</span>
            <button
                type="button"
                class="btn btn--small"
                disabled=move || !has_next.get()
                on:click=move |_| on_next.run(())
            >
                "Next ›"
            </button>
        </nav>
    }
}
