//! Search input that reports its value after typing pauses.

use leptos::prelude::*;

use crate::util::debounce::{DebounceGate, debounce};

#[component]
pub fn SearchBox(
    #[prop(into)] value: Signal<String>,
    delay_ms: u32,
    on_search: Callback<String>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    let gate = StoredValue::new(DebounceGate::new());
    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        gate.with_value(|g| debounce(g, delay_ms, move || on_search.run(text)));
    };
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            gate.with_value(|g| {
                g.arm();
            });
            on_search.run(String::new());
        }
    };

    view! {
        <div class="search-box">
            <i class="fas fa-search search-box__icon"></i>
            <input
                type="search"
                class="search-box__input"
                aria-label="Search"
                placeholder=placeholder.unwrap_or("Search…")
                prop:value=move || value.get()
                on:input=on_input
                on:keydown=on_keydown
            />
        </div>
    }
}
