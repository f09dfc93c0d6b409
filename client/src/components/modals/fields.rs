//! Labeled inputs with inline validation messages, plus read-only rows for
//! view mode.

#[cfg(test)]
#[path = "fields_test.rs"]
mod fields_test;

use catalog::taxonomy::Term;
use catalog::validate::ValidationErrors;
use leptos::prelude::*;

/// Message under a field, if validation flagged it.
#[component]
pub fn FieldError(errors: RwSignal<ValidationErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| e.get(field).map(str::to_owned)).map(|msg| {
            view! { <p class="field__error" role="alert">{msg}</p> }
        })
    }
}

/// Single-line input bound to one form field.
#[component]
pub fn TextField(
    label: &'static str,
    field: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    errors: RwSignal<ValidationErrors>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] required: bool,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    let id = format!("field-{field}");
    view! {
        <div class="field" class:field--invalid=move || errors.with(|e| e.get(field).is_some())>
            <label for=id.clone()>
                {label}
                {required.then_some(view! { <span class="field__required">" *"</span> })}
            </label>
            <input
                id=id
                name=field
                type=input_type.unwrap_or("text")
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <FieldError errors field/>
        </div>
    }
}

/// Multi-line input.
#[component]
pub fn TextAreaField(
    label: &'static str,
    field: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    errors: RwSignal<ValidationErrors>,
    #[prop(optional)] hint: Option<&'static str>,
) -> impl IntoView {
    let id = format!("field-{field}");
    view! {
        <div class="field" class:field--invalid=move || errors.with(|e| e.get(field).is_some())>
            <label for=id.clone()>{label}</label>
            <textarea
                id=id
                name=field
                rows="4"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
            {hint.map(|h| view! { <p class="field__hint">{h}</p> })}
            <FieldError errors field/>
        </div>
    }
}

/// Select over taxonomy terms, with a blank "not set" entry.
///
/// A current value missing from `options` is kept as an extra entry so
/// editing an unusual record never silently changes it.
#[component]
pub fn SelectField(
    label: &'static str,
    field: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] options: Signal<Vec<Term>>,
    on_change: Callback<String>,
    errors: RwSignal<ValidationErrors>,
) -> impl IntoView {
    let id = format!("field-{field}");
    let entries = move || select_entries(&options.get(), &value.get());
    let selected_value = move || selected_key(&options.get(), &value.get());
    view! {
        <div class="field" class:field--invalid=move || errors.with(|e| e.get(field).is_some())>
            <label for=id.clone()>{label}</label>
            <select
                id=id
                name=field
                prop:value=selected_value
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"Not set"</option>
                {move || {
                    entries()
                        .into_iter()
                        .map(|(key, text)| {
                            let selected = key == selected_value();
                            view! { <option value=key selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <FieldError errors field/>
        </div>
    }
}

/// `(value, text)` pairs for a select: every term, then the current value if
/// no term matches it.
#[must_use]
pub fn select_entries(options: &[Term], current: &str) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> =
        options.iter().map(|t| (t.key.clone(), t.label.clone())).collect();
    let current = current.trim();
    if !current.is_empty() && !options.iter().any(|t| t.matches(current)) {
        entries.push((current.to_owned(), current.to_owned()));
    }
    entries
}

/// Option value to show as selected: the key of the term `current` names
/// (via key or alias), else `current` itself.
#[must_use]
pub fn selected_key(options: &[Term], current: &str) -> String {
    options
        .iter()
        .find(|t| t.matches(current))
        .map_or_else(|| current.trim().to_owned(), |t| t.key.clone())
}

/// Label/value row in a view-mode detail list.
#[component]
pub fn DetailRow(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="detail-row">
            <dt>{label}</dt>
            <dd>{value}</dd>
        </div>
    }
}

/// Save/cancel footer for form mode.
#[component]
pub fn FormActions(
    #[prop(into)] saving: Signal<bool>,
    on_cancel: Callback<()>,
    #[prop(into)] submit_label: String,
) -> impl IntoView {
    view! {
        <footer class="dialog__actions">
            <button type="button" class="btn" on:click=move |_| on_cancel.run(())>
                "Cancel"
            </button>
            <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                {move || if saving.get() { "Saving…".to_owned() } else { submit_label.clone() }}
            </button>
        </footer>
    }
}
