//! Table cell that swaps to an input or select while being edited.

#[cfg(test)]
#[path = "editable_cell_test.rs"]
mod editable_cell_test;

use catalog::Instrument;
use leptos::prelude::*;

use crate::app::Taxonomy;
use crate::components::modals::fields::selected_key;
use crate::state::inline_edit::{self, CellEditor, EditableField};

/// Text shown in the cell when not editing.
#[must_use]
pub fn display_value(row: &Instrument, field: EditableField, taxonomy: &Taxonomy) -> String {
    let raw = match field {
        EditableField::DisplayName => return row.display_name.clone(),
        EditableField::Status => row.status.as_deref(),
        EditableField::MeasurementStatus => row.measurement_status.as_deref(),
    };
    match (field.vocabulary(), raw) {
        (Some(vocab), Some(raw)) => taxonomy.provider().resolve(vocab, Some(raw)).label,
        _ => "—".to_owned(),
    }
}

#[component]
pub fn EditableCell(
    row: Instrument,
    field: EditableField,
    #[prop(into)] editor: Signal<Option<CellEditor>>,
    can_edit: bool,
    on_begin: Callback<CellEditor>,
    on_draft: Callback<String>,
    on_commit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let row_id = row.id;
    let active = Memo::new(move |_| {
        editor.with(|e| e.as_ref().is_some_and(|e| e.row_id == row_id && e.field == field))
    });
    let text = {
        let row = row.clone();
        move || display_value(&row, field, &taxonomy.get())
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            on_commit.run(());
        }
        "Escape" => {
            ev.prevent_default();
            on_cancel.run(());
        }
        _ => {}
    };

    let start = move |ev: leptos::ev::MouseEvent| {
        if can_edit && !active.get_untracked() {
            ev.stop_propagation();
            on_begin.run(inline_edit::begin(&row, field));
        }
    };

    let input_ref = NodeRef::<leptos::html::Input>::new();
    let select_ref = NodeRef::<leptos::html::Select>::new();
    #[cfg(feature = "csr")]
    Effect::new(move || {
        if active.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            } else if let Some(select) = select_ref.get() {
                let _ = select.focus();
            }
        }
    });

    let editor_view = move |draft: String| match field.vocabulary() {
        None => view! {
            <input
                class="cell-editor"
                node_ref=input_ref
                aria-label=field.label()
                prop:value=draft
                on:input=move |ev| on_draft.run(event_target_value(&ev))
                on:keydown=on_keydown
                on:blur=move |_| on_commit.run(())
                on:click=|ev| ev.stop_propagation()
            />
        }
        .into_any(),
        Some(vocab) => {
            let terms = taxonomy.get_untracked().provider().terms(vocab);
            let current = selected_key(&terms, &draft);
            view! {
                <select
                    class="cell-editor"
                    node_ref=select_ref
                    aria-label=field.label()
                    on:change=move |ev| {
                        on_draft.run(event_target_value(&ev));
                        on_commit.run(());
                    }
                    on:keydown=on_keydown
                    on:blur=move |_| on_commit.run(())
                    on:click=|ev| ev.stop_propagation()
                >
                    {terms
                        .into_iter()
                        .map(|t| {
                            let selected = t.key == current;
                            view! { <option value=t.key selected=selected>{t.label}</option> }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
    };

    view! {
        <td
            class="cell"
            class:cell--editable=can_edit
            title=move || if can_edit { "Click to edit" } else { "" }
            on:click=start
        >
            {move || {
                if active.get() {
                    editor_view(editor.with_untracked(|e| e.as_ref().map(|e| e.draft.clone()).unwrap_or_default()))
                } else {
                    text().into_any()
                }
            }}
        </td>
    }
}
