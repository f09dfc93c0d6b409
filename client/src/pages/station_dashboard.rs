//! Station dashboard: searchable, sortable instrument table with inline
//! editing.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/station/:acronym`. Loads station, platforms and instruments in one
//! round, then keeps everything else (search, filters, sort, edits) local
//! until a modal save triggers a re-fetch.

use catalog::Instrument;
use catalog::query::InstrumentSort;
use catalog::taxonomy::Vocabulary;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::Taxonomy;
use crate::components::editable_cell::EditableCell;
use crate::components::modals::{ActiveModal, ModalHost, ModalMode, open_modal};
use crate::components::search_box::SearchBox;
use crate::config::ClientConfig;
use crate::net::HttpApi;
use crate::pages::ensure_session;
use crate::state::auth::{self, AuthState};
use crate::state::inline_edit::{self, CellEditor, EditRejected, EditableField};
use crate::state::modal::ModalSlot;
use crate::state::station::{self, StationDashboardState};
use crate::state::toast::ToastQueue;
use crate::util::format;

#[component]
pub fn StationDashboardPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let api = expect_context::<HttpApi>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let slot = expect_context::<RwSignal<ModalSlot<ActiveModal>>>();

    let params = use_params_map();
    let acronym = Memo::new(move |_| params.read().get("acronym").unwrap_or_default().to_uppercase());
    let state = RwSignal::new(StationDashboardState {
        loading: true,
        ..StationDashboardState::default()
    });
    let draft = RwSignal::new(String::new());
    let can_edit = Signal::derive(move || auth.with(|a| a.can_edit(&acronym.get())));
    let login_url = config.login_url.clone();

    let reload = {
        let api = api.clone();
        Callback::new(move |()| {
            let api = api.clone();
            let code = acronym.get_untracked();
            state.update(|s| s.loading = true);
            leptos::task::spawn_local(async move {
                match station::load(&api, &code).await {
                    Ok(data) => {
                        log::info!("station {code}: {} instrument(s)", data.instruments.len());
                        state.update(|s| s.set_data(data));
                    }
                    Err(e) => state.update(|s| s.set_error(&e)),
                }
            });
        })
    };

    {
        let api = api.clone();
        let login_url = login_url.clone();
        Effect::new(move || {
            let _ = acronym.get();
            let api = api.clone();
            let login_url = login_url.clone();
            leptos::task::spawn_local(async move {
                if ensure_session(&api, auth, &login_url).await {
                    reload.run(());
                }
            });
        });
    }

    let editor = Signal::derive(move || state.with(|s| s.editing.clone()));
    let on_begin = Callback::new(move |editor: CellEditor| {
        draft.set(editor.draft.clone());
        state.update(|s| s.editing = Some(editor));
    });
    let on_draft = Callback::new(move |text: String| draft.set(text));
    let on_cancel = Callback::new(move |()| state.update(|s| s.editing = None));
    let on_commit = {
        let api = api.clone();
        Callback::new(move |()| {
            let Some(outcome) = state.try_update(|s| s.commit_editor(draft.get_untracked())).flatten() else {
                return;
            };
            let pending = match outcome {
                Ok(pending) => pending,
                Err(EditRejected::Unchanged) => return,
                Err(rejected) => {
                    toasts.update(|t| {
                        t.error(rejected.to_string());
                    });
                    return;
                }
            };
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let result = inline_edit::send(&api, &pending).await;
                state.update(|s| toasts.update(|t| inline_edit::settle(&mut s.data.instruments, t, &pending, result)));
            });
        })
    };

    let on_search = Callback::new(move |text: String| state.update(|s| s.query = text));
    let search_value = Signal::derive(move || state.with(|s| s.query.clone()));

    let open_view = Callback::new(move |row: Instrument| {
        let platform_id = row.platform_id;
        open_modal(
            slot,
            ActiveModal::Instrument {
                mode: ModalMode::View(row),
                platform_id,
            },
        );
    });
    let open_edit = Callback::new(move |row: Instrument| {
        let platform_id = row.platform_id;
        open_modal(
            slot,
            ActiveModal::Instrument {
                mode: ModalMode::Edit(row),
                platform_id,
            },
        );
    });
    let open_maintenance = Callback::new(move |row: Instrument| {
        open_modal(
            slot,
            ActiveModal::Maintenance {
                mode: ModalMode::Create,
                entity_type: "instrument".to_owned(),
                entity_id: row.id,
            },
        );
    });

    let rows = Memo::new(move |_| {
        state.with(|s| {
            s.visible_rows()
                .into_iter()
                .map(|i| (i.clone(), s.platform_name(i.platform_id)))
                .collect::<Vec<_>>()
        })
    });

    let sort_header = move |label: &'static str, field: InstrumentSort| {
        view! {
            <th aria-sort=move || {
                state.with(|s| match (s.sort == field, s.direction) {
                    (false, _) => "none",
                    (true, catalog::query::SortDirection::Ascending) => "ascending",
                    (true, catalog::query::SortDirection::Descending) => "descending",
                })
            }>
                <button type="button" class="th-sort" on:click=move |_| state.update(|s| s.toggle_sort(field))>
                    {label}
                    " "
                    <span class="th-sort__arrow">{move || state.with(|s| s.sort_indicator(field))}</span>
                </button>
            </th>
        }
    };

    let filter_select = move |label: &'static str, vocab: Vocabulary, type_column: bool| {
        let options = move || {
            let taxonomy = taxonomy.get();
            state.with(|s| if type_column { s.distinct_types() } else { s.distinct_statuses() })
                .into_iter()
                .map(|raw| {
                    let label = taxonomy.provider().resolve(vocab, Some(&raw)).label;
                    view! { <option value=raw.clone()>{label}</option> }
                })
                .collect_view()
        };
        view! {
            <label class="filter">
                <span class="filter__label">{label}</span>
                <select on:change=move |ev| {
                    let value = Some(event_target_value(&ev)).filter(|v| !v.is_empty());
                    state.update(|s| {
                        if type_column {
                            s.type_filter = value;
                        } else {
                            s.status_filter = value;
                        }
                    });
                }>
                    <option value="">"All"</option>
                    {options}
                </select>
            </label>
        }
    };

    let row_view = move |(row, platform): (Instrument, String)| {
        let taxonomy = taxonomy.get_untracked();
        let kind = taxonomy
            .provider()
            .resolve(Vocabulary::InstrumentType, row.instrument_type.as_deref())
            .label;
        let editable = can_edit.get_untracked();
        let view_row = row.clone();
        let edit_row = row.clone();
        let maintenance_row = row.clone();
        view! {
            <tr class="instrument-row" on:click=move |_| open_view.run(view_row.clone())>
                <EditableCell
                    row=row.clone()
                    field=EditableField::DisplayName
                    editor
                    can_edit=editable
                    on_begin
                    on_draft
                    on_commit
                    on_cancel
                />
                <td>{kind}</td>
                <td>{platform}</td>
                <EditableCell
                    row=row.clone()
                    field=EditableField::Status
                    editor
                    can_edit=editable
                    on_begin
                    on_draft
                    on_commit
                    on_cancel
                />
                <EditableCell
                    row=row.clone()
                    field=EditableField::MeasurementStatus
                    editor
                    can_edit=editable
                    on_begin
                    on_draft
                    on_commit
                    on_cancel
                />
                <td>{format::date(row.deployment_date.as_deref())}</td>
                <td class="row-actions" on:click=|ev| ev.stop_propagation()>
                    <Show when=move || editable>
                        {
                            let edit_row = edit_row.clone();
                            let maintenance_row = maintenance_row.clone();
                            view! {
                                <button
                                    type="button"
                                    class="btn btn--icon"
                                    title="Edit instrument"
                                    on:click=move |_| open_edit.run(edit_row.clone())
                                >
                                    <i class="fas fa-pen"></i>
                                </button>
                                <button
                                    type="button"
                                    class="btn btn--icon"
                                    title="Log maintenance"
                                    on:click=move |_| open_maintenance.run(maintenance_row.clone())
                                >
                                    <i class="fas fa-wrench"></i>
                                </button>
                            }
                        }
                    </Show>
                </td>
            </tr>
        }
    };

    let station_title = move || {
        state.with(|s| {
            let name = s.data.station.display_name.trim();
            if name.is_empty() { acronym.get() } else { name.to_owned() }
        })
    };
    let on_logout = move |_| auth::logout(&login_url);

    view! {
        <div class="page page--station">
            <header class="page-header">
                <div>
                    <h1>{station_title}</h1>
                    <p class="page-header__meta">
                        {move || acronym.get()}
                        {move || {
                            state.with(|s| {
                                format::coordinates(s.data.station.latitude, s.data.station.longitude)
                                    .map(|c| format!(" · {c}"))
                            })
                        }}
                    </p>
                </div>
                <nav class="page-header__actions">
                    <a class="btn" href=move || format!("/sites/{}", acronym.get())>
                        <i class="fas fa-map"></i>
                        " Map view"
                    </a>
                    <button type="button" class="btn btn--ghost" on:click=on_logout>
                        "Log out"
                    </button>
                </nav>
            </header>

            <div class="toolbar">
                <SearchBox
                    value=search_value
                    delay_ms=config.search_debounce_ms
                    on_search
                    placeholder="Search instruments…"
                />
                {filter_select("Type", Vocabulary::InstrumentType, true)}
                {filter_select("Status", Vocabulary::InstrumentStatus, false)}
                <span class="toolbar__count">
                    {move || {
                        let shown = rows.with(Vec::len);
                        let total = state.with(|s| s.data.instruments.len());
                        format!("{shown} of {total} instruments")
                    }}
                </span>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <Show when=move || state.with(|s| s.loading)>
                <div class="loading">"Loading instruments…"</div>
            </Show>

            <table class="data-table">
                <thead>
                    <tr>
                        {sort_header("Name", InstrumentSort::Name)}
                        {sort_header("Type", InstrumentSort::Type)}
                        {sort_header("Platform", InstrumentSort::Platform)}
                        {sort_header("Status", InstrumentSort::Status)}
                        {sort_header("Measurement", InstrumentSort::MeasurementStatus)}
                        {sort_header("Deployed", InstrumentSort::Deployed)}
                        <th class="row-actions"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = rows.get();
                        if rows.is_empty() && !state.with(|s| s.loading) {
                            view! {
                                <tr>
                                    <td colspan="7" class="empty">"No instruments match."</td>
                                </tr>
                            }
                            .into_any()
                        } else {
                            rows.into_iter().map(row_view).collect_view().into_any()
                        }
                    }}
                </tbody>
            </table>

            <ModalHost on_saved=Callback::new(move |_| reload.run(())) can_edit/>
        </div>
    }
}
