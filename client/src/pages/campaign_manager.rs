//! Campaign manager: server-paginated campaign list with local search, sort
//! and create/edit/delete.
//!
//! Route `/campaigns`, optionally scoped with `?station=ANS`.

use catalog::Campaign;
use catalog::query::CampaignSort;
use catalog::taxonomy::Vocabulary;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::app::Taxonomy;
use crate::components::cards::CampaignCard;
use crate::components::modals::{ActiveModal, ModalHost, ModalMode, confirm, open_modal};
use crate::components::pagination::Pagination;
use crate::components::search_box::SearchBox;
use crate::config::ClientConfig;
use crate::net::HttpApi;
use crate::pages::{ensure_session, report_failure};
use crate::state::auth::{self, AuthState};
use crate::state::campaigns::{self, CampaignManagerState};
use crate::state::modal::ModalSlot;
use crate::state::toast::ToastQueue;

#[component]
pub fn CampaignManagerPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let api = expect_context::<HttpApi>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let slot = expect_context::<RwSignal<ModalSlot<ActiveModal>>>();

    let query = use_query_map();
    let station = Memo::new(move |_| {
        query
            .read()
            .get("station")
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
    });
    let state = RwSignal::new(CampaignManagerState::new(config.page_size, None));
    let can_edit = Signal::derive(move || {
        let station = station.get();
        auth.with(|a| match station {
            Some(code) => a.can_edit(&code),
            None => a.is_admin(),
        })
    });

    let reload = {
        let api = api.clone();
        Callback::new(move |()| {
            let api = api.clone();
            let snapshot = state.get_untracked();
            let sent = snapshot.request();
            state.update(|s| s.loading = true);
            leptos::task::spawn_local(async move {
                match campaigns::load_page(&api, &snapshot).await {
                    Ok(response) => {
                        let rows = response.items().len();
                        if state.try_update(|s| s.apply_if_current(&sent, response)).unwrap_or(false) {
                            log::info!("campaigns page {}: {rows} row(s)", sent.page);
                        } else {
                            log::debug!("campaigns: dropped stale response for page {}", sent.page);
                        }
                    }
                    Err(e) => state.update(|s| s.set_error_if_current(&sent, &e)),
                }
            });
        })
    };

    {
        let api = api.clone();
        let login_url = config.login_url.clone();
        let per_page = config.page_size;
        Effect::new(move || {
            let scope = station.get();
            state.set(CampaignManagerState {
                loading: true,
                ..CampaignManagerState::new(per_page, scope)
            });
            let api = api.clone();
            let login_url = login_url.clone();
            leptos::task::spawn_local(async move {
                if ensure_session(&api, auth, &login_url).await {
                    reload.run(());
                }
            });
        });
    }

    let on_prev = Callback::new(move |()| {
        if state.try_update(CampaignManagerState::prev_page).unwrap_or(false) {
            reload.run(());
        }
    });
    let on_next = Callback::new(move |()| {
        if state.try_update(CampaignManagerState::next_page).unwrap_or(false) {
            reload.run(());
        }
    });

    let on_search = Callback::new(move |text: String| state.update(|s| s.query = text));
    let search_value = Signal::derive(move || state.with(|s| s.query.clone()));

    let on_view = Callback::new(move |c: Campaign| {
        let station_id = c.station_id;
        open_modal(
            slot,
            ActiveModal::Campaign {
                mode: ModalMode::View(c),
                station_id,
            },
        );
    });
    let on_edit = Callback::new(move |c: Campaign| {
        let station_id = c.station_id;
        open_modal(
            slot,
            ActiveModal::Campaign {
                mode: ModalMode::Edit(c),
                station_id,
            },
        );
    });
    let on_delete = {
        let api = api.clone();
        Callback::new(move |c: Campaign| {
            if !confirm(&format!("Delete campaign \"{}\"? This cannot be undone.", c.name)) {
                return;
            }
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match campaigns::delete(&api, &c).await {
                    Ok(message) => {
                        toasts.update(|t| {
                            t.success(message);
                        });
                        reload.run(());
                    }
                    Err(e) => report_failure(&e, "Could not delete campaign", toasts),
                }
            });
        })
    };

    let filter_select = move |label: &'static str, vocab: Vocabulary, type_column: bool| {
        let options = move || {
            taxonomy
                .get()
                .provider()
                .terms(vocab)
                .into_iter()
                .map(|term| view! { <option value=term.key.clone()>{term.label}</option> })
                .collect_view()
        };
        view! {
            <label class="filter">
                <span class="filter__label">{label}</span>
                <select on:change=move |ev| {
                    let value = Some(event_target_value(&ev));
                    state.update(|s| {
                        if type_column {
                            s.set_type_filter(value);
                        } else {
                            s.set_status_filter(value);
                        }
                    });
                    reload.run(());
                }>
                    <option value="">"All"</option>
                    {options}
                </select>
            </label>
        }
    };

    let sort_button = move |label: &'static str, field: CampaignSort| {
        view! {
            <button
                type="button"
                class="chip"
                class:chip--active=move || state.with(|s| s.sort == field)
                on:click=move |_| state.update(|s| s.toggle_sort(field))
            >
                {label}
                {move || {
                    state.with(|s| if s.sort == field { format!(" {}", s.direction.arrow()) } else { String::new() })
                }}
            </button>
        }
    };

    let cards = move || {
        let editable = can_edit.get();
        let rows: Vec<Campaign> = state.with(|s| s.visible().into_iter().cloned().collect());
        if rows.is_empty() && !state.with(|s| s.loading) {
            return view! { <p class="empty">"No campaigns found."</p> }.into_any();
        }
        rows.into_iter()
            .map(|campaign| view! { <CampaignCard campaign can_edit=editable on_view on_edit on_delete/> })
            .collect_view()
            .into_any()
    };

    let new_campaign = move |_| {
        open_modal(
            slot,
            ActiveModal::Campaign {
                mode: ModalMode::Create,
                station_id: None,
            },
        );
    };
    let login_url = config.login_url.clone();
    let on_logout = move |_| auth::logout(&login_url);

    view! {
        <div class="page page--campaigns">
            <header class="page-header">
                <div>
                    <h1>"Campaigns"</h1>
                    <p class="page-header__meta">
                        {move || station.get().map_or_else(|| "All stations".to_owned(), |s| format!("Station {s}"))}
                    </p>
                </div>
                <nav class="page-header__actions">
                    {move || {
                        station
                            .get()
                            .map(|s| {
                                view! {
                                    <a class="btn" href=format!("/sites/{s}")>
                                        <i class="fas fa-map"></i>
                                        " Station"
                                    </a>
                                }
                            })
                    }}
                    <Show when=move || can_edit.get()>
                        <button type="button" class="btn btn--primary" on:click=new_campaign>
                            <i class="fas fa-plus"></i>
                            " New campaign"
                        </button>
                    </Show>
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
                    placeholder="Search campaigns…"
                />
                {filter_select("Type", Vocabulary::CampaignType, true)}
                {filter_select("Status", Vocabulary::CampaignStatus, false)}
                <div class="chip-row" role="group" aria-label="Sort campaigns">
                    {sort_button("Start", CampaignSort::PlannedStart)}
                    {sort_button("Name", CampaignSort::Name)}
                    {sort_button("Status", CampaignSort::Status)}
                    {sort_button("Type", CampaignSort::Type)}
                </div>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <Show when=move || state.with(|s| s.loading)>
                <div class="loading">"Loading campaigns…"</div>
            </Show>

            <div class="card-grid">{cards}</div>

            <Pagination
                label=Signal::derive(move || state.with(CampaignManagerState::page_label))
                has_prev=Signal::derive(move || state.with(CampaignManagerState::has_prev))
                has_next=Signal::derive(move || state.with(CampaignManagerState::has_next))
                on_prev
                on_next
            />

            <ModalHost on_saved=Callback::new(move |_| reload.run(())) can_edit/>
        </div>
    }
}
