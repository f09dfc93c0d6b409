//! SITES station page: map, platform grid, instruments, products and
//! maintenance for one station.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/sites/:acronym`. The first load fetches station, platforms,
//! instruments, products and the AOI together; photos follow one instrument
//! at a time. Selecting a platform loads its ROIs for the map overlay.

use catalog::query::ProductSort;
use catalog::taxonomy::Vocabulary;
use catalog::{Instrument, MaintenanceRecord, Platform, Product, Roi};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::Taxonomy;
use crate::components::cards::{InstrumentCard, MaintenanceCard, PlatformCard, ProductCard};
use crate::components::map_view::MapView;
use crate::components::modals::{ActiveModal, ModalHost, ModalMode, confirm, open_modal};
use crate::components::search_box::SearchBox;
use crate::config::ClientConfig;
use crate::forms::EntityKind;
use crate::net::HttpApi;
use crate::pages::{ensure_session, report_failure};
use crate::state::auth::{self, AuthState};
use crate::state::modal::ModalSlot;
use crate::state::sites::{self, SitesDashboardState};
use crate::state::toast::ToastQueue;
use crate::util::format;

const MAP_CONTAINER: &str = "station-map";

#[component]
pub fn SitesStationPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let api = expect_context::<HttpApi>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let slot = expect_context::<RwSignal<ModalSlot<ActiveModal>>>();

    let params = use_params_map();
    let acronym = Memo::new(move |_| params.read().get("acronym").unwrap_or_default().to_uppercase());
    let state = RwSignal::new(SitesDashboardState {
        loading: true,
        ..SitesDashboardState::default()
    });
    let rois = RwSignal::new(Vec::<Roi>::new());
    let can_edit = Signal::derive(move || auth.with(|a| a.can_edit(&acronym.get())));
    let image_base = config.image_base_path.clone();

    let reload = {
        let api = api.clone();
        Callback::new(move |()| {
            let api = api.clone();
            let image_base = image_base.clone();
            let code = acronym.get_untracked();
            state.update(|s| s.loading = true);
            leptos::task::spawn_local(async move {
                match sites::load(&api, &code).await {
                    Ok(data) => {
                        log::info!(
                            "sites {code}: {} platform(s), {} instrument(s), {} product(s)",
                            data.platforms.len(),
                            data.instruments.len(),
                            data.products.len()
                        );
                        let instruments = data.instruments.clone();
                        state.update(|s| s.set_data(data));
                        let photos = sites::load_photos(&api, &image_base, &instruments).await;
                        state.update(|s| s.photos = photos);
                    }
                    Err(e) => state.update(|s| s.set_error(&e)),
                }
            });
        })
    };

    let reload_maintenance = {
        let api = api.clone();
        Callback::new(move |()| {
            let Some((entity_type, entity_id)) = state.with_untracked(|s| s.maintenance_target.clone()) else {
                return;
            };
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match sites::load_maintenance(&api, &entity_type, entity_id).await {
                    Ok(rows) => state.update(|s| {
                        if s.maintenance_target.as_ref() == Some(&(entity_type, entity_id)) {
                            s.maintenance = rows;
                        }
                    }),
                    Err(e) => report_failure(&e, "Could not load maintenance", toasts),
                }
            });
        })
    };

    {
        let api = api.clone();
        let login_url = config.login_url.clone();
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

    // ROIs follow the selected platform.
    let selected_platform = Memo::new(move |_| state.with(|s| s.selected_platform));
    {
        let api = api.clone();
        Effect::new(move || {
            let platform = selected_platform.get();
            let instruments: Vec<Instrument> =
                state.with_untracked(|s| s.selected_instruments().into_iter().cloned().collect());
            if instruments.is_empty() {
                rois.set(Vec::new());
                return;
            }
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let refs: Vec<&Instrument> = instruments.iter().collect();
                let loaded = sites::load_platform_rois(&api, &refs).await;
                if selected_platform.get_untracked() == platform {
                    rois.set(loaded.into_iter().flat_map(|(_, r)| r).collect());
                }
            });
        });
    }

    let on_select = Callback::new(move |id: i64| {
        state.update(|s| {
            s.select_platform(id);
            if s.selected_platform.is_some() {
                s.set_maintenance_target("platform", id);
            }
        });
        reload_maintenance.run(());
    });

    let open_instrument = move |mode: ModalMode<Instrument>, platform_id: i64| {
        open_modal(slot, ActiveModal::Instrument { mode, platform_id });
    };
    let on_view_instrument = Callback::new(move |i: Instrument| {
        let platform_id = i.platform_id;
        open_instrument(ModalMode::View(i), platform_id);
    });
    let on_edit_instrument = Callback::new(move |i: Instrument| {
        let platform_id = i.platform_id;
        open_instrument(ModalMode::Edit(i), platform_id);
    });
    let on_instrument_maintenance = Callback::new(move |i: Instrument| {
        state.update(|s| s.set_maintenance_target("instrument", i.id));
        reload_maintenance.run(());
    });

    let on_view_product = Callback::new(move |p: Product| {
        open_modal(
            slot,
            ActiveModal::Product {
                mode: ModalMode::View(p),
                station: acronym.get_untracked(),
            },
        );
    });
    let on_edit_product = Callback::new(move |p: Product| {
        open_modal(
            slot,
            ActiveModal::Product {
                mode: ModalMode::Edit(p),
                station: acronym.get_untracked(),
            },
        );
    });
    let on_delete_product = {
        let api = api.clone();
        Callback::new(move |p: Product| {
            if !confirm(&format!("Delete product \"{}\"? This cannot be undone.", p.name)) {
                return;
            }
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match sites::delete_product(&api, &p).await {
                    Ok(message) => {
                        toasts.update(|t| {
                            t.success(message);
                        });
                        reload.run(());
                    }
                    Err(e) => report_failure(&e, "Could not delete product", toasts),
                }
            });
        })
    };

    let on_view_maintenance = Callback::new(move |record: MaintenanceRecord| {
        let (entity_type, entity_id) = (record.entity_type.clone(), record.entity_id);
        open_modal(
            slot,
            ActiveModal::Maintenance {
                mode: ModalMode::View(record),
                entity_type,
                entity_id,
            },
        );
    });
    let on_edit_maintenance = Callback::new(move |record: MaintenanceRecord| {
        let (entity_type, entity_id) = (record.entity_type.clone(), record.entity_id);
        open_modal(
            slot,
            ActiveModal::Maintenance {
                mode: ModalMode::Edit(record),
                entity_type,
                entity_id,
            },
        );
    });

    let on_saved = Callback::new(move |kind: EntityKind| match kind {
        EntityKind::Maintenance => reload_maintenance.run(()),
        _ => reload.run(()),
    });

    let map_station = Signal::derive(move || {
        state.with(|s| (!s.data.station.acronym.is_empty()).then(|| s.data.station.clone()))
    });
    let map_platforms = Signal::derive(move || state.with(|s| s.visible_platforms().into_iter().cloned().collect()));
    let map_aoi = Signal::derive(move || state.with(|s| s.data.aoi.clone()));

    let ecosystem_chips = move || {
        let taxonomy = taxonomy.get();
        let active = state.with(|s| s.ecosystem_filter.clone());
        let chip = move |code: Option<String>, label: String| {
            let is_active = active == code;
            view! {
                <button
                    type="button"
                    class="chip"
                    class:chip--active=is_active
                    aria-pressed=is_active.to_string()
                    on:click=move |_| state.update(|s| s.set_ecosystem_filter(code.clone()))
                >
                    {label}
                </button>
            }
        };
        let mut chips = vec![chip(None, "All ecosystems".to_owned())];
        for code in state.with(|s| s.ecosystems()) {
            let label = taxonomy.provider().resolve(Vocabulary::Ecosystem, Some(&code)).label;
            chips.push(chip(Some(code), label));
        }
        chips
    };

    let platform_cards = move || {
        let platforms: Vec<(Platform, u32)> = state.with(|s| {
            s.visible_platforms()
                .into_iter()
                .map(|p| (p.clone(), s.instrument_count(p)))
                .collect()
        });
        if platforms.is_empty() {
            return view! { <p class="empty">"No platforms for this filter."</p> }.into_any();
        }
        platforms
            .into_iter()
            .map(|(platform, count)| {
                let id = platform.id;
                let selected = Signal::derive(move || state.with(|s| s.selected_platform == Some(id)));
                view! { <PlatformCard platform instrument_count=count selected on_select/> }
            })
            .collect_view()
            .into_any()
    };

    let instrument_cards = move || {
        let editable = can_edit.get();
        let rows: Vec<(Instrument, Option<String>)> = state.with(|s| {
            s.selected_instruments()
                .into_iter()
                .map(|i| (i.clone(), s.photo(i.id).map(str::to_owned)))
                .collect()
        });
        rows.into_iter()
            .map(|(instrument, photo)| match photo {
                Some(photo) => view! {
                    <InstrumentCard
                        instrument
                        photo
                        can_edit=editable
                        on_view=on_view_instrument
                        on_edit=on_edit_instrument
                        on_maintenance=on_instrument_maintenance
                    />
                }
                .into_any(),
                None => view! {
                    <InstrumentCard
                        instrument
                        can_edit=editable
                        on_view=on_view_instrument
                        on_edit=on_edit_instrument
                        on_maintenance=on_instrument_maintenance
                    />
                }
                .into_any(),
            })
            .collect_view()
    };

    let product_cards = move || {
        let editable = can_edit.get();
        let products: Vec<Product> = state.with(|s| s.visible_products().into_iter().cloned().collect());
        if products.is_empty() {
            return view! { <p class="empty">"No products."</p> }.into_any();
        }
        products
            .into_iter()
            .map(|product| {
                view! {
                    <ProductCard
                        product
                        can_edit=editable
                        on_view=on_view_product
                        on_edit=on_edit_product
                        on_delete=on_delete_product
                    />
                }
            })
            .collect_view()
            .into_any()
    };

    let product_sort_button = move |label: &'static str, field: ProductSort| {
        view! {
            <button
                type="button"
                class="chip"
                class:chip--active=move || state.with(|s| s.product_sort == field)
                on:click=move |_| state.update(|s| s.toggle_product_sort(field))
            >
                {label}
                {move || {
                    state.with(|s| {
                        if s.product_sort == field { format!(" {}", s.product_direction.arrow()) } else { String::new() }
                    })
                }}
            </button>
        }
    };

    let maintenance_rows = move || {
        let editable = can_edit.get();
        let rows: Vec<MaintenanceRecord> = state.with(|s| s.visible_maintenance().into_iter().cloned().collect());
        if rows.is_empty() {
            return view! { <li class="empty">"No maintenance recorded."</li> }.into_any();
        }
        rows.into_iter()
            .map(|record| {
                view! {
                    <MaintenanceCard
                        record
                        can_edit=editable
                        on_view=on_view_maintenance
                        on_edit=on_edit_maintenance
                    />
                }
            })
            .collect_view()
            .into_any()
    };

    let maintenance_heading = move || {
        state.with(|s| match &s.maintenance_target {
            Some((kind, id)) if kind == "platform" => s
                .data
                .platforms
                .iter()
                .find(|p| p.id == *id)
                .map_or_else(|| format!("Platform #{id}"), |p| p.display_name.clone()),
            Some((_, id)) => s
                .data
                .instruments
                .iter()
                .find(|i| i.id == *id)
                .map_or_else(|| format!("Instrument #{id}"), |i| i.display_name.clone()),
            None => String::new(),
        })
    };

    let new_product = move |_| {
        open_modal(
            slot,
            ActiveModal::Product {
                mode: ModalMode::Create,
                station: acronym.get_untracked(),
            },
        );
    };
    let new_instrument = move |_| {
        if let Some(platform_id) = state.with_untracked(|s| s.selected_platform) {
            open_instrument(ModalMode::Create, platform_id);
        }
    };
    let new_maintenance = move |_| {
        if let Some((entity_type, entity_id)) = state.with_untracked(|s| s.maintenance_target.clone()) {
            open_modal(
                slot,
                ActiveModal::Maintenance {
                    mode: ModalMode::Create,
                    entity_type,
                    entity_id,
                },
            );
        }
    };

    let on_product_search = Callback::new(move |text: String| state.update(|s| s.product_query = text));
    let product_query = Signal::derive(move || state.with(|s| s.product_query.clone()));
    let login_url = config.login_url.clone();
    let on_logout = move |_| auth::logout(&login_url);

    view! {
        <div class="page page--sites">
            <header class="page-header">
                <div>
                    <h1>
                        {move || {
                            state.with(|s| {
                                let name = s.data.station.display_name.trim();
                                if name.is_empty() { acronym.get() } else { name.to_owned() }
                            })
                        }}
                    </h1>
                    <p class="page-header__meta">
                        {move || acronym.get()}
                        {move || {
                            state.with(|s| {
                                format::coordinates(s.data.station.latitude, s.data.station.longitude)
                                    .map(|c| format!(" · {c}"))
                            })
                        }}
                    </p>
                    {move || {
                        state
                            .with(|s| s.data.station.description.clone())
                            .map(|d| view! { <p class="page-header__description">{d}</p> })
                    }}
                </div>
                <nav class="page-header__actions">
                    <a class="btn" href=move || format!("/station/{}", acronym.get())>
                        <i class="fas fa-table"></i>
                        " Instrument table"
                    </a>
                    <a class="btn" href=move || format!("/campaigns?station={}", acronym.get())>
                        <i class="fas fa-flag"></i>
                        " Campaigns"
                    </a>
                    <button type="button" class="btn btn--ghost" on:click=on_logout>
                        "Log out"
                    </button>
                </nav>
            </header>

            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <Show when=move || state.with(|s| s.loading)>
                <div class="loading">"Loading station…"</div>
            </Show>

            <MapView
                container_id=MAP_CONTAINER
                station=map_station
                platforms=map_platforms
                aoi=map_aoi
                rois=Signal::derive(move || rois.get())
            />

            <section class="panel">
                <header class="panel__header">
                    <h2>"Platforms"</h2>
                    <div class="chip-row" role="group" aria-label="Ecosystem filter">
                        {ecosystem_chips}
                    </div>
                </header>
                <div class="card-grid">{platform_cards}</div>
            </section>

            <Show when=move || state.with(|s| s.selected_platform.is_some())>
                <section class="panel">
                    <header class="panel__header">
                        <h2>
                            "Instruments on "
                            {move || state.with(|s| s.selected().map(|p| p.display_name.clone()).unwrap_or_default())}
                        </h2>
                        <Show when=move || can_edit.get()>
                            <button type="button" class="btn btn--primary" on:click=new_instrument>
                                <i class="fas fa-plus"></i>
                                " Add instrument"
                            </button>
                        </Show>
                    </header>
                    <div class="card-grid">{instrument_cards}</div>
                </section>
            </Show>

            <Show when=move || state.with(|s| s.maintenance_target.is_some())>
                <section class="panel">
                    <header class="panel__header">
                        <h2>"Maintenance · " {maintenance_heading}</h2>
                        <Show when=move || can_edit.get()>
                            <button type="button" class="btn btn--primary" on:click=new_maintenance>
                                <i class="fas fa-wrench"></i>
                                " Log maintenance"
                            </button>
                        </Show>
                    </header>
                    <ul class="maintenance-list">{maintenance_rows}</ul>
                </section>
            </Show>

            <section class="panel">
                <header class="panel__header">
                    <h2>"Products"</h2>
                    <SearchBox
                        value=product_query
                        delay_ms=config.search_debounce_ms
                        on_search=on_product_search
                        placeholder="Search products…"
                    />
                    <div class="chip-row" role="group" aria-label="Sort products">
                        {product_sort_button("Name", ProductSort::Name)}
                        {product_sort_button("Type", ProductSort::Type)}
                        {product_sort_button("Level", ProductSort::Level)}
                        {product_sort_button("Quality", ProductSort::Quality)}
                        {product_sort_button("Date", ProductSort::Date)}
                    </div>
                    <Show when=move || can_edit.get()>
                        <button type="button" class="btn btn--primary" on:click=new_product>
                            <i class="fas fa-plus"></i>
                            " New product"
                        </button>
                    </Show>
                </header>
                <div class="card-grid">{product_cards}</div>
            </section>

            <ModalHost on_saved can_edit/>
        </div>
    }
}
