//! Instrument summary card.

#[cfg(test)]
#[path = "instrument_card_test.rs"]
mod instrument_card_test;

use catalog::taxonomy::Vocabulary;
use catalog::{Instrument, TaxonomyProvider};
use leptos::prelude::*;

use super::Badge;
use crate::app::Taxonomy;
use crate::util::format;

/// Display values for one instrument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrumentCardModel {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub kind: Badge,
    pub status: Badge,
    pub measurement: Option<Badge>,
    pub roi_label: String,
    pub height: Option<String>,
    pub deployed: Option<String>,
}

impl InstrumentCardModel {
    #[must_use]
    pub fn new(instrument: &Instrument, taxonomy: &dyn TaxonomyProvider) -> Self {
        let title = if instrument.display_name.trim().is_empty() {
            instrument.normalized_name.clone()
        } else {
            instrument.display_name.clone()
        };
        Self {
            id: instrument.id,
            title,
            subtitle: instrument.normalized_name.clone(),
            kind: Badge::from_term(
                &taxonomy.resolve(Vocabulary::InstrumentType, instrument.instrument_type.as_deref()),
            ),
            status: Badge::from_term(&taxonomy.resolve(Vocabulary::InstrumentStatus, instrument.status.as_deref())),
            measurement: instrument
                .measurement_status
                .as_deref()
                .map(|m| Badge::from_term(&taxonomy.resolve(Vocabulary::MeasurementStatus, Some(m)))),
            roi_label: format::roi_count(instrument.roi_count),
            height: format::meters(instrument.height_m),
            deployed: instrument
                .deployment_date
                .as_deref()
                .map(|d| format::date(Some(d))),
        }
    }
}

/// Card for one instrument, optionally with a photo and edit actions.
#[component]
pub fn InstrumentCard(
    instrument: Instrument,
    #[prop(optional)] platform_name: Option<String>,
    #[prop(optional)] photo: Option<String>,
    #[prop(optional)] can_edit: bool,
    #[prop(optional)] on_view: Option<Callback<Instrument>>,
    #[prop(optional)] on_edit: Option<Callback<Instrument>>,
    #[prop(optional)] on_maintenance: Option<Callback<Instrument>>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let model = Memo::new({
        let instrument = instrument.clone();
        move |_| InstrumentCardModel::new(&instrument, taxonomy.get().provider())
    });
    let view_target = instrument.clone();
    let edit_target = instrument.clone();
    let maintenance_target = instrument;

    let open = move |_| {
        if let Some(cb) = on_view {
            cb.run(view_target.clone());
        }
    };

    view! {
        <article class="card instrument-card" on:click=open>
            {photo.map(|src| {
                let alt = model.get_untracked().title;
                view! { <img class="instrument-card__photo" src=src alt=alt loading="lazy"/> }
            })}
            <header class="instrument-card__header">
                <span class="instrument-card__icon" style=move || model.get().kind.style()>
                    <i class=move || format!("fas {}", model.get().kind.icon)></i>
                </span>
                <div>
                    <h4 class="instrument-card__title">{move || model.get().title}</h4>
                    <span class="instrument-card__name">{move || model.get().subtitle}</span>
                </div>
            </header>
            <div class="instrument-card__badges">
                <span class=move || model.get().kind.class style=move || model.get().kind.style()>
                    {move || model.get().kind.label}
                </span>
                <span class=move || model.get().status.class>{move || model.get().status.label}</span>
                {move || {
                    model
                        .get()
                        .measurement
                        .map(|m| view! { <span class=m.class.clone()>{m.label.clone()}</span> })
                }}
            </div>
            <dl class="instrument-card__summary">
                {platform_name.map(|name| view! { <dt>"Platform"</dt><dd>{name}</dd> })}
                {move || model.get().height.map(|h| view! { <dt>"Height"</dt><dd>{h}</dd> })}
                {move || model.get().deployed.map(|d| view! { <dt>"Deployed"</dt><dd>{d}</dd> })}
                <dt>"ROIs"</dt>
                <dd>{move || model.get().roi_label}</dd>
            </dl>
            <Show when=move || can_edit>
                <footer class="card__actions" on:click=|ev| ev.stop_propagation()>
                    {on_edit.map(|cb| {
                        let target = edit_target.clone();
                        view! {
                            <button class="btn btn--small" on:click=move |_| cb.run(target.clone())>
                                "Edit"
                            </button>
                        }
                    })}
                    {on_maintenance.map(|cb| {
                        let target = maintenance_target.clone();
                        view! {
                            <button class="btn btn--small btn--ghost" on:click=move |_| cb.run(target.clone())>
                                "Maintenance"
                            </button>
                        }
                    })}
                </footer>
            </Show>
        </article>
    }
}
