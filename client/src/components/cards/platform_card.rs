//! Platform summary card.

#[cfg(test)]
#[path = "platform_card_test.rs"]
mod platform_card_test;

use catalog::taxonomy::Vocabulary;
use catalog::{Platform, TaxonomyProvider};
use leptos::prelude::*;

use super::Badge;
use crate::app::Taxonomy;
use crate::util::format;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformCardModel {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub ecosystem: Badge,
    pub instrument_label: String,
    pub coordinates: Option<String>,
    pub height: Option<String>,
}

impl PlatformCardModel {
    /// `instrument_count` comes from the caller since the API's own count
    /// may be missing or stale.
    #[must_use]
    pub fn new(platform: &Platform, instrument_count: u32, taxonomy: &dyn TaxonomyProvider) -> Self {
        let instrument_label = match instrument_count {
            1 => "1 instrument".to_owned(),
            n => format!("{n} instruments"),
        };
        Self {
            id: platform.id,
            title: platform.display_name.clone(),
            subtitle: platform.normalized_name.clone(),
            ecosystem: Badge::from_term(&taxonomy.resolve(Vocabulary::Ecosystem, platform.ecosystem_code.as_deref())),
            instrument_label,
            coordinates: format::coordinates(platform.latitude, platform.longitude),
            height: format::meters(platform.height_m),
        }
    }
}

#[component]
pub fn PlatformCard(
    platform: Platform,
    instrument_count: u32,
    #[prop(into)] selected: Signal<bool>,
    on_select: Callback<i64>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let id = platform.id;
    let model = Memo::new(move |_| PlatformCardModel::new(&platform, instrument_count, taxonomy.get().provider()));

    view! {
        <button
            type="button"
            class="card platform-card"
            class:platform-card--selected=move || selected.get()
            aria-pressed=move || selected.get().to_string()
            on:click=move |_| on_select.run(id)
        >
            <span class="platform-card__ecosystem" style=move || model.get().ecosystem.style()>
                <i class=move || format!("fas {}", model.get().ecosystem.icon)></i>
                {move || model.get().ecosystem.label}
            </span>
            <h4 class="platform-card__title">{move || model.get().title}</h4>
            <span class="platform-card__name">{move || model.get().subtitle}</span>
            <span class="platform-card__count">{move || model.get().instrument_label}</span>
            {move || model.get().coordinates.map(|c| view! { <span class="platform-card__coords">{c}</span> })}
            {move || model.get().height.map(|h| view! { <span class="platform-card__height">{h}</span> })}
        </button>
    }
}
