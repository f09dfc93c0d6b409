//! Campaign summary card.

#[cfg(test)]
#[path = "campaign_card_test.rs"]
mod campaign_card_test;

use catalog::taxonomy::Vocabulary;
use catalog::{Campaign, TaxonomyProvider};
use leptos::prelude::*;

use super::Badge;
use crate::app::Taxonomy;
use crate::util::format;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignCardModel {
    pub id: i64,
    pub title: String,
    pub kind: Badge,
    pub status: Badge,
    pub dates: String,
    pub coordinator: Option<String>,
    pub objective_count: usize,
}

impl CampaignCardModel {
    #[must_use]
    pub fn new(campaign: &Campaign, taxonomy: &dyn TaxonomyProvider) -> Self {
        Self {
            id: campaign.id,
            title: campaign.name.clone(),
            kind: Badge::from_term(&taxonomy.resolve(Vocabulary::CampaignType, campaign.campaign_type.as_deref())),
            status: Badge::from_term(&taxonomy.resolve(Vocabulary::CampaignStatus, campaign.status.as_deref())),
            dates: format::date_range(
                campaign.planned_start_datetime.as_deref(),
                campaign.planned_end_datetime.as_deref(),
            ),
            coordinator: campaign.coordinator.clone().filter(|c| !c.trim().is_empty()),
            objective_count: campaign.objectives.len(),
        }
    }
}

#[component]
pub fn CampaignCard(
    campaign: Campaign,
    #[prop(optional)] can_edit: bool,
    on_view: Callback<Campaign>,
    #[prop(optional)] on_edit: Option<Callback<Campaign>>,
    #[prop(optional)] on_delete: Option<Callback<Campaign>>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let model = Memo::new({
        let campaign = campaign.clone();
        move |_| CampaignCardModel::new(&campaign, taxonomy.get().provider())
    });
    let actions = can_edit.then(|| {
        let edit = on_edit.map(|cb| {
            let target = campaign.clone();
            view! { <button class="btn btn--small" on:click=move |_| cb.run(target.clone())>"Edit"</button> }
        });
        let delete = on_delete.map(|cb| {
            let target = campaign.clone();
            view! {
                <button class="btn btn--small btn--danger" on:click=move |_| cb.run(target.clone())>"Delete"</button>
            }
        });
        view! { <footer class="card__actions" on:click=|ev| ev.stop_propagation()>{edit}{delete}</footer> }
    });

    view! {
        <article class="card campaign-card" on:click=move |_| on_view.run(campaign.clone())>
            <header class="campaign-card__header">
                <span class="campaign-card__icon" style=move || model.get().kind.style()>
                    <i class=move || format!("fas {}", model.get().kind.icon)></i>
                </span>
                <h4 class="campaign-card__title">{move || model.get().title}</h4>
                <span class=move || model.get().status.class>{move || model.get().status.label}</span>
            </header>
            <p class="campaign-card__type">{move || model.get().kind.label}</p>
            <p class="campaign-card__dates">
                <i class="fas fa-calendar"></i>
                {move || model.get().dates}
            </p>
            {move || model.get().coordinator.map(|c| view! { <p class="campaign-card__coordinator">{c}</p> })}
            {actions}
        </article>
    }
}
