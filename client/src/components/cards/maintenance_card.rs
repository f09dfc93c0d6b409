//! Maintenance record row.

#[cfg(test)]
#[path = "maintenance_card_test.rs"]
mod maintenance_card_test;

use catalog::taxonomy::Vocabulary;
use catalog::{MaintenanceRecord, TaxonomyProvider};
use leptos::prelude::*;

use super::Badge;
use crate::app::Taxonomy;
use crate::util::format;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaintenanceCardModel {
    pub id: i64,
    pub summary: String,
    pub status: Badge,
    pub priority: Badge,
    pub scheduled: String,
    pub completed: Option<String>,
    pub technician: Option<String>,
}

impl MaintenanceCardModel {
    #[must_use]
    pub fn new(record: &MaintenanceRecord, taxonomy: &dyn TaxonomyProvider) -> Self {
        Self {
            id: record.id,
            summary: record.description.lines().next().unwrap_or_default().trim().to_owned(),
            status: Badge::from_term(&taxonomy.resolve(Vocabulary::MaintenanceStatus, record.status.as_deref())),
            priority: Badge::from_term(&taxonomy.resolve(Vocabulary::MaintenancePriority, record.priority.as_deref())),
            scheduled: format::date(record.scheduled_date.as_deref()),
            completed: record
                .completed_date
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(|d| format::date(Some(d))),
            technician: record.technician.clone().filter(|t| !t.trim().is_empty()),
        }
    }
}

#[component]
pub fn MaintenanceCard(
    record: MaintenanceRecord,
    #[prop(optional)] can_edit: bool,
    on_view: Callback<MaintenanceRecord>,
    #[prop(optional)] on_edit: Option<Callback<MaintenanceRecord>>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let model = Memo::new({
        let record = record.clone();
        move |_| MaintenanceCardModel::new(&record, taxonomy.get().provider())
    });
    let edit = on_edit.filter(|_| can_edit).map(|cb| {
        let target = record.clone();
        view! {
            <button
                class="btn btn--small"
                on:click=move |ev| {
                    ev.stop_propagation();
                    cb.run(target.clone());
                }
            >
                "Edit"
            </button>
        }
    });

    view! {
        <li class="maintenance-row" on:click=move |_| on_view.run(record.clone())>
            <span class=move || model.get().priority.class title="Priority">
                <i class=move || format!("fas {}", model.get().priority.icon)></i>
                {move || model.get().priority.label}
            </span>
            <span class="maintenance-row__summary">{move || model.get().summary}</span>
            <span class=move || model.get().status.class>{move || model.get().status.label}</span>
            <span class="maintenance-row__dates">
                {move || model.get().scheduled}
                {move || model.get().completed.map(|c| format!(" / done {c}"))}
            </span>
            {move || model.get().technician.map(|t| view! { <span class="maintenance-row__tech">{t}</span> })}
            {edit}
        </li>
    }
}
