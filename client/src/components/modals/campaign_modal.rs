//! Campaign view/create/edit dialog.

use catalog::Campaign;
use catalog::taxonomy::Vocabulary;
use catalog::validate::ValidationErrors;
use leptos::prelude::*;

use super::fields::{DetailRow, FormActions, SelectField, TextAreaField, TextField};
use super::{ActiveModal, ModalFrame, ModalMode, bind, spawn_submit};
use crate::app::Taxonomy;
use crate::components::cards::CampaignCardModel;
use crate::forms::{CampaignForm, EntityForm, EntityKind};
use crate::state::modal::ModalSlot;
use crate::util::format;

#[must_use]
pub fn initial_form(mode: &ModalMode<Campaign>, station_id: Option<i64>) -> CampaignForm {
    match mode.entity() {
        Some(campaign) => CampaignForm::from_entity(campaign),
        None => CampaignForm::for_station(station_id),
    }
}

#[component]
pub fn CampaignModal(
    mode: ModalMode<Campaign>,
    station_id: Option<i64>,
    can_edit: bool,
    on_close: Callback<()>,
    on_saved: Callback<EntityKind>,
) -> impl IntoView {
    let title = mode.title("Campaign", |c| c.name.clone());
    let body = match mode.clone() {
        ModalMode::View(campaign) => view! { <CampaignDetails campaign station_id can_edit/> }.into_any(),
        form_mode => view! { <CampaignFormBody mode=form_mode station_id on_close on_saved/> }.into_any(),
    };
    view! {
        <ModalFrame title on_close wide=true>
            {body}
        </ModalFrame>
    }
}

fn bullet_list(items: &[String]) -> AnyView {
    if items.is_empty() {
        return view! { <p class="dialog__empty">"None listed"</p> }.into_any();
    }
    let rows = items.iter().map(|item| view! { <li>{item.clone()}</li> }).collect_view();
    view! { <ul class="dialog__list">{rows}</ul> }.into_any()
}

#[component]
fn CampaignDetails(campaign: Campaign, station_id: Option<i64>, can_edit: bool) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let slot = expect_context::<RwSignal<ModalSlot<ActiveModal>>>();
    let model = CampaignCardModel::new(&campaign, taxonomy.get_untracked().provider());
    let budget = campaign
        .budget
        .map_or_else(|| format::NOT_SET.to_owned(), |b| format!("{b:.2}"));

    let edit = can_edit.then(|| {
        let target = campaign.clone();
        view! {
            <footer class="dialog__actions">
                <button
                    class="btn btn--primary"
                    on:click=move |_| {
                        let modal = ActiveModal::Campaign {
                            mode: ModalMode::Edit(target.clone()),
                            station_id,
                        };
                        slot.update(|s| s.open(modal, None));
                    }
                >
                    "Edit"
                </button>
            </footer>
        }
    });

    view! {
        <section class="dialog__section">
            <dl class="detail-list">
                <DetailRow label="Type" value=model.kind.label.clone()/>
                <div class="detail-row">
                    <dt>"Status"</dt>
                    <dd><span class=model.status.class.clone()>{model.status.label.clone()}</span></dd>
                </div>
                <DetailRow label="Planned" value=model.dates.clone()/>
                <DetailRow label="Coordinator" value=format::text_or_placeholder(campaign.coordinator.as_deref())/>
                <DetailRow label="Funding" value=format::text_or_placeholder(campaign.funding_source.as_deref())/>
                <DetailRow label="Budget" value=budget/>
            </dl>
        </section>
        {campaign.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
            <section class="dialog__section">
                <h3>"Description"</h3>
                <p class="dialog__text">{d}</p>
            </section>
        })}
        <section class="dialog__section">
            <h3>"Objectives"</h3>
            {bullet_list(&campaign.objectives)}
        </section>
        <section class="dialog__section">
            <h3>"Expected outcomes"</h3>
            {bullet_list(&campaign.expected_outcomes)}
        </section>
        {edit}
    }
}

#[component]
fn CampaignFormBody(
    mode: ModalMode<Campaign>,
    station_id: Option<i64>,
    on_close: Callback<()>,
    on_saved: Callback<EntityKind>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let id = mode.entity().map(|c| c.id);
    let submit_label = mode.submit_label();
    let form = RwSignal::new(initial_form(&mode, station_id));
    let errors = RwSignal::new(ValidationErrors::default());
    let saving = RwSignal::new(false);

    let types = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::CampaignType));
    let statuses = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::CampaignStatus));

    let (name, set_name) = bind(form, |f| f.name.clone(), |f, v| f.name = v);
    let (kind, set_kind) = bind(form, |f| f.campaign_type.clone(), |f, v| f.campaign_type = v);
    let (status, set_status) = bind(form, |f| f.status.clone(), |f, v| f.status = v);
    let (start, set_start) = bind(
        form,
        |f| f.planned_start_datetime.clone(),
        |f, v| f.planned_start_datetime = v,
    );
    let (end, set_end) = bind(form, |f| f.planned_end_datetime.clone(), |f, v| f.planned_end_datetime = v);
    let (description, set_description) = bind(form, |f| f.description.clone(), |f, v| f.description = v);
    let (objectives, set_objectives) = bind(form, |f| f.objectives.clone(), |f, v| f.objectives = v);
    let (outcomes, set_outcomes) = bind(form, |f| f.expected_outcomes.clone(), |f, v| f.expected_outcomes = v);
    let (funding, set_funding) = bind(form, |f| f.funding_source.clone(), |f, v| f.funding_source = v);
    let (budget, set_budget) = bind(form, |f| f.budget.clone(), |f, v| f.budget = v);
    let (coordinator, set_coordinator) = bind(form, |f| f.coordinator.clone(), |f, v| f.coordinator = v);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !saving.get_untracked() {
            spawn_submit(form.get_untracked(), id, errors, saving, on_saved);
        }
    };

    view! {
        <form class="dialog__form" novalidate=true on:submit=on_submit>
            <TextField label="Name" field="name" value=name on_input=set_name errors required=true/>
            <div class="field-row">
                <SelectField label="Type" field="campaign_type" value=kind options=types on_change=set_kind errors/>
                <SelectField label="Status" field="status" value=status options=statuses on_change=set_status errors/>
            </div>
            <div class="field-row">
                <TextField
                    label="Planned start"
                    field="planned_start_datetime"
                    value=start
                    on_input=set_start
                    errors
                    input_type="datetime-local"
                />
                <TextField
                    label="Planned end"
                    field="planned_end_datetime"
                    value=end
                    on_input=set_end
                    errors
                    input_type="datetime-local"
                />
            </div>
            <TextAreaField
                label="Description"
                field="description"
                value=description
                on_input=set_description
                errors
            />
            <TextAreaField
                label="Objectives"
                field="objectives"
                value=objectives
                on_input=set_objectives
                errors
                hint="One objective per line"
            />
            <TextAreaField
                label="Expected outcomes"
                field="expected_outcomes"
                value=outcomes
                on_input=set_outcomes
                errors
                hint="One outcome per line"
            />
            <div class="field-row">
                <TextField label="Coordinator" field="coordinator" value=coordinator on_input=set_coordinator errors/>
                <TextField label="Funding source" field="funding_source" value=funding on_input=set_funding errors/>
                <TextField label="Budget" field="budget" value=budget on_input=set_budget errors input_type="number"/>
            </div>
            <FormActions saving on_cancel=on_close submit_label=submit_label/>
        </form>
    }
}
