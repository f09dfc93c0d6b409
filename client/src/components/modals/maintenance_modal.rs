//! Maintenance record view/create/edit dialog.

use catalog::MaintenanceRecord;
use catalog::taxonomy::Vocabulary;
use catalog::validate::ValidationErrors;
use leptos::prelude::*;

use super::fields::{DetailRow, FieldError, FormActions, SelectField, TextAreaField, TextField};
use super::{ActiveModal, ModalFrame, ModalMode, bind, spawn_submit};
use crate::app::Taxonomy;
use crate::components::cards::MaintenanceCardModel;
use crate::forms::{EntityForm, EntityKind, MaintenanceForm};
use crate::state::modal::ModalSlot;
use crate::util::format;

#[must_use]
pub fn initial_form(mode: &ModalMode<MaintenanceRecord>, entity_type: &str, entity_id: i64) -> MaintenanceForm {
    match mode.entity() {
        Some(record) => MaintenanceForm::from_entity(record),
        None => MaintenanceForm::for_entity(entity_type, entity_id),
    }
}

#[component]
pub fn MaintenanceModal(
    mode: ModalMode<MaintenanceRecord>,
    entity_type: String,
    entity_id: i64,
    can_edit: bool,
    on_close: Callback<()>,
    on_saved: Callback<EntityKind>,
) -> impl IntoView {
    let title = mode.title("Maintenance record", |m| format!("Maintenance #{}", m.id));
    let body = match mode.clone() {
        ModalMode::View(record) => view! { <MaintenanceDetails record can_edit/> }.into_any(),
        form_mode => view! {
            <MaintenanceFormBody mode=form_mode entity_type entity_id on_close on_saved/>
        }
        .into_any(),
    };
    view! { <ModalFrame title on_close>{body}</ModalFrame> }
}

#[component]
fn MaintenanceDetails(record: MaintenanceRecord, can_edit: bool) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let slot = expect_context::<RwSignal<ModalSlot<ActiveModal>>>();
    let model = MaintenanceCardModel::new(&record, taxonomy.get_untracked().provider());
    let target_label = format!("{} #{}", record.entity_type, record.entity_id);

    let edit = can_edit.then(|| {
        let target = record.clone();
        view! {
            <footer class="dialog__actions">
                <button
                    class="btn btn--primary"
                    on:click=move |_| {
                        let modal = ActiveModal::Maintenance {
                            entity_type: target.entity_type.clone(),
                            entity_id: target.entity_id,
                            mode: ModalMode::Edit(target.clone()),
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
        <dl class="detail-list">
            <DetailRow label="For" value=target_label/>
            <div class="detail-row">
                <dt>"Status"</dt>
                <dd><span class=model.status.class.clone()>{model.status.label.clone()}</span></dd>
            </div>
            <div class="detail-row">
                <dt>"Priority"</dt>
                <dd><span class=model.priority.class.clone()>{model.priority.label.clone()}</span></dd>
            </div>
            <DetailRow label="Scheduled" value=model.scheduled.clone()/>
            <DetailRow label="Completed" value=model.completed.clone().unwrap_or_else(|| format::NOT_SET.to_owned())/>
            <DetailRow label="Technician" value=format::text_or_placeholder(record.technician.as_deref())/>
        </dl>
        <p class="dialog__text">{record.description.clone()}</p>
        {edit}
    }
}

#[component]
fn MaintenanceFormBody(
    mode: ModalMode<MaintenanceRecord>,
    entity_type: String,
    entity_id: i64,
    on_close: Callback<()>,
    on_saved: Callback<EntityKind>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let id = mode.entity().map(|m| m.id);
    let submit_label = mode.submit_label();
    let form = RwSignal::new(initial_form(&mode, &entity_type, entity_id));
    let errors = RwSignal::new(ValidationErrors::default());
    let saving = RwSignal::new(false);

    let statuses = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::MaintenanceStatus));
    let priorities = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::MaintenancePriority));

    let (status, set_status) = bind(form, |f| f.status.clone(), |f, v| f.status = v);
    let (priority, set_priority) = bind(form, |f| f.priority.clone(), |f, v| f.priority = v);
    let (scheduled, set_scheduled) = bind(form, |f| f.scheduled_date.clone(), |f, v| f.scheduled_date = v);
    let (completed, set_completed) = bind(form, |f| f.completed_date.clone(), |f, v| f.completed_date = v);
    let (technician, set_technician) = bind(form, |f| f.technician.clone(), |f, v| f.technician = v);
    let (description, set_description) = bind(form, |f| f.description.clone(), |f, v| f.description = v);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !saving.get_untracked() {
            spawn_submit(form.get_untracked(), id, errors, saving, on_saved);
        }
    };

    view! {
        <form class="dialog__form" novalidate=true on:submit=on_submit>
            <FieldError errors field="entity_type"/>
            <div class="field-row">
                <SelectField label="Status" field="status" value=status options=statuses on_change=set_status errors/>
                <SelectField
                    label="Priority"
                    field="priority"
                    value=priority
                    options=priorities
                    on_change=set_priority
                    errors
                />
            </div>
            <div class="field-row">
                <TextField
                    label="Scheduled date"
                    field="scheduled_date"
                    value=scheduled
                    on_input=set_scheduled
                    errors
                    input_type="date"
                />
                <TextField
                    label="Completed date"
                    field="completed_date"
                    value=completed
                    on_input=set_completed
                    errors
                    input_type="date"
                />
            </div>
            <TextField label="Technician" field="technician" value=technician on_input=set_technician errors/>
            <TextAreaField label="Description" field="description" value=description on_input=set_description errors/>
            <FormActions saving on_cancel=on_close submit_label=submit_label/>
        </form>
    }
}

