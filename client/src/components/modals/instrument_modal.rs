//! Instrument view/create/edit dialog.

use catalog::Instrument;
use catalog::taxonomy::Vocabulary;
use catalog::validate::ValidationErrors;
use leptos::prelude::*;

use super::fields::{DetailRow, FormActions, SelectField, TextAreaField, TextField};
use super::{ActiveModal, ModalFrame, ModalMode, bind, spawn_submit};
use crate::app::Taxonomy;
use crate::components::cards::InstrumentCardModel;
use crate::forms::{EntityForm, EntityKind, InstrumentForm};
use crate::state::modal::ModalSlot;
use crate::util::format;

#[must_use]
pub fn initial_form(mode: &ModalMode<Instrument>, platform_id: i64) -> InstrumentForm {
    match mode.entity() {
        Some(instrument) => InstrumentForm::from_entity(instrument),
        None => InstrumentForm::for_platform(platform_id),
    }
}

/// `(label, value)` rows for the camera or sensor spec block, skipping blanks.
#[must_use]
pub fn spec_rows(instrument: &Instrument) -> Vec<(&'static str, String)> {
    let text = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
    let mut rows = Vec::new();
    let mut push = |label: &'static str, value: Option<String>| {
        if let Some(value) = value {
            rows.push((label, value));
        }
    };
    push("Camera brand", text(&instrument.camera_brand));
    push("Camera model", text(&instrument.camera_model));
    push("Resolution", text(&instrument.camera_resolution));
    push("Camera serial", text(&instrument.camera_serial_number));
    push("Lens", text(&instrument.camera_lens));
    push(
        "Focal length",
        instrument.camera_focal_length_mm.map(|f| format!("{f} mm")),
    );
    push("ISO", text(&instrument.camera_iso));
    push("White balance", text(&instrument.camera_white_balance));
    push("Sensor brand", text(&instrument.sensor_brand));
    push("Sensor model", text(&instrument.sensor_model));
    push("Sensor serial", text(&instrument.sensor_serial_number));
    push("Channels", instrument.number_of_channels.map(|n| n.to_string()));
    push("Wavelengths", text(&instrument.wavelengths));
    rows
}

/// Measurement years as `2019–2024`, `2019–present` or `Not set`.
#[must_use]
pub fn measurement_span(first: Option<i32>, last: Option<i32>) -> String {
    match (first, last) {
        (Some(first), Some(last)) => format!("{first}–{last}"),
        (Some(first), None) => format!("{first}–present"),
        (None, Some(last)) => format!("until {last}"),
        (None, None) => format::NOT_SET.to_owned(),
    }
}

#[component]
pub fn InstrumentModal(
    mode: ModalMode<Instrument>,
    platform_id: i64,
    can_edit: bool,
    on_close: Callback<()>,
    on_saved: Callback<EntityKind>,
) -> impl IntoView {
    let title = mode.title("Instrument", |i| i.display_name.clone());
    let body = match mode.clone() {
        ModalMode::View(instrument) => view! { <InstrumentDetails instrument can_edit/> }.into_any(),
        form_mode => view! { <InstrumentFormBody mode=form_mode platform_id on_close on_saved/> }.into_any(),
    };
    view! {
        <ModalFrame title on_close wide=true>
            {body}
        </ModalFrame>
    }
}

#[component]
fn InstrumentDetails(instrument: Instrument, can_edit: bool) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let slot = expect_context::<RwSignal<ModalSlot<ActiveModal>>>();
    let model = InstrumentCardModel::new(&instrument, taxonomy.get_untracked().provider());
    let specs = spec_rows(&instrument);
    let not_set = || format::NOT_SET.to_owned();

    let edit = can_edit.then(|| {
        let target = instrument.clone();
        view! {
            <footer class="dialog__actions">
                <button
                    class="btn btn--primary"
                    on:click=move |_| {
                        let modal = ActiveModal::Instrument {
                            platform_id: target.platform_id,
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
        <section class="dialog__section">
            <dl class="detail-list">
                <DetailRow label="Name" value=instrument.normalized_name.clone()/>
                <DetailRow label="Type" value=model.kind.label.clone()/>
                <div class="detail-row">
                    <dt>"Status"</dt>
                    <dd><span class=model.status.class.clone()>{model.status.label.clone()}</span></dd>
                </div>
                <DetailRow
                    label="Measurement"
                    value=model.measurement.as_ref().map_or_else(not_set, |m| m.label.clone())
                />
                <DetailRow label="ROIs" value=model.roi_label.clone()/>
            </dl>
        </section>
        <section class="dialog__section">
            <h3>"Position"</h3>
            <dl class="detail-list">
                <DetailRow
                    label="Coordinates"
                    value=format::coordinates(instrument.latitude, instrument.longitude).unwrap_or_else(not_set)
                />
                <DetailRow label="Height" value=model.height.clone().unwrap_or_else(not_set)/>
                <DetailRow label="Viewing direction" value=format::text_or_placeholder(instrument.viewing_direction.as_deref())/>
                <DetailRow label="Azimuth" value=format::degrees(instrument.azimuth_degrees).unwrap_or_else(not_set)/>
                <DetailRow label="From nadir" value=format::degrees(instrument.degrees_from_nadir).unwrap_or_else(not_set)/>
            </dl>
        </section>
        <section class="dialog__section">
            <h3>"Specifications"</h3>
            {if specs.is_empty() {
                view! { <p class="dialog__empty">"No specifications recorded"</p> }.into_any()
            } else {
                view! {
                    <dl class="detail-list">
                        {specs
                            .into_iter()
                            .map(|(label, value)| view! { <DetailRow label value/> })
                            .collect_view()}
                    </dl>
                }
                    .into_any()
            }}
        </section>
        <section class="dialog__section">
            <h3>"Timeline"</h3>
            <dl class="detail-list">
                <DetailRow label="Deployed" value=format::date(instrument.deployment_date.as_deref())/>
                <DetailRow label="Calibrated" value=format::date(instrument.calibration_date.as_deref())/>
                <DetailRow label="Decommissioned" value=format::date(instrument.decommission_date.as_deref())/>
                <DetailRow
                    label="Measuring"
                    value=measurement_span(instrument.first_measurement_year, instrument.last_measurement_year)
                />
            </dl>
        </section>
        {instrument.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
            <section class="dialog__section">
                <h3>"Description"</h3>
                <p class="dialog__text">{d}</p>
            </section>
        })}
        {edit}
    }
}

#[component]
fn InstrumentFormBody(
    mode: ModalMode<Instrument>,
    platform_id: i64,
    on_close: Callback<()>,
    on_saved: Callback<EntityKind>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let id = mode.entity().map(|i| i.id);
    let submit_label = mode.submit_label();
    let form = RwSignal::new(initial_form(&mode, platform_id));
    let errors = RwSignal::new(ValidationErrors::default());
    let saving = RwSignal::new(false);
    let is_camera = Memo::new(move |_| form.with(InstrumentForm::is_camera));

    let types = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::InstrumentType));
    let statuses = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::InstrumentStatus));
    let measurement = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::MeasurementStatus));

    let (name, set_name) = bind(form, |f| f.display_name.clone(), |f, v| f.display_name = v);
    let (kind, set_kind) = bind(form, |f| f.instrument_type.clone(), |f, v| f.instrument_type = v);
    let (status, set_status) = bind(form, |f| f.status.clone(), |f, v| f.status = v);
    let (mstatus, set_mstatus) = bind(form, |f| f.measurement_status.clone(), |f, v| f.measurement_status = v);
    let (lat, set_lat) = bind(form, |f| f.latitude.clone(), |f, v| f.latitude = v);
    let (lon, set_lon) = bind(form, |f| f.longitude.clone(), |f, v| f.longitude = v);
    let (height, set_height) = bind(form, |f| f.height_m.clone(), |f, v| f.height_m = v);
    let (direction, set_direction) = bind(form, |f| f.viewing_direction.clone(), |f, v| f.viewing_direction = v);
    let (azimuth, set_azimuth) = bind(form, |f| f.azimuth_degrees.clone(), |f, v| f.azimuth_degrees = v);
    let (nadir, set_nadir) = bind(form, |f| f.degrees_from_nadir.clone(), |f, v| f.degrees_from_nadir = v);
    let (cam_brand, set_cam_brand) = bind(form, |f| f.camera_brand.clone(), |f, v| f.camera_brand = v);
    let (cam_model, set_cam_model) = bind(form, |f| f.camera_model.clone(), |f, v| f.camera_model = v);
    let (cam_res, set_cam_res) = bind(form, |f| f.camera_resolution.clone(), |f, v| f.camera_resolution = v);
    let (cam_serial, set_cam_serial) =
        bind(form, |f| f.camera_serial_number.clone(), |f, v| f.camera_serial_number = v);
    let (lens, set_lens) = bind(form, |f| f.camera_lens.clone(), |f, v| f.camera_lens = v);
    let (focal, set_focal) = bind(form, |f| f.camera_focal_length_mm.clone(), |f, v| f.camera_focal_length_mm = v);
    let (sen_brand, set_sen_brand) = bind(form, |f| f.sensor_brand.clone(), |f, v| f.sensor_brand = v);
    let (sen_model, set_sen_model) = bind(form, |f| f.sensor_model.clone(), |f, v| f.sensor_model = v);
    let (sen_serial, set_sen_serial) =
        bind(form, |f| f.sensor_serial_number.clone(), |f, v| f.sensor_serial_number = v);
    let (channels, set_channels) = bind(form, |f| f.number_of_channels.clone(), |f, v| f.number_of_channels = v);
    let (waves, set_waves) = bind(form, |f| f.wavelengths.clone(), |f, v| f.wavelengths = v);
    let (deployed, set_deployed) = bind(form, |f| f.deployment_date.clone(), |f, v| f.deployment_date = v);
    let (decommissioned, set_decommissioned) =
        bind(form, |f| f.decommission_date.clone(), |f, v| f.decommission_date = v);
    let (calibrated, set_calibrated) = bind(form, |f| f.calibration_date.clone(), |f, v| f.calibration_date = v);
    let (first_year, set_first_year) =
        bind(form, |f| f.first_measurement_year.clone(), |f, v| f.first_measurement_year = v);
    let (last_year, set_last_year) = bind(form, |f| f.last_measurement_year.clone(), |f, v| f.last_measurement_year = v);
    let (description, set_description) = bind(form, |f| f.description.clone(), |f, v| f.description = v);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !saving.get_untracked() {
            spawn_submit(form.get_untracked(), id, errors, saving, on_saved);
        }
    };

    view! {
        <form class="dialog__form" novalidate=true on:submit=on_submit>
            <fieldset>
                <legend>"General"</legend>
                <TextField label="Display name" field="display_name" value=name on_input=set_name errors required=true/>
                <div class="field-row">
                    <SelectField label="Type" field="instrument_type" value=kind options=types on_change=set_kind errors/>
                    <SelectField label="Status" field="status" value=status options=statuses on_change=set_status errors/>
                    <SelectField
                        label="Measurement status"
                        field="measurement_status"
                        value=mstatus
                        options=measurement
                        on_change=set_mstatus
                        errors
                    />
                </div>
            </fieldset>
            <fieldset>
                <legend>"Position"</legend>
                <div class="field-row">
                    <TextField label="Latitude" field="latitude" value=lat on_input=set_lat errors input_type="number"/>
                    <TextField label="Longitude" field="longitude" value=lon on_input=set_lon errors input_type="number"/>
                    <TextField label="Height (m)" field="height_m" value=height on_input=set_height errors input_type="number"/>
                </div>
                <div class="field-row">
                    <TextField label="Viewing direction" field="viewing_direction" value=direction on_input=set_direction errors/>
                    <TextField
                        label="Azimuth (°)"
                        field="azimuth_degrees"
                        value=azimuth
                        on_input=set_azimuth
                        errors
                        input_type="number"
                    />
                    <TextField
                        label="Degrees from nadir"
                        field="degrees_from_nadir"
                        value=nadir
                        on_input=set_nadir
                        errors
                        input_type="number"
                    />
                </div>
            </fieldset>
            <Show when=move || is_camera.get()>
                <fieldset>
                    <legend>"Camera"</legend>
                    <div class="field-row">
                        <TextField label="Brand" field="camera_brand" value=cam_brand on_input=set_cam_brand errors/>
                        <TextField label="Model" field="camera_model" value=cam_model on_input=set_cam_model errors/>
                        <TextField label="Resolution" field="camera_resolution" value=cam_res on_input=set_cam_res errors/>
                    </div>
                    <div class="field-row">
                        <TextField
                            label="Serial number"
                            field="camera_serial_number"
                            value=cam_serial
                            on_input=set_cam_serial
                            errors
                        />
                        <TextField label="Lens" field="camera_lens" value=lens on_input=set_lens errors/>
                        <TextField
                            label="Focal length (mm)"
                            field="camera_focal_length_mm"
                            value=focal
                            on_input=set_focal
                            errors
                            input_type="number"
                        />
                    </div>
                </fieldset>
            </Show>
            <fieldset>
                <legend>"Sensor"</legend>
                <div class="field-row">
                    <TextField label="Brand" field="sensor_brand" value=sen_brand on_input=set_sen_brand errors/>
                    <TextField label="Model" field="sensor_model" value=sen_model on_input=set_sen_model errors/>
                    <TextField
                        label="Serial number"
                        field="sensor_serial_number"
                        value=sen_serial
                        on_input=set_sen_serial
                        errors
                    />
                </div>
                <div class="field-row">
                    <TextField
                        label="Channels"
                        field="number_of_channels"
                        value=channels
                        on_input=set_channels
                        errors
                        input_type="number"
                    />
                    <TextField label="Wavelengths" field="wavelengths" value=waves on_input=set_waves errors placeholder="e.g. 530, 645, 860"/>
                </div>
            </fieldset>
            <fieldset>
                <legend>"Timeline"</legend>
                <div class="field-row">
                    <TextField label="Deployed" field="deployment_date" value=deployed on_input=set_deployed errors input_type="date"/>
                    <TextField
                        label="Calibrated"
                        field="calibration_date"
                        value=calibrated
                        on_input=set_calibrated
                        errors
                        input_type="date"
                    />
                    <TextField
                        label="Decommissioned"
                        field="decommission_date"
                        value=decommissioned
                        on_input=set_decommissioned
                        errors
                        input_type="date"
                    />
                </div>
                <div class="field-row">
                    <TextField
                        label="First measurement year"
                        field="first_measurement_year"
                        value=first_year
                        on_input=set_first_year
                        errors
                        input_type="number"
                    />
                    <TextField
                        label="Last measurement year"
                        field="last_measurement_year"
                        value=last_year
                        on_input=set_last_year
                        errors
                        input_type="number"
                    />
                </div>
            </fieldset>
            <TextAreaField label="Description" field="description" value=description on_input=set_description errors/>
            <FormActions saving on_cancel=on_close submit_label=submit_label/>
        </form>
    }
}
