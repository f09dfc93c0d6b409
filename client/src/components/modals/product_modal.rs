//! Product view/create/edit dialog.

use catalog::Product;
use catalog::taxonomy::Vocabulary;
use catalog::validate::ValidationErrors;
use leptos::prelude::*;

use super::fields::{DetailRow, FormActions, SelectField, TextAreaField, TextField};
use super::{ActiveModal, ModalFrame, ModalMode, bind, spawn_submit};
use crate::app::Taxonomy;
use crate::components::cards::ProductCardModel;
use crate::forms::{EntityForm, EntityKind, ProductForm};
use crate::state::modal::ModalSlot;
use crate::util::format;

/// Form state for `mode`; creates are bound to `station`.
#[must_use]
pub fn initial_form(mode: &ModalMode<Product>, station: &str) -> ProductForm {
    match mode.entity() {
        Some(product) => ProductForm {
            station: Some(station.to_owned()),
            ..ProductForm::from_entity(product)
        },
        None => ProductForm::for_station(station),
    }
}

#[component]
pub fn ProductModal(
    mode: ModalMode<Product>,
    station: String,
    can_edit: bool,
    on_close: Callback<()>,
    on_saved: Callback<EntityKind>,
) -> impl IntoView {
    let title = mode.title("Product", |p| p.name.clone());
    let body = match mode.clone() {
        ModalMode::View(product) => view! { <ProductDetails product station can_edit/> }.into_any(),
        form_mode => view! { <ProductFormBody mode=form_mode station on_close on_saved/> }.into_any(),
    };
    view! {
        <ModalFrame title on_close wide=true>
            {body}
        </ModalFrame>
    }
}

#[component]
fn ProductDetails(product: Product, station: String, can_edit: bool) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let slot = expect_context::<RwSignal<ModalSlot<ActiveModal>>>();
    let model = ProductCardModel::new(&product, taxonomy.get_untracked().provider());
    let opt = |v: &Option<String>| format::text_or_placeholder(v.as_deref());

    let edit = can_edit.then(|| {
        let target = product.clone();
        view! {
            <footer class="dialog__actions">
                <button
                    class="btn btn--primary"
                    on:click=move |_| {
                        let modal = ActiveModal::Product {
                            mode: ModalMode::Edit(target.clone()),
                            station: station.clone(),
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
            <h3>"Overview"</h3>
            <dl class="detail-list">
                <DetailRow label="Type" value=model.kind.label.clone()/>
                <DetailRow
                    label="Processing level"
                    value=model.level.as_ref().map_or_else(|| format::NOT_SET.to_owned(), |l| l.label.clone())
                />
                <DetailRow
                    label="Quality"
                    value=model.quality_label.clone().unwrap_or_else(|| format::NOT_SET.to_owned())
                />
                <DetailRow label="Period" value=model.period.clone()/>
                <DetailRow label="Product date" value=format::date(product.product_date.as_deref())/>
            </dl>
        </section>
        <section class="dialog__section">
            <h3>"Data access"</h3>
            <dl class="detail-list">
                <DetailRow label="Path" value=opt(&product.data_path)/>
                <div class="detail-row">
                    <dt>"URL"</dt>
                    <dd>
                        {match product.data_url.clone().filter(|u| !u.trim().is_empty()) {
                            Some(url) => {
                                let label = url.clone();
                                view! { <a href=url target="_blank" rel="noopener noreferrer">{label}</a> }.into_any()
                            }
                            None => format::NOT_SET.into_any(),
                        }}
                    </dd>
                </div>
                <DetailRow label="Checksum" value=opt(&product.checksum)/>
                <DetailRow label="Size" value=model.size.clone().unwrap_or_else(|| format::NOT_SET.to_owned())/>
            </dl>
        </section>
        <section class="dialog__section">
            <h3>"Citation & license"</h3>
            <dl class="detail-list">
                <DetailRow label="Citation" value=opt(&product.citation)/>
                <DetailRow label="License" value=opt(&product.license)/>
                <DetailRow label="DOI" value=opt(&product.doi)/>
            </dl>
        </section>
        {product.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
            <section class="dialog__section">
                <h3>"Description"</h3>
                <p class="dialog__text">{d}</p>
            </section>
        })}
        {edit}
    }
}

#[component]
fn ProductFormBody(
    mode: ModalMode<Product>,
    station: String,
    on_close: Callback<()>,
    on_saved: Callback<EntityKind>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let id = mode.entity().map(|p| p.id);
    let submit_label = mode.submit_label();
    let form = RwSignal::new(initial_form(&mode, &station));
    let errors = RwSignal::new(ValidationErrors::default());
    let saving = RwSignal::new(false);

    let types = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::ProductType));
    let levels = Signal::derive(move || taxonomy.get().provider().terms(Vocabulary::ProcessingLevel));

    let (name, set_name) = bind(form, |f| f.name.clone(), |f, v| f.name = v);
    let (kind, set_kind) = bind(form, |f| f.product_type.clone(), |f, v| f.product_type = v);
    let (level, set_level) = bind(form, |f| f.processing_level.clone(), |f, v| f.processing_level = v);
    let (quality, set_quality) = bind(form, |f| f.quality_score.clone(), |f, v| f.quality_score = v);
    let (date, set_date) = bind(form, |f| f.product_date.clone(), |f, v| f.product_date = v);
    let (start, set_start) = bind(form, |f| f.start_date.clone(), |f, v| f.start_date = v);
    let (end, set_end) = bind(form, |f| f.end_date.clone(), |f, v| f.end_date = v);
    let (path, set_path) = bind(form, |f| f.data_path.clone(), |f, v| f.data_path = v);
    let (url, set_url) = bind(form, |f| f.data_url.clone(), |f, v| f.data_url = v);
    let (checksum, set_checksum) = bind(form, |f| f.checksum.clone(), |f, v| f.checksum = v);
    let (size, set_size) = bind(form, |f| f.file_size_bytes.clone(), |f, v| f.file_size_bytes = v);
    let (citation, set_citation) = bind(form, |f| f.citation.clone(), |f, v| f.citation = v);
    let (license, set_license) = bind(form, |f| f.license.clone(), |f, v| f.license = v);
    let (doi, set_doi) = bind(form, |f| f.doi.clone(), |f, v| f.doi = v);
    let (description, set_description) = bind(form, |f| f.description.clone(), |f, v| f.description = v);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        spawn_submit(form.get_untracked(), id, errors, saving, on_saved);
    };

    view! {
        <form class="dialog__form" novalidate=true on:submit=on_submit>
            <TextField label="Name" field="name" value=name on_input=set_name errors required=true/>
            <div class="field-row">
                <SelectField label="Type" field="product_type" value=kind options=types on_change=set_kind errors/>
                <SelectField
                    label="Processing level"
                    field="processing_level"
                    value=level
                    options=levels
                    on_change=set_level
                    errors
                />
                <TextField
                    label="Quality score"
                    field="quality_score"
                    value=quality
                    on_input=set_quality
                    errors
                    input_type="number"
                    placeholder="0-100"
                />
            </div>
            <div class="field-row">
                <TextField label="Product date" field="product_date" value=date on_input=set_date errors input_type="date"/>
                <TextField label="Start date" field="start_date" value=start on_input=set_start errors input_type="date"/>
                <TextField label="End date" field="end_date" value=end on_input=set_end errors input_type="date"/>
            </div>
            <TextField label="Data path" field="data_path" value=path on_input=set_path errors/>
            <TextField label="Data URL" field="data_url" value=url on_input=set_url errors input_type="url"/>
            <div class="field-row">
                <TextField label="Checksum" field="checksum" value=checksum on_input=set_checksum errors/>
                <TextField
                    label="File size (bytes)"
                    field="file_size_bytes"
                    value=size
                    on_input=set_size
                    errors
                    input_type="number"
                />
            </div>
            <TextAreaField label="Citation" field="citation" value=citation on_input=set_citation errors/>
            <div class="field-row">
                <TextField label="License" field="license" value=license on_input=set_license errors/>
                <TextField label="DOI" field="doi" value=doi on_input=set_doi errors/>
            </div>
            <TextAreaField
                label="Description"
                field="description"
                value=description
                on_input=set_description
                errors
            />
            <FormActions saving on_cancel=on_close submit_label=submit_label/>
        </form>
    }
}
