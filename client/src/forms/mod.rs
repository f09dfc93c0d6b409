//! Entity edit forms: input-state structs, validation and submission.
//!
//! SYSTEM CONTEXT
//! ==============
//! Modals bind their inputs to one of these structs. [`submit`] validates
//! first and only then calls the API, so invalid input never leaves the
//! browser; the modal keeps the form (and the user's input) on any error.

pub mod campaign;
pub mod instrument;
pub mod maintenance;
pub mod product;


use catalog::TaxonomyProvider;
use catalog::validate::ValidationErrors;
use serde_json::Value;

use crate::net::{ApiError, CatalogApi};

pub use campaign::CampaignForm;
pub use instrument::InstrumentForm;
pub use maintenance::MaintenanceForm;
pub use product::ProductForm;

/// Which collection a form saves into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Campaign,
    Instrument,
    Maintenance,
}

impl EntityKind {
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Campaign => "Campaign",
            Self::Instrument => "Instrument",
            Self::Maintenance => "Maintenance record",
        }
    }
}

/// A form backing a create/edit modal.
pub trait EntityForm: Clone + Default {
    type Entity;
    const KIND: EntityKind;

    /// Prefill from an existing entity for editing.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Check every field and build the request body.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any check fails.
    fn validate(&self, taxonomy: &dyn TaxonomyProvider) -> Result<Value, ValidationErrors>;
}

/// Why a submission did not go through.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("please fix the highlighted fields")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Field messages to render inline, if this was a validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Api(_) => None,
        }
    }
}

/// Validate `form` and save it: POST when `id` is `None`, PUT otherwise.
///
/// Returns the success message for the toast.
///
/// # Errors
///
/// [`SubmitError::Invalid`] without touching the API, or
/// [`SubmitError::Api`] when the request fails.
pub async fn submit<A: CatalogApi, F: EntityForm>(
    api: &A,
    form: &F,
    id: Option<i64>,
    taxonomy: &dyn TaxonomyProvider,
) -> Result<String, SubmitError> {
    let payload = form.validate(taxonomy).map_err(SubmitError::Invalid)?;
    save(api, F::KIND, id, &payload).await?;
    let verb = if id.is_some() { "updated" } else { "created" };
    Ok(format!("{} {verb}", F::KIND.noun()))
}

/// Dispatch a save to the endpoint for `kind`.
///
/// # Errors
///
/// Propagates the API failure.
pub async fn save<A: CatalogApi>(api: &A, kind: EntityKind, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
    match kind {
        EntityKind::Product => api.save_product(id, payload).await,
        EntityKind::Campaign => api.save_campaign(id, payload).await,
        EntityKind::Instrument => api.save_instrument(id, payload).await,
        EntityKind::Maintenance => api.save_maintenance(id, payload).await,
    }
}

/// Trimmed text, or JSON `null` when blank.
pub(crate) fn text(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() { Value::Null } else { Value::String(trimmed.to_owned()) }
}

/// Input value for an optional string field.
pub(crate) fn input(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// Input value for an optional number, without a trailing `.0`.
pub(crate) fn number_input(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub(crate) fn number_value(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

pub(crate) fn canonical(key: Option<String>) -> Value {
    key.map_or(Value::Null, Value::String)
}

/// Date input value (`YYYY-MM-DD`) for an optional ISO string.
pub(crate) fn date_input(value: Option<&String>) -> String {
    value.map(|raw| catalog::dates::display_date(raw)).unwrap_or_default()
}

/// Datetime-local input value for an optional ISO string.
pub(crate) fn datetime_input(value: Option<&String>) -> String {
    value.map(|raw| catalog::dates::to_datetime_local(raw)).unwrap_or_default()
}
