//! Inline cell editing for the instrument table.
//!
//! Flow: [`begin`] captures the current value into an editor; Enter or blur
//! calls [`apply`], which writes the draft into the row immediately and hands
//! back a [`PendingEdit`]; the page PATCHes it with [`send`] and feeds the
//! result to [`settle`], which rolls the row back and raises an error toast on
//! failure. Escape simply drops the editor.

#[cfg(test)]
#[path = "inline_edit_test.rs"]
mod inline_edit_test;

use catalog::Instrument;
use catalog::taxonomy::Vocabulary;
use serde_json::{Map, Value};

use crate::net::{ApiError, CatalogApi};
use crate::state::toast::ToastQueue;

/// Longest display name accepted inline.
pub const MAX_DISPLAY_NAME: usize = 100;

/// Instrument columns that can be edited in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditableField {
    DisplayName,
    Status,
    MeasurementStatus,
}

impl EditableField {
    /// API field name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::DisplayName => "display_name",
            Self::Status => "status",
            Self::MeasurementStatus => "measurement_status",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DisplayName => "Display name",
            Self::Status => "Status",
            Self::MeasurementStatus => "Measurement status",
        }
    }

    /// Vocabulary for select editors; `None` for free text.
    #[must_use]
    pub fn vocabulary(self) -> Option<Vocabulary> {
        match self {
            Self::DisplayName => None,
            Self::Status => Some(Vocabulary::InstrumentStatus),
            Self::MeasurementStatus => Some(Vocabulary::MeasurementStatus),
        }
    }

    fn read(self, row: &Instrument) -> Option<String> {
        match self {
            Self::DisplayName => Some(row.display_name.clone()),
            Self::Status => row.status.clone(),
            Self::MeasurementStatus => row.measurement_status.clone(),
        }
    }

    fn write(self, row: &mut Instrument, value: Option<String>) {
        match self {
            Self::DisplayName => row.display_name = value.unwrap_or_default(),
            Self::Status => row.status = value,
            Self::MeasurementStatus => row.measurement_status = value,
        }
    }
}

/// An open cell editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellEditor {
    pub row_id: i64,
    pub field: EditableField,
    pub draft: String,
}

/// A value written optimistically and not yet confirmed by the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEdit {
    pub row_id: i64,
    pub field: EditableField,
    pub previous: Option<String>,
    pub value: Option<String>,
}

impl PendingEdit {
    /// PATCH body carrying only the edited field.
    #[must_use]
    pub fn payload(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            self.field.key().to_owned(),
            self.value.clone().map_or(Value::Null, Value::String),
        );
        Value::Object(body)
    }
}

/// Why a draft was not applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditRejected {
    #[error("nothing changed")]
    Unchanged,
    #[error("row {0} is no longer listed")]
    MissingRow(i64),
    #[error("{0}")]
    Invalid(String),
}

/// Open an editor on `row` with its current value.
#[must_use]
pub fn begin(row: &Instrument, field: EditableField) -> CellEditor {
    CellEditor {
        row_id: row.id,
        field,
        draft: field.read(row).unwrap_or_default(),
    }
}

fn normalize_draft(editor: &CellEditor) -> Result<Option<String>, EditRejected> {
    let trimmed = editor.draft.trim();
    if editor.field == EditableField::DisplayName {
        if trimmed.is_empty() {
            return Err(EditRejected::Invalid(format!("{} is required", editor.field.label())));
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME {
            return Err(EditRejected::Invalid(format!(
                "{} must be at most {MAX_DISPLAY_NAME} characters",
                editor.field.label()
            )));
        }
    }
    Ok((!trimmed.is_empty()).then(|| trimmed.to_owned()))
}

/// Write the draft into its row.
///
/// # Errors
///
/// Rejects unchanged values, rows that disappeared, and invalid drafts;
/// in every such case the rows are left untouched.
pub fn apply(rows: &mut [Instrument], editor: &CellEditor) -> Result<PendingEdit, EditRejected> {
    let value = normalize_draft(editor)?;
    let row = rows
        .iter_mut()
        .find(|r| r.id == editor.row_id)
        .ok_or(EditRejected::MissingRow(editor.row_id))?;
    let previous = editor.field.read(row);
    if previous.as_deref().map(str::trim) == value.as_deref() {
        return Err(EditRejected::Unchanged);
    }
    editor.field.write(row, value.clone());
    Ok(PendingEdit {
        row_id: editor.row_id,
        field: editor.field,
        previous,
        value,
    })
}

/// Restore the value a pending edit replaced.
pub fn rollback(rows: &mut [Instrument], pending: &PendingEdit) {
    if let Some(row) = rows.iter_mut().find(|r| r.id == pending.row_id) {
        pending.field.write(row, pending.previous.clone());
    }
}

/// PATCH the edited field.
///
/// # Errors
///
/// Propagates the API failure so [`settle`] can roll back.
pub async fn send<A: CatalogApi>(api: &A, pending: &PendingEdit) -> Result<(), ApiError> {
    api.patch_instrument(pending.row_id, &pending.payload()).await
}

/// Finish an edit: keep it on success, roll back and report on failure.
pub fn settle(rows: &mut [Instrument], toasts: &mut ToastQueue, pending: &PendingEdit, result: Result<(), ApiError>) {
    match result {
        Ok(()) => {
            toasts.success(format!("{} updated", pending.field.label()));
        }
        Err(err) => {
            log::warn!("inline edit of instrument {} failed: {err}", pending.row_id);
            rollback(rows, pending);
            toasts.error(format!("Could not update {}: {err}", pending.field.label().to_lowercase()));
        }
    }
}
