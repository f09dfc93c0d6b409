//! Shared catalog model for the SITES Spectral front-end and CLI.
//!
//! This crate owns the entity DTOs handed down by the REST API, the list and
//! item envelopes that wrap them, the taxonomy provider used to label and
//! color them, and the client-side validation/query helpers. It has no
//! browser dependency so both `client` and `cli` can use it.

pub mod dates;
pub mod envelope;
pub mod model;
pub mod query;
pub mod taxonomy;
pub mod validate;

pub use envelope::{ItemResponse, ListLinks, ListMeta, ListResponse};
pub use model::{Campaign, Instrument, MaintenanceRecord, Platform, Product, Roi, Station};
pub use taxonomy::{BuiltinTaxonomy, LayeredTaxonomy, TaxonomyDocument, TaxonomyProvider};

/// Errors raised while decoding catalog payloads.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The payload was not valid JSON for the requested shape.
    #[error("failed to decode catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// A date or datetime string did not match any accepted ISO form.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}
