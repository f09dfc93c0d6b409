//! Networking modules for the catalog REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `endpoints` builds request paths, `api` defines the [`api::CatalogApi`]
//! seam plus its `gloo-net` implementation, and `error` classifies failures
//! so pages can decide between a toast, a rollback and a login redirect.

pub mod api;
pub mod endpoints;
pub mod error;

#[cfg(test)]
pub(crate) mod mock;

pub use api::{CatalogApi, HttpApi};
pub use error::ApiError;
