//! Client state shared by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain structs held in `RwSignal`s and provided through context at the app
//! root. Everything here is testable without a browser; async helpers are
//! generic over [`crate::net::CatalogApi`] so tests can drive them with a mock.

pub mod auth;
pub mod campaigns;
pub mod inline_edit;
pub mod modal;
pub mod sites;
pub mod station;
pub mod toast;
