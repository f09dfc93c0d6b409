//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render entity cards, modals, the map and table chrome while
//! reading shared state (taxonomy, toasts, modal slot) from Leptos context.

pub mod cards;
pub mod editable_cell;
pub mod map_view;
pub mod modals;
pub mod pagination;
pub mod search_box;
pub mod toast_host;
