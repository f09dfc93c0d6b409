//! # client
//!
//! Leptos + WASM front-end for the SITES Spectral instrument catalog.
//!
//! Pages orchestrate fetch → filter/sort → render → edit loops against the
//! catalog REST API; components render cards, modals and the Leaflet map;
//! `state` and `forms` hold the pure logic those layers share, so it can be
//! unit tested without a browser. Browser-only code sits behind the `csr`
//! feature.

pub mod app;
pub mod components;
pub mod config;
pub mod forms;
pub mod map;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("sites spectral client starting");
    leptos::mount::mount_to_body(app::App);
}
