//! # trainer-shell
//!
//! Leptos + WASM front-end shell for the model training/testing application.
//!
//! This crate owns the client-side route table, the session context shared
//! with every view, the navigation guard that re-checks the backend session
//! before each route transition, and the configured HTTP client used to reach
//! the backend. Everything except `app`, `components` and `pages` is
//! framework-neutral and runs natively, which is how the `trainer-cli` probe
//! and the tests use it.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod guard;
pub mod net;
pub mod notify;
pub mod pages;
pub mod routes;
pub mod state;

/// Browser entry point: installs the panic hook and console logger, then
/// mounts the application on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
