//! # client
//!
//! Leptos + WASM frontend for the FinanceTracker personal finance app.
//!
//! This crate contains pages, components, the session store, the typed REST
//! client for the remote finance API, and the wire DTOs. Server rendering is
//! provided by the root `fintrack` host crate through the `ssr` feature; the
//! browser bundle is built with the `hydrate` feature.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs console logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
