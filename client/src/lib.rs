//! # portal-client
//!
//! Leptos + WASM front end for the college management portal.
//!
//! Holds the session lifecycle (credential store, token decoding, auth
//! context), the role guards and dashboard redirector, the section table
//! and the route-level pages. The `hydrate` feature builds the browser
//! bundle; `ssr` builds the server-rendered shell used by the host binary.
//! With neither feature the crate compiles natively for tests.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: install browser logging, then hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("portal client hydrating (api base {})", net::api::API_BASE);
    leptos::mount::hydrate_body(app::App);
}
