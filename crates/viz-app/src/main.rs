//! CSR entry point for the chart dashboard

mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    init_tracing();

    tracing::info!("starting chart dashboard");
    mount_to_body(App);
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {
    tracing_wasm::set_as_global_default();
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
}
