//! Todo Master Frontend Entry Point

mod config;
mod logger;
mod models;
mod api;
mod prompt_host;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    tracing::info!("starting, api base '{}'", config::api_base_url());
    mount_to_body(App);
}
