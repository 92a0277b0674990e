//! Hearth Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod markdown;
mod models;
mod paging;
mod store;

use app::App;
use config::{load_actor, AppConfig};
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let loaded = AppConfig::load();
    let config = loaded.clone().unwrap_or_default();
    if let Err(e) = rolling_logger::init_logger("Hearth", config.log_capacity, log::LevelFilter::Debug) {
        web_sys::console::warn_1(&format!("[MAIN] logger not installed: {}", e).into());
    }
    if let Err(e) = loaded {
        log::warn!("{}", e);
    }

    let actor = load_actor();
    mount_to_body(move || view! { <App config=config actor=actor /> });
}
