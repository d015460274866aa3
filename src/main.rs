//! Project Desk Frontend Entry Point

mod api;
mod app;
mod browser;
mod calendar;
mod components;
mod config;
mod context;
mod error;
mod kanban;
mod ledger;
mod models;
mod repo_files;
mod routes;
mod session;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    // Only fails if a logger is already installed
    console_logger::init(config.log_level).ok();
    log::info!("starting Project Desk, API at {}", config.api_base);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
