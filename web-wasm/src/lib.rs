//! Booking Register Extractor Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod logging;
mod platform;

use log::LevelFilter;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    leptos::mount::mount_to_body(app::App);
}
