//! Bills Frontend Entry Point

mod app;
mod components;
mod context;
mod error;
mod format;
mod models;
mod routes;
mod session;
mod store;
mod upload;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
