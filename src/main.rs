mod api;
mod app;
mod config;
mod models;
mod services;
mod ui;

use relm4::prelude::*;
use tracing_subscriber::EnvFilter;

use app::App;
use config::APP_ID;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = adw::Application::builder().application_id(APP_ID).build();

    RelmApp::from_app(app).run_async::<App>(());
}
