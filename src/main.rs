// Prevent console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod commands;
mod engine;
mod message;
mod preview;
mod ui;
mod ui_viewer;
mod ui_welcome;
mod update;

use app::CropApp;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub fn main() -> iced::Result {
    human_panic::setup_panic!();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    iced::run(CropApp::update, CropApp::view)
}
