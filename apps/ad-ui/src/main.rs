#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::DashboardApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    // Optional dashboard config YAML as the only argument.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Additives dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Additives dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config_path)))),
    )
}
