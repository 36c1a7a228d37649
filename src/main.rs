mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::WeatherPandaApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let cwd = std::env::current_dir().unwrap_or_default();
    let config = DashboardConfig::discover(&cwd).with_args(std::env::args().skip(1));
    log::info!("Default CSV path: {}", config.default_csv_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Weather Panda – Weather Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(WeatherPandaApp::new(config)))),
    )
}
