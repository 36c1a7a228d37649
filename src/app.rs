use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WeatherPandaApp {
    pub state: AppState,
}

impl WeatherPandaApp {
    /// Build the app and load the default CSV path right away.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.reload_source();
        Self { state }
    }
}

impl eframe::App for WeatherPandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: source and column mapping ----
        egui::SidePanel::left("source_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, trend, data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &mut self.state);
        });
    }
}
