use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::temperature_tint;
use crate::data::export::EXPORT_FILE_NAME;
use crate::data::roles::{NO_HUMIDITY, ROW_INDEX_AXIS};
use crate::data::units::TemperatureUnit;
use crate::error::DashboardError;
use crate::state::{AppState, DashboardView, InputMode, SourceStatus, UploadedFile};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – data source and column mapping
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Data Source");
            ui.separator();
            source_controls(ui, state);

            ui.add_space(12.0);
            ui.heading("Columns & Units");
            ui.separator();
            column_selectors(ui, state);
        });
}

fn source_controls(ui: &mut Ui, state: &mut AppState) {
    ui.label("Choose input method:");
    let mut mode = state.input_mode;
    ui.radio_value(&mut mode, InputMode::DefaultPath, "Use default path");
    ui.radio_value(&mut mode, InputMode::Upload, "Upload CSV");
    state.set_input_mode(mode);
    ui.add_space(4.0);

    match state.input_mode {
        InputMode::DefaultPath => {
            ui.label("CSV path");
            let response = ui.text_edit_singleline(&mut state.csv_path);
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if submitted || ui.button("Load").clicked() {
                state.load_from_path();
            }
        }
        InputMode::Upload => {
            if ui.button("Upload CSV…").clicked() {
                upload_file_dialog(state);
            }
        }
    }

    match &state.source_status {
        SourceStatus::Waiting => {}
        SourceStatus::Loaded { label, rows } => {
            ui.label(RichText::new(format!("Loaded {rows} rows from {label}")).color(Color32::GREEN));
        }
        SourceStatus::Failed(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
    }
}

fn column_selectors(ui: &mut Ui, state: &mut AppState) {
    let columns = match &state.table {
        Some(table) => table.column_names(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };
    let Some(mut sel) = state.selection.clone() else {
        return;
    };

    ui.strong("Temperature column");
    egui::ComboBox::from_id_salt("temperature_column")
        .selected_text(&sel.temperature)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                ui.selectable_value(&mut sel.temperature, col.clone(), col);
            }
        });

    ui.strong("Humidity column (optional)");
    optional_column_combo(ui, "humidity_column", NO_HUMIDITY, &columns, &mut sel.humidity);

    ui.strong("Temperature unit in CSV");
    egui::ComboBox::from_id_salt("temperature_unit")
        .selected_text(sel.unit.symbol())
        .show_ui(ui, |ui: &mut Ui| {
            for unit in TemperatureUnit::ALL {
                ui.selectable_value(&mut sel.unit, unit, unit.symbol());
            }
        });

    ui.strong("X-axis column (optional)");
    optional_column_combo(ui, "x_axis_column", ROW_INDEX_AXIS, &columns, &mut sel.time_axis);

    state.update_selection(sel);
}

/// A column picker whose first entry is a sentinel meaning "unbound".
fn optional_column_combo(
    ui: &mut Ui,
    id: &str,
    sentinel: &str,
    columns: &[String],
    value: &mut Option<String>,
) {
    let selected = value.clone().unwrap_or_else(|| sentinel.to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(value, None, sentinel);
            for col in columns {
                ui.selectable_value(value, Some(col.clone()), col);
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – metrics, chart, tables, download
// ---------------------------------------------------------------------------

/// Render the dashboard body for the current view.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Weather Dashboard");
    ui.label(RichText::new("Load a CSV, pick columns, auto-convert °F→°C, and explore.").weak());
    ui.separator();

    let view = match &state.view {
        Some(Ok(view)) => view,
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
        None => {
            empty_state(ui, state);
            return;
        }
    };

    let mut save_requested = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metrics(ui, view);
            ui.add_space(8.0);

            ui.heading("Trend");
            plot::trend_plot(ui, &view.frame);
            ui.add_space(8.0);

            egui::CollapsingHeader::new("Show raw data")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    if let Some(t) = &state.table {
                        table::raw_data_table(ui, t, view);
                    }
                });
            ui.add_space(8.0);

            temperature_list(ui, view);
            ui.add_space(8.0);

            ui.heading("Download processed data");
            if ui.button("Download CSV (with Temperature °C)").clicked() {
                save_requested = true;
            }
            ui.add_space(8.0);
            ui.label(
                RichText::new(
                    "Tip: If your CSV is in °F, set 'Temperature unit in CSV' to °F to auto-convert.",
                )
                .weak(),
            );
        });

    if save_requested {
        save_file_dialog(state);
    }
}

fn empty_state(ui: &mut Ui, state: &AppState) {
    if let SourceStatus::Failed(e) = &state.source_status {
        ui.label(RichText::new(e.to_string()).color(Color32::RED));
        return;
    }
    let message = waiting_hint(state.input_mode);
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(message);
    });
}

/// Prompt shown while no table is loaded. File → Open switches to upload mode.
fn waiting_hint(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Upload => "Please upload a CSV to continue.",
        InputMode::DefaultPath => {
            "Enter a CSV path and press Load, or use File → Open… to switch to uploading a CSV."
        }
    }
}

fn metrics(ui: &mut Ui, view: &DashboardView) {
    let stats = &view.stats;
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Average Temp (°C)", stats.mean);
        metric(&mut cols[1], "Min Temp (°C)", stats.min);
        metric(&mut cols[2], "Max Temp (°C)", stats.max);
    });
}

fn metric(ui: &mut Ui, label: &str, value: f64) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(format!("{value:.1}")).size(28.0).strong());
}

fn temperature_list(ui: &mut Ui, view: &DashboardView) {
    ui.heading("Temperatures (°C)");
    let values = view.frame.valid_celsius();
    ScrollArea::vertical()
        .id_salt("temperature_list")
        .max_height(240.0)
        .show(ui, |ui: &mut Ui| {
            for (line, value) in view.listing.lines.iter().zip(&values) {
                ui.label(RichText::new(line).color(temperature_tint(*value)));
            }
        });
    if let Some(note) = view.listing.truncation_note() {
        ui.label(RichText::new(note).italics());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                upload_file_dialog(state);
                ui.close_menu();
            }
            let can_save = state.current_view().is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save processed CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(t), Some(view)) = (&state.table, state.current_view()) {
            ui.label(format!(
                "{} rows loaded, {} plotted",
                t.len(),
                view.frame.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn upload_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        state.input_mode = InputMode::Upload;
        match std::fs::read(&path) {
            Ok(bytes) => state.load_upload(UploadedFile { name, bytes }),
            Err(e) => {
                let err = DashboardError::SourceRead(format!("{}: {e}", path.display()));
                state.ingest(name, Err(err));
            }
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download processed data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.save_export(&path);
    }
}
