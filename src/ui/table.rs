use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::frame::CELSIUS_SERIES;
use crate::data::model::Table;
use crate::state::DashboardView;

const ROW_HEIGHT: f32 = 18.0;

/// Raw data view: the loaded table with the selected temperature and
/// humidity columns shown as numbers, plus the Celsius column.
pub fn raw_data_table(ui: &mut Ui, table: &Table, view: &DashboardView) {
    let selection = &view.selection;
    let mut headers = table.column_names();
    headers.push(CELSIUS_SERIES.to_string());

    let cell_text = |row: usize, col: usize| -> String {
        let Some(column) = table.columns().get(col) else {
            return fmt_opt(view.cleaned.celsius[row]);
        };
        if column.name == selection.temperature {
            fmt_opt(view.cleaned.temperature[row])
        } else if selection.humidity.as_deref() == Some(column.name.as_str()) {
            view.cleaned
                .humidity
                .as_ref()
                .map(|h| fmt_opt(h[row]))
                .unwrap_or_else(|| column.values[row].to_string())
        } else {
            column.values[row].to_string()
        }
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(300.0)
        .columns(Column::auto().at_least(60.0), headers.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for name in &headers {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.len(), |mut row| {
                let i = row.index();
                for c in 0..headers.len() {
                    row.col(|ui| {
                        ui.label(cell_text(i, c));
                    });
                }
            });
        });
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}
