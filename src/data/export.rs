use std::path::Path;

use crate::error::{DashboardError, Result};

use super::frame::{CleanedSeries, ColumnSelection, CELSIUS_SERIES};
use super::model::{CellValue, Table};

pub const EXPORT_FILE_NAME: &str = "weather_processed.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// The processed CSV, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlob {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

impl ExportBlob {
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.contents.as_bytes())
    }
}

/// Serialize the working table: every original column (temperature and
/// humidity as their numeric view) plus the Celsius column.
///
/// A column already named `Temperature (°C)` is overwritten in place
/// rather than duplicated.
pub fn export_csv(
    table: &Table,
    selection: &ColumnSelection,
    cleaned: &CleanedSeries,
) -> Result<ExportBlob> {
    let mut names: Vec<String> = Vec::with_capacity(table.n_columns() + 1);
    let mut columns: Vec<Vec<CellValue>> = Vec::with_capacity(table.n_columns() + 1);

    for col in table.columns() {
        let values = if col.name == CELSIUS_SERIES {
            numeric_cells(&cleaned.celsius)
        } else if col.name == selection.temperature {
            numeric_cells(&cleaned.temperature)
        } else if selection.humidity.as_deref() == Some(col.name.as_str()) {
            match &cleaned.humidity {
                Some(h) => numeric_cells(h),
                None => col.values.clone(),
            }
        } else {
            col.values.clone()
        };
        names.push(col.name.clone());
        columns.push(values);
    }
    if table.column(CELSIUS_SERIES).is_none() {
        names.push(CELSIUS_SERIES.to_string());
        columns.push(numeric_cells(&cleaned.celsius));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&names).map_err(export_error)?;
    for row in 0..table.len() {
        writer
            .write_record(columns.iter().map(|c| c[row].to_string()))
            .map_err(export_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Export(e.to_string()))?;
    let contents = String::from_utf8(bytes).map_err(|e| DashboardError::Export(e.to_string()))?;

    log::info!(
        "exported {} rows x {} columns as {EXPORT_FILE_NAME}",
        table.len(),
        names.len()
    );
    Ok(ExportBlob {
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
        contents,
    })
}

fn numeric_cells(series: &[Option<f64>]) -> Vec<CellValue> {
    series.iter().map(|v| CellValue::from(*v)).collect()
}

fn export_error(e: csv::Error) -> DashboardError {
    DashboardError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frame::clean;
    use crate::data::loader::load_bytes;
    use crate::data::units::{coerce_numeric, TemperatureUnit};

    fn fahrenheit_selection() -> ColumnSelection {
        ColumnSelection {
            temperature: "temp".into(),
            humidity: Some("hum".into()),
            time_axis: None,
            unit: TemperatureUnit::Fahrenheit,
        }
    }

    #[test]
    fn appends_celsius_column_and_coerces_selected_columns() {
        let table = load_bytes(b"station,temp,hum\nA,32,50\nB,hot,x\n").unwrap();
        let sel = fahrenheit_selection();
        let cleaned = clean(&table, &sel).unwrap();
        let blob = export_csv(&table, &sel, &cleaned).unwrap();

        assert_eq!(blob.file_name, "weather_processed.csv");
        assert_eq!(blob.mime, "text/csv");
        assert_eq!(
            blob.contents,
            "station,temp,hum,Temperature (°C)\nA,32,50,0\nB,,,\n"
        );
    }

    #[test]
    fn quotes_fields_containing_the_delimiter() {
        let table = load_bytes(b"station,temp\n\"Oslo, Blindern\",4\n").unwrap();
        let sel = ColumnSelection {
            temperature: "temp".into(),
            humidity: None,
            time_axis: None,
            unit: TemperatureUnit::Celsius,
        };
        let cleaned = clean(&table, &sel).unwrap();
        let blob = export_csv(&table, &sel, &cleaned).unwrap();
        assert!(blob.contents.contains("\"Oslo, Blindern\",4,4\n"));
    }

    #[test]
    fn unselected_columns_keep_their_source_text() {
        let table = load_bytes(b"station,reading,temp\n007,1.50,20\nB12,1e3,21\n").unwrap();
        let sel = ColumnSelection {
            temperature: "temp".into(),
            humidity: None,
            time_axis: None,
            unit: TemperatureUnit::Celsius,
        };
        let cleaned = clean(&table, &sel).unwrap();
        let blob = export_csv(&table, &sel, &cleaned).unwrap();
        assert_eq!(
            blob.contents,
            "station,reading,temp,Temperature (°C)\n007,1.50,20,20\nB12,1e3,21,21\n"
        );
    }

    #[test]
    fn existing_celsius_column_is_overwritten() {
        let table = load_bytes(b"temp,Temperature (\xC2\xB0C)\n212,stale\n").unwrap();
        let sel = ColumnSelection {
            temperature: "temp".into(),
            humidity: None,
            time_axis: None,
            unit: TemperatureUnit::Fahrenheit,
        };
        let cleaned = clean(&table, &sel).unwrap();
        let blob = export_csv(&table, &sel, &cleaned).unwrap();
        assert_eq!(blob.contents, "temp,Temperature (°C)\n212,100\n");
    }

    #[test]
    fn export_then_reload_keeps_rows_and_celsius_values() {
        let source = b"date,temp,hum,note\n\
            2024-01-01,71.3,40,\"calm, clear\"\n\
            2024-01-02,,55,\n\
            2024-01-03,64.94,,gusty\n\
            2024-01-04,n/a,,\n";
        let table = load_bytes(source).unwrap();
        let sel = fahrenheit_selection();
        let cleaned = clean(&table, &sel).unwrap();
        let blob = export_csv(&table, &sel, &cleaned).unwrap();

        let reloaded = load_bytes(blob.contents.as_bytes()).unwrap();
        assert_eq!(reloaded.len(), table.len());

        let celsius = coerce_numeric(&reloaded.column(CELSIUS_SERIES).unwrap().values);
        assert_eq!(celsius.len(), cleaned.celsius.len());
        for (got, want) in celsius.iter().zip(&cleaned.celsius) {
            match (got, want) {
                (Some(g), Some(w)) => assert!((g - w).abs() < 1e-6),
                (None, None) => {}
                other => panic!("mismatch: {other:?}"),
            }
        }
    }
}
