use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{DashboardError, Result};

use super::model::{CellValue, Table};
use super::roles::{safe_index, RoleGuess};
use super::timestamp::{parse_timestamp, to_epoch_seconds};
use super::units::{coerce_numeric, to_celsius, TemperatureUnit};

/// Legend / header name of the converted temperature series.
pub const CELSIUS_SERIES: &str = "Temperature (°C)";
/// Legend name of the humidity series.
pub const HUMIDITY_SERIES: &str = "Humidity (%)";

// ---------------------------------------------------------------------------
// ColumnSelection – the user's role/unit choices
// ---------------------------------------------------------------------------

/// Which columns play which role, and the unit of the temperature column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    pub temperature: String,
    pub humidity: Option<String>,
    pub time_axis: Option<String>,
    pub unit: TemperatureUnit,
}

impl ColumnSelection {
    /// Seed the selectors from a heuristic guess.
    ///
    /// The temperature column falls back to the first column when nothing
    /// matched. Returns `None` only for a table without columns.
    pub fn from_guess(columns: &[String], guess: &RoleGuess) -> Option<Self> {
        let temp_idx = safe_index(columns, guess.temperature.as_deref(), 0, 0);
        let temperature = columns.get(temp_idx).or_else(|| columns.first())?.clone();

        // Optional selectors have a sentinel at position 0, so a match lands
        // at 1.. and "no match" stays on the sentinel.
        let optional = |value: Option<&str>| {
            let idx = safe_index(columns, value, 1, 0);
            idx.checked_sub(1).and_then(|i| columns.get(i)).cloned()
        };

        Some(ColumnSelection {
            temperature,
            humidity: optional(guess.humidity.as_deref()),
            time_axis: optional(guess.time_axis.as_deref()),
            unit: TemperatureUnit::default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Full-length numeric series for the selected columns, one entry per
/// table row.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSeries {
    /// Temperature in the source unit, non-numeric cells as `None`.
    pub temperature: Vec<Option<f64>>,
    pub celsius: Vec<Option<f64>>,
    pub humidity: Option<Vec<Option<f64>>>,
}

/// Coerce the chosen columns to numbers and convert temperature to °C.
pub fn clean(table: &Table, selection: &ColumnSelection) -> Result<CleanedSeries> {
    let temperature = coerce_numeric(&table.require_column(&selection.temperature)?.values);
    let humidity = match &selection.humidity {
        Some(name) => Some(coerce_numeric(&table.require_column(name)?.values)),
        None => None,
    };
    let celsius = to_celsius(&temperature, selection.unit);
    Ok(CleanedSeries {
        temperature,
        celsius,
        humidity,
    })
}

// ---------------------------------------------------------------------------
// WorkingFrame – what gets plotted
// ---------------------------------------------------------------------------

/// Index entry of one plotted row.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexKey {
    /// Position in the source table.
    Row(usize),
    Time(NaiveDateTime),
    /// Time-axis cell that could not be parsed as a date.
    Raw(CellValue),
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Row(i) => write!(f, "{i}"),
            IndexKey::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            IndexKey::Raw(v) => write!(f, "{v}"),
        }
    }
}

/// The plot table: Celsius series, optional humidity, and an index.
/// Rows where every plotted series is missing are already gone.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingFrame {
    /// Name of the time-axis column, `None` when indexed by row.
    pub index_name: Option<String>,
    pub index: Vec<IndexKey>,
    pub celsius: Vec<Option<f64>>,
    pub humidity: Option<Vec<Option<f64>>>,
    /// Source table row of each kept row.
    pub source_rows: Vec<usize>,
}

/// How the x-axis of the trend chart is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    RowIndex,
    /// Seconds since the Unix epoch.
    Time,
    /// The time-axis column held plain numbers (e.g. day of month).
    Numeric,
    /// Mixed or textual index; x is the position and labels carry the text.
    Ordinal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotAxis {
    pub kind: AxisKind,
    pub name: String,
    pub xs: Vec<f64>,
    pub labels: Vec<String>,
}

impl WorkingFrame {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Non-missing Celsius values in row order.
    pub fn valid_celsius(&self) -> Vec<f64> {
        self.celsius.iter().flatten().copied().collect()
    }

    /// Lay the index out as x coordinates.
    pub fn x_axis(&self) -> PlotAxis {
        let labels: Vec<String> = self.index.iter().map(|k| k.to_string()).collect();
        let name = self
            .index_name
            .clone()
            .unwrap_or_else(|| "row".to_string());

        let all_rows = self.index.iter().all(|k| matches!(k, IndexKey::Row(_)));
        let times: Option<Vec<f64>> = self
            .index
            .iter()
            .map(|k| match k {
                IndexKey::Time(t) => Some(to_epoch_seconds(t)),
                _ => None,
            })
            .collect();
        let numbers: Option<Vec<f64>> = self
            .index
            .iter()
            .map(|k| match k {
                IndexKey::Raw(v) => v.as_f64(),
                _ => None,
            })
            .collect();

        let (kind, xs) = if all_rows {
            let xs = self
                .index
                .iter()
                .map(|k| match k {
                    IndexKey::Row(i) => *i as f64,
                    _ => 0.0,
                })
                .collect();
            (AxisKind::RowIndex, xs)
        } else if let Some(xs) = times {
            (AxisKind::Time, xs)
        } else if let Some(xs) = numbers {
            (AxisKind::Numeric, xs)
        } else {
            (AxisKind::Ordinal, (0..self.len()).map(|i| i as f64).collect())
        };

        PlotAxis {
            kind,
            name,
            xs,
            labels,
        }
    }
}

/// Build the working frame from the table and the current selection.
pub fn assemble(table: &Table, selection: &ColumnSelection) -> Result<WorkingFrame> {
    let cleaned = clean(table, selection)?;
    assemble_cleaned(table, selection, &cleaned)
}

fn assemble_cleaned(
    table: &Table,
    selection: &ColumnSelection,
    cleaned: &CleanedSeries,
) -> Result<WorkingFrame> {
    if table.is_empty() {
        return Err(DashboardError::EmptyInput);
    }

    let full_index: Vec<IndexKey> = match &selection.time_axis {
        Some(name) => table
            .require_column(name)?
            .values
            .iter()
            .map(index_key_for)
            .collect(),
        None => (0..table.len()).map(IndexKey::Row).collect(),
    };

    let keep: Vec<usize> = (0..table.len())
        .filter(|&i| {
            cleaned.celsius[i].is_some()
                || cleaned
                    .humidity
                    .as_ref()
                    .is_some_and(|h| h[i].is_some())
        })
        .collect();

    let frame = WorkingFrame {
        index_name: selection.time_axis.clone(),
        index: keep.iter().map(|&i| full_index[i].clone()).collect(),
        celsius: keep.iter().map(|&i| cleaned.celsius[i]).collect(),
        humidity: cleaned
            .humidity
            .as_ref()
            .map(|h| keep.iter().map(|&i| h[i]).collect()),
        source_rows: keep,
    };

    if frame.celsius.iter().all(Option::is_none) {
        log::warn!(
            "column '{}' has no numeric values after cleaning",
            selection.temperature
        );
        return Err(DashboardError::NoUsableData);
    }

    log::debug!(
        "working frame: {} of {} rows kept",
        frame.len(),
        table.len()
    );
    Ok(frame)
}

/// Parse a time-axis cell, falling back to the raw value.
fn index_key_for(cell: &CellValue) -> IndexKey {
    match cell {
        CellValue::Text(s) => match parse_timestamp(s) {
            Some(t) => IndexKey::Time(t),
            None => IndexKey::Raw(cell.clone()),
        },
        other => IndexKey::Raw(other.clone()),
    }
}
