use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::CellValue;

/// Unit of the raw temperature column. Fixed for the whole table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 2] = [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Numeric view of a column: anything that is not a number becomes `None`.
pub fn coerce_numeric(cells: &[CellValue]) -> Vec<Option<f64>> {
    cells.iter().map(CellValue::as_f64).collect()
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Convert a temperature series to Celsius. Missing values stay missing.
pub fn to_celsius(series: &[Option<f64>], unit: TemperatureUnit) -> Vec<Option<f64>> {
    match unit {
        TemperatureUnit::Celsius => series.to_vec(),
        TemperatureUnit::Fahrenheit => series
            .iter()
            .map(|v| v.map(fahrenheit_to_celsius))
            .collect(),
    }
}
