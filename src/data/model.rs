use std::fmt;

use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the loaded table
// ---------------------------------------------------------------------------

/// Tokens a dataframe loader treats as "no value".
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A dynamically-typed cell. Numbers are detected at load time but keep the
/// field text they were read from, so `007` or `1.50` are written back as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number { value: f64, raw: String },
    Text(String),
    Missing,
}

impl CellValue {
    /// Classify a raw CSV field.
    pub fn parse(raw: &str) -> Self {
        if MISSING_TOKENS.contains(&raw) {
            return CellValue::Missing;
        }
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_nan() => CellValue::Missing,
            Ok(value) => CellValue::Number {
                value,
                raw: raw.to_string(),
            },
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    /// A computed number, rendered in its shortest round-tripping form.
    pub fn number(value: f64) -> Self {
        CellValue::Number {
            value,
            raw: value.to_string(),
        }
    }

    /// Numeric view of the cell; text and missing cells have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl From<Option<f64>> for CellValue {
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(v) if !v.is_nan() => CellValue::number(v),
            _ => CellValue::Missing,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number { raw, .. } => write!(f, "{raw}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

/// One named column of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// The loaded dataset: ordered, named, equal-length columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table, rejecting columns of unequal length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |c| c.values.len());
        if let Some(bad) = columns.iter().find(|c| c.values.len() != n_rows) {
            return Err(DashboardError::SourceRead(format!(
                "column '{}' has {} values, expected {n_rows}",
                bad.name,
                bad.values.len()
            )));
        }
        Ok(Table { columns, n_rows })
    }

    /// Column names in their original order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Table::column`] but a missing name is an error.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| DashboardError::UnknownColumn(name.to_string()))
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}
