use thiserror::Error;

/// Everything that can stop the dashboard from producing a view.
///
/// All variants are terminal for the current source/selection: the UI shows
/// the message and waits for the user to change something. Per-cell problems
/// (a non-numeric temperature, an unparsable date) never surface here.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Bad path, unreadable bytes, or text that is not a well-formed CSV.
    #[error("failed to read CSV: {0}")]
    SourceRead(String),

    /// The CSV parsed but holds no data rows.
    #[error("your CSV appears to be empty")]
    EmptyInput,

    /// Nothing numeric left in the temperature column after cleaning.
    #[error("no valid temperature data after cleaning; check the column selection and units")]
    NoUsableData,

    #[error("column '{0}' does not exist in the loaded table")]
    UnknownColumn(String),

    #[error("failed to write processed CSV: {0}")]
    Export(String),
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::SourceRead(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
