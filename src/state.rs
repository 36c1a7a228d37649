use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::export::{export_csv, ExportBlob};
use crate::data::frame::{assemble, clean, CleanedSeries, ColumnSelection, WorkingFrame};
use crate::data::loader::{load_bytes, load_path};
use crate::data::model::Table;
use crate::data::roles::guess_roles;
use crate::data::stats::{summarize, temperature_listing, TemperatureListing, TemperatureStats};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// DashboardView – everything derived from (table, selection)
// ---------------------------------------------------------------------------

/// Immutable result of one recomputation. Rebuilt from scratch whenever the
/// source or a selector changes; never patched in place.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub selection: ColumnSelection,
    pub cleaned: CleanedSeries,
    pub frame: WorkingFrame,
    pub stats: TemperatureStats,
    pub listing: TemperatureListing,
    pub export: ExportBlob,
}

impl DashboardView {
    pub fn build(table: &Table, selection: &ColumnSelection, listing_cap: usize) -> Result<Self> {
        let frame = assemble(table, selection)?;
        let cleaned = clean(table, selection)?;
        let stats = summarize(&frame.celsius).ok_or(DashboardError::NoUsableData)?;
        let listing = temperature_listing(&frame.celsius, listing_cap);
        let export = export_csv(table, selection, &cleaned)?;
        Ok(DashboardView {
            selection: selection.clone(),
            cleaned,
            frame,
            stats,
            listing,
            export,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Where the table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    DefaultPath,
    Upload,
}

/// A file picked through the upload dialog, kept as raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Outcome of the last load attempt.
#[derive(Debug)]
pub enum SourceStatus {
    /// Nothing to load yet (upload mode before a file is picked).
    Waiting,
    Loaded { label: String, rows: usize },
    Failed(DashboardError),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    pub input_mode: InputMode,

    /// Text of the CSV path field.
    pub csv_path: String,

    pub uploaded: Option<UploadedFile>,

    pub source_status: SourceStatus,

    /// Loaded table (None until a source loads successfully).
    pub table: Option<Arc<Table>>,

    /// Current role/unit choices; seeded from the column-name guess.
    pub selection: Option<ColumnSelection>,

    /// Derived view for the current table and selection.
    pub view: Option<Result<DashboardView>>,

    /// Status message shown in the top bar (export results and the like).
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            csv_path: config.default_csv_path.display().to_string(),
            config,
            input_mode: InputMode::DefaultPath,
            uploaded: None,
            source_status: SourceStatus::Waiting,
            table: None,
            selection: None,
            view: None,
            status_message: None,
        }
    }

    /// Re-read whatever the current input mode points at.
    pub fn reload_source(&mut self) {
        match self.input_mode {
            InputMode::DefaultPath => self.load_from_path(),
            InputMode::Upload => match self.uploaded.clone() {
                Some(file) => self.load_upload(file),
                None => {
                    self.clear_table();
                    self.source_status = SourceStatus::Waiting;
                }
            },
        }
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        if self.input_mode != mode {
            self.input_mode = mode;
            self.reload_source();
        }
    }

    pub fn load_from_path(&mut self) {
        let path = PathBuf::from(self.csv_path.trim());
        let label = path.display().to_string();
        let result = load_path(&path);
        self.ingest(label, result);
    }

    pub fn load_upload(&mut self, file: UploadedFile) {
        let result = load_bytes(&file.bytes);
        let label = file.name.clone();
        self.uploaded = Some(file);
        self.ingest(label, result);
    }

    /// Adopt the outcome of a load attempt.
    pub fn ingest(&mut self, label: String, result: Result<Table>) {
        match result {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {label}",
                    table.len(),
                    table.column_names()
                );
                self.source_status = SourceStatus::Loaded {
                    label,
                    rows: table.len(),
                };
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {label}: {e}");
                self.clear_table();
                self.source_status = SourceStatus::Failed(e);
            }
        }
    }

    /// Ingest a newly loaded table: guess roles and build the first view.
    pub fn set_table(&mut self, table: Table) {
        let columns = table.column_names();
        let guess = guess_roles(&columns);
        log::debug!("role guess: {guess:?}");

        self.selection = ColumnSelection::from_guess(&columns, &guess);
        self.table = Some(Arc::new(table));
        self.status_message = None;
        self.recompute();
    }

    fn clear_table(&mut self) {
        self.table = None;
        self.selection = None;
        self.view = None;
    }

    /// Replace the selection; recomputes only when something changed.
    pub fn update_selection(&mut self, selection: ColumnSelection) {
        if self.selection.as_ref() != Some(&selection) {
            self.selection = Some(selection);
            self.recompute();
        }
    }

    /// Rebuild the view from the unchanged table and current selection.
    pub fn recompute(&mut self) {
        self.view = match (&self.table, &self.selection) {
            (Some(table), Some(selection)) => {
                let view = DashboardView::build(table, selection, self.config.listing_cap);
                if let Err(e) = &view {
                    log::warn!("Cannot build dashboard: {e}");
                }
                Some(view)
            }
            _ => None,
        };
    }

    /// The view, if the last recomputation succeeded.
    pub fn current_view(&self) -> Option<&DashboardView> {
        self.view.as_ref().and_then(|v| v.as_ref().ok())
    }

    /// Write the processed CSV of the current view.
    pub fn save_export(&mut self, path: &std::path::Path) {
        let Some(view) = self.current_view() else {
            return;
        };
        let message = match view.export.write_to(path) {
            Ok(()) => {
                log::info!(
                    "Saved {} ({}) to {}",
                    view.export.file_name,
                    view.export.mime,
                    path.display()
                );
                format!("Saved {}", path.display())
            }
            Err(e) => {
                log::error!("Failed to save {}: {e}", path.display());
                format!("Error: failed to save {}: {e}", path.display())
            }
        };
        self.status_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::units::TemperatureUnit;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn upload(bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            name: "upload.csv".into(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn fahrenheit_scenario_stats() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_upload(upload(b"temp,hum\n32,50\n212,10\n"));

        let mut sel = state.selection.clone().unwrap();
        assert_eq!(sel.temperature, "temp");
        assert_eq!(sel.humidity.as_deref(), Some("hum"));
        sel.unit = TemperatureUnit::Fahrenheit;
        state.update_selection(sel);

        let view = state.current_view().unwrap();
        assert!((view.stats.mean - 50.0).abs() < 1e-9);
        assert!((view.stats.min - 0.0).abs() < 1e-9);
        assert!((view.stats.max - 100.0).abs() < 1e-9);
        assert_eq!(view.listing.lines, vec!["- 0.0°C", "- 100.0°C"]);
    }

    #[test]
    fn empty_upload_reports_empty_input_without_view() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_upload(upload(b"temp,hum\n"));
        assert!(matches!(
            state.source_status,
            SourceStatus::Failed(DashboardError::EmptyInput)
        ));
        assert!(state.table.is_none());
        assert!(state.view.is_none());
    }

    #[test]
    fn text_temperature_column_yields_no_usable_data_view() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_upload(upload(b"temp\nmild\nwarm\n"));
        assert!(matches!(state.source_status, SourceStatus::Loaded { rows: 2, .. }));
        assert!(matches!(state.view, Some(Err(DashboardError::NoUsableData))));
        assert!(state.current_view().is_none());
    }

    #[test]
    fn loads_default_path_and_switches_modes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Date,Temperature").unwrap();
        writeln!(file, "2024-05-01,18.5").unwrap();
        file.flush().unwrap();

        let config = DashboardConfig {
            default_csv_path: file.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        let mut state = AppState::new(config);
        state.reload_source();
        let view = state.current_view().unwrap();
        assert_eq!(view.selection.time_axis.as_deref(), Some("Date"));
        assert_eq!(view.stats.count, 1);

        state.set_input_mode(InputMode::Upload);
        assert!(matches!(state.source_status, SourceStatus::Waiting));
        assert!(state.view.is_none());

        state.csv_path = "/no/such/file.csv".into();
        state.set_input_mode(InputMode::DefaultPath);
        assert!(matches!(
            state.source_status,
            SourceStatus::Failed(DashboardError::SourceRead(_))
        ));
    }

    #[test]
    fn saves_export_to_disk() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_upload(upload(b"temp\n20\n"));
        let out = NamedTempFile::new().unwrap();
        state.save_export(out.path());
        let written = std::fs::read_to_string(out.path()).unwrap();
        assert_eq!(written, "temp,Temperature (°C)\n20,20\n");
        assert!(state.status_message.unwrap().starts_with("Saved"));
    }
}
