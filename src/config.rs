use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::stats::DEFAULT_LISTING_CAP;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "weather_dashboard.json";

/// Startup settings. Every field has a default, so a partial file is fine:
///
/// ```json
/// { "default_csv_path": "data/weather.csv", "listing_cap": 500 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Pre-filled CSV path in the "Use default path" mode.
    pub default_csv_path: PathBuf,
    /// Maximum number of temperatures printed in the listing.
    pub listing_cap: usize,
    /// Initial window size in logical points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_csv_path: PathBuf::from("data.csv"),
            listing_cap: DEFAULT_LISTING_CAP,
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Config from `dir/weather_dashboard.json` when present, defaults
    /// otherwise. A broken file is logged and ignored.
    pub fn discover(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    /// Apply command-line overrides: the first argument is a CSV path.
    pub fn with_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Self {
        if let Some(path) = args.into_iter().next() {
            self.default_csv_path = PathBuf::from(path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let mut f = std::fs::File::create(dir.path().join(CONFIG_FILE)).unwrap();
        write!(f, r#"{{ "listing_cap": 25 }}"#).unwrap();

        let cfg = DashboardConfig::discover(dir.path());
        assert_eq!(cfg.listing_cap, 25);
        assert_eq!(cfg.default_csv_path, PathBuf::from("data.csv"));
    }

    #[test]
    fn missing_or_broken_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(DashboardConfig::discover(dir.path()), DashboardConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "not json").unwrap();
        assert_eq!(DashboardConfig::discover(dir.path()), DashboardConfig::default());
        assert!(DashboardConfig::from_file(&dir.path().join(CONFIG_FILE)).is_err());
    }

    #[test]
    fn first_argument_overrides_csv_path() {
        let cfg = DashboardConfig::default().with_args(vec!["obs.csv".to_string()]);
        assert_eq!(cfg.default_csv_path, PathBuf::from("obs.csv"));
        let cfg = DashboardConfig::default().with_args(Vec::new());
        assert_eq!(cfg.default_csv_path, PathBuf::from("data.csv"));
    }
}
