//! PrefsStore - Saved Table View Preferences
//!
//! Persists per-table view preferences (page size, sort, filter selections)
//! as JSON files in the platform data directory, so a table reopens the way
//! the admin left it.

use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::table::query::{DEFAULT_PAGE_SIZE, FilterSelection, SortSpec};

/// Saved view preferences for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePrefs {
    /// Rows per page
    pub page_size: usize,
    /// Saved sort, if any
    pub sort: Option<SortSpec>,
    /// Saved filter selections
    pub filters: AHashMap<String, FilterSelection>,
}

impl Default for TablePrefs {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            filters: AHashMap::new(),
        }
    }
}

/// Get the application data directory
pub fn app_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "fitadmin", "fitadmin")
        .ok_or_else(|| anyhow::anyhow!("Could not find local data directory"))?;
    let dir = dirs.data_local_dir().to_path_buf();

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

fn prefs_path(table: &str) -> Result<PathBuf> {
    Ok(app_data_dir()?.join(format!("{table}.view.json")))
}

/// Load saved preferences for a table, defaulting when none are saved
pub fn load_prefs(table: &str) -> Result<TablePrefs> {
    load_prefs_from(&prefs_path(table)?)
}

/// Save preferences for a table
pub fn save_prefs(table: &str, prefs: &TablePrefs) -> Result<()> {
    save_prefs_to(&prefs_path(table)?, prefs)
}

/// Load preferences from an explicit path
pub fn load_prefs_from(path: &Path) -> Result<TablePrefs> {
    if !path.exists() {
        return Ok(TablePrefs::default());
    }

    let content = fs::read_to_string(path)?;
    let prefs: TablePrefs = serde_json::from_str(&content)?;
    Ok(prefs)
}

/// Save preferences to an explicit path
pub fn save_prefs_to(path: &Path, prefs: &TablePrefs) -> Result<()> {
    let content = serde_json::to_string_pretty(prefs)?;
    fs::write(path, content)?;
    tracing::debug!("Saved view preferences to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("members.view.json");

        let prefs = load_prefs_from(&path).expect("load succeeds");
        assert_eq!(prefs, TablePrefs::default());
    }

    #[test]
    fn test_prefs_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("members.view.json");

        let mut filters = AHashMap::new();
        filters.insert(
            "status".to_string(),
            ["active".to_string(), "frozen".to_string()]
                .into_iter()
                .collect::<FilterSelection>(),
        );
        let prefs = TablePrefs {
            page_size: 50,
            sort: Some(SortSpec::descending("joined")),
            filters,
        };

        save_prefs_to(&path, &prefs).expect("save succeeds");
        let loaded = load_prefs_from(&path).expect("load succeeds");
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("members.view.json");
        fs::write(&path, "not json").expect("write succeeds");

        assert!(load_prefs_from(&path).is_err());
    }
}
