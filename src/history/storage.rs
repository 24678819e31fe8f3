//! Persistent storage for request history.
//!
//! Entries are stored one per line in JSONL (JSON Lines) format. Appends are
//! cheap, and a corrupted line only loses that one entry: it is skipped with
//! a warning on load. Operations that remove entries rewrite the file through
//! a temporary file and an atomic rename.

use super::models::{DateRange, HistoryEntry, HistoryError, StatusFilter};
use super::search::{recent_for_workspace, search_entries, SearchQuery};
use chrono::{Duration, Utc};
use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name of the history log inside the data directory.
pub const HISTORY_FILE_NAME: &str = "history.jsonl";

/// Anything that can persist a history entry.
///
/// The send pipeline only needs this; callers decide where entries go.
pub trait HistoryRecorder: Send + Sync {
    fn record(&self, entry: &HistoryEntry) -> Result<(), HistoryError>;
}

impl<T: HistoryRecorder + ?Sized> HistoryRecorder for std::sync::Arc<T> {
    fn record(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        (**self).record(entry)
    }
}

/// Gets the default history file path.
///
/// Returns `~/.config/rest-workbench/history.jsonl` on Unix-like systems, or
/// the equivalent under `AppData\Roaming` on Windows. The parent directory is
/// created if needed.
///
/// # Errors
///
/// Returns `HistoryError::Storage` if no home directory is known or the
/// directory cannot be created.
pub fn default_history_path() -> Result<PathBuf, HistoryError> {
    let config_dir = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config")
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        PathBuf::from(user_profile).join("AppData").join("Roaming")
    } else {
        return Err(HistoryError::Storage(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )));
    };

    let history_dir = config_dir.join("rest-workbench");
    if !history_dir.exists() {
        fs::create_dir_all(&history_dir)?;
    }

    Ok(history_dir.join(HISTORY_FILE_NAME))
}

/// History log backed by a single JSONL file.
///
/// All operations on one store are serialized through an internal lock, so a
/// store can be shared between threads.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryStore {
    /// Opens a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Opens the store at [`default_history_path`].
    pub fn open_default() -> Result<Self, HistoryError> {
        Ok(Self::new(default_history_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends an entry as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the file cannot be opened or written, or the
    /// entry cannot be serialized.
    pub fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        let _guard = self.guard();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)?;
        file.flush()?;

        Ok(())
    }

    /// Loads all valid entries in file order (oldest first).
    ///
    /// A missing file is an empty history. Corrupted lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` if the file exists but cannot be read.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let _guard = self.guard();
        self.load_unlocked()
    }

    fn load_unlocked(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries = Vec::new();
        let mut corrupted_lines = 0;

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = match line_result {
                Ok(line) => line,
                Err(e) => {
                    corrupted_lines += 1;
                    warn!("Error reading history line {}: {}", line_num + 1, e);
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<HistoryEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    corrupted_lines += 1;
                    warn!(
                        "Skipping corrupted history entry at line {}: {}",
                        line_num + 1,
                        e
                    );
                }
            }
        }

        if corrupted_lines > entries.len() {
            warn!(
                "History file has significant corruption ({} corrupted lines, {} valid entries)",
                corrupted_lines,
                entries.len()
            );
        }

        Ok(entries)
    }

    /// Rewrites the file with `entries` through a temporary file.
    fn write_all_unlocked(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let temp_path = self.path.with_extension("jsonl.tmp");
        let mut temp_file = File::create(&temp_path)?;

        for entry in entries {
            let json = serde_json::to_string(entry)?;
            writeln!(temp_file, "{}", json)?;
        }

        temp_file.flush()?;
        drop(temp_file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Removes entries matching `predicate`, returning how many were removed.
    fn remove_where<F>(&self, predicate: F) -> Result<usize, HistoryError>
    where
        F: Fn(&HistoryEntry) -> bool,
    {
        let _guard = self.guard();

        if !self.path.exists() {
            return Ok(0);
        }

        let entries = self.load_unlocked()?;
        let before = entries.len();
        let kept: Vec<HistoryEntry> = entries.into_iter().filter(|e| !predicate(e)).collect();
        let removed = before - kept.len();

        if removed > 0 {
            self.write_all_unlocked(&kept)?;
        }

        Ok(removed)
    }

    /// The most recent `limit` entries of one workspace, newest first.
    pub fn fetch_for_workspace(
        &self,
        workspace_id: &str,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(recent_for_workspace(&self.load()?, workspace_id, limit))
    }

    /// Searches one workspace's entries.
    ///
    /// `query` is matched case-insensitively against URL and request name; an
    /// empty query matches everything. Results are newest first.
    pub fn search(
        &self,
        query: &str,
        workspace_id: &str,
        status_filter: Option<StatusFilter>,
        date_range: Option<DateRange>,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        let criteria = SearchQuery {
            text: query.to_string(),
            workspace_id: workspace_id.to_string(),
            status: status_filter,
            date_range,
        };
        Ok(search_entries(&self.load()?, &criteria))
    }

    /// Deletes every entry of one workspace.
    pub fn clear_workspace(&self, workspace_id: &str) -> Result<usize, HistoryError> {
        let removed = self.remove_where(|e| e.workspace_id == workspace_id)?;
        debug!("Cleared {} history entries for workspace {}", removed, workspace_id);
        Ok(removed)
    }

    /// Deletes one entry by id. Returns `false` if no entry had that id.
    pub fn delete_entry(&self, entry_id: &str) -> Result<bool, HistoryError> {
        Ok(self.remove_where(|e| e.id == entry_id)? > 0)
    }

    /// Drops entries older than `older_than_days`, then the oldest entries
    /// beyond `max_entries`.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    pub fn prune(&self, older_than_days: u32, max_entries: usize) -> Result<usize, HistoryError> {
        let _guard = self.guard();

        if !self.path.exists() {
            return Ok(0);
        }

        let cutoff = Utc::now() - Duration::days(i64::from(older_than_days));
        let mut entries = self.load_unlocked()?;
        let before = entries.len();

        entries.retain(|e| e.timestamp >= cutoff);
        if entries.len() > max_entries {
            entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            let excess = entries.len() - max_entries;
            entries.drain(..excess);
        }

        let removed = before - entries.len();
        if removed > 0 {
            self.write_all_unlocked(&entries)?;
            debug!("Pruned {} history entries", removed);
        }

        Ok(removed)
    }

    /// Prunes using the global `historyRetentionDays` and `historyLimit`.
    pub fn prune_with_config(&self) -> Result<usize, HistoryError> {
        let config = crate::config::get_config();
        self.prune(config.history_retention_days, config.history_limit)
    }

    /// Deletes the history file.
    pub fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.guard();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl HistoryRecorder for HistoryStore {
    fn record(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        self.append(entry)
    }
}
