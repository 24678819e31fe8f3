//! Request history tracking and persistence.
//!
//! Every send is recorded after the transport returns: successful requests
//! with status, duration and size, failed ones with no status. Entries are
//! stored in a JSONL file and can be listed, searched and pruned per
//! workspace.
//!
//! # Example
//!
//! ```no_run
//! use rest_workbench::history::{HistoryEntry, HistoryRecorder, HistoryStore};
//! use rest_workbench::models::HttpMethod;
//!
//! # fn example() -> Result<(), rest_workbench::history::HistoryError> {
//! let store = HistoryStore::open_default()?;
//! let entry = HistoryEntry::new("req-1", "List users", HttpMethod::GET, "{{baseUrl}}/users", "ws-1");
//! store.record(&entry)?;
//!
//! let recent = store.fetch_for_workspace("ws-1", 100)?;
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod search;
pub mod storage;

pub use models::{DateRange, HistoryEntry, HistoryError, StatusFilter};
pub use search::{search_entries, SearchQuery};
pub use storage::{default_history_path, HistoryRecorder, HistoryStore};
