//! Search functionality for request history.
//!
//! Pure filters over loaded entries. [`HistoryStore`](super::HistoryStore)
//! uses these after reading the file.

use super::models::{DateRange, HistoryEntry, StatusFilter};

/// Criteria for [`search_entries`]. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against URL and request name.
    pub text: String,
    pub workspace_id: String,
    pub status: Option<StatusFilter>,
    pub date_range: Option<DateRange>,
}

/// Filters entries by workspace, text, status class and date range.
///
/// Entries without a status code never match a status filter.
///
/// # Returns
///
/// Matching entries sorted newest first.
pub fn search_entries(entries: &[HistoryEntry], query: &SearchQuery) -> Vec<HistoryEntry> {
    let text = query.text.to_lowercase();

    let matches: Vec<HistoryEntry> = entries
        .iter()
        .filter(|entry| entry.workspace_id == query.workspace_id)
        .filter(|entry| text.is_empty() || matches_text(entry, &text))
        .filter(|entry| match query.status {
            Some(filter) => entry.status_code.is_some_and(|code| filter.matches(code)),
            None => true,
        })
        .filter(|entry| match &query.date_range {
            Some(range) => range.contains(&entry.timestamp),
            None => true,
        })
        .cloned()
        .collect();

    sort_by_timestamp_desc(matches)
}

fn matches_text(entry: &HistoryEntry, text_lower: &str) -> bool {
    entry.url.to_lowercase().contains(text_lower)
        || entry.request_name.to_lowercase().contains(text_lower)
}

/// Entries for one workspace, newest first, at most `limit` of them.
pub fn recent_for_workspace(
    entries: &[HistoryEntry],
    workspace_id: &str,
    limit: usize,
) -> Vec<HistoryEntry> {
    let mut matches = sort_by_timestamp_desc(
        entries
            .iter()
            .filter(|entry| entry.workspace_id == workspace_id)
            .cloned()
            .collect(),
    );
    matches.truncate(limit);
    matches
}

/// Sorts history entries by timestamp in descending order (newest first).
pub fn sort_by_timestamp_desc(mut entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}
