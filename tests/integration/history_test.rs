//! History persistence scenarios.

use super::init_test_env;
use chrono::{Duration, Utc};
use rest_workbench::history::{DateRange, HistoryEntry, HistoryRecorder, HistoryStore};
use rest_workbench::models::{HttpMethod, HttpResponse};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn entry(name: &str, workspace_id: &str, status: u16) -> HistoryEntry {
    let mut response = HttpResponse::new(status, "OK");
    response.set_body(name.as_bytes().to_vec());
    HistoryEntry::new("req", name, HttpMethod::GET, "{{baseUrl}}/items", workspace_id)
        .with_response(&response)
}

#[test]
fn test_history_survives_reopen() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.jsonl");

    {
        let store = HistoryStore::new(&path);
        store.record(&entry("first", "ws", 200)).unwrap();
        store.record(&entry("second", "ws", 500)).unwrap();
    }

    let reopened = HistoryStore::new(&path);
    let entries = reopened.load().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].status_code, Some(500));
    assert_eq!(entries[1].response_size, "second".len());
}

#[test]
fn test_concurrent_appends_are_not_lost() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(HistoryStore::new(dir.path().join("history.jsonl")));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for j in 0..10 {
                    store
                        .record(&entry(&format!("t{}-{}", i, j), "ws", 200))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.load().unwrap().len(), 80);
}

#[test]
fn test_workspaces_are_isolated() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(dir.path().join("history.jsonl"));

    store.record(&entry("a", "ws-1", 200)).unwrap();
    store.record(&entry("b", "ws-2", 200)).unwrap();

    assert_eq!(store.fetch_for_workspace("ws-1", 100).unwrap().len(), 1);
    assert_eq!(store.search("", "ws-2", None, None).unwrap().len(), 1);

    store.clear_workspace("ws-1").unwrap();
    assert!(store.fetch_for_workspace("ws-1", 100).unwrap().is_empty());
    assert_eq!(store.fetch_for_workspace("ws-2", 100).unwrap().len(), 1);
}

#[test]
fn test_custom_date_range() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(dir.path().join("history.jsonl"));

    let mut old = entry("old", "ws", 200);
    old.timestamp = Utc::now() - Duration::days(10);
    store.record(&old).unwrap();
    store.record(&entry("new", "ws", 200)).unwrap();

    let range = DateRange::new(Utc::now() - Duration::days(11), Utc::now() - Duration::days(9));
    let results = store.search("", "ws", None, Some(range)).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].request_name, "old");
}
