use anyhow::Result;
use serde_json::{Map, Value};
use tracing::debug;

use crate::store::{timestamp, Collection, RecordStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogKind {
    Meal,
    Workout,
    Wellness,
}

impl LogKind {
    pub fn collection(&self) -> Collection {
        match self {
            LogKind::Meal => Collection::Meals,
            LogKind::Workout => Collection::WorkoutLogs,
            LogKind::Wellness => Collection::Wellness,
        }
    }
}

/// Log entries are schemaless: whatever the client sent, plus a server `timestamp`.
pub struct LogEntry;

impl LogEntry {
    /// Stores `payload` with a fresh server timestamp and returns the stored entry.
    pub fn append(
        store: &dyn RecordStore,
        kind: LogKind,
        username: &str,
        mut payload: Map<String, Value>,
    ) -> Result<Value> {
        payload.insert("timestamp".to_string(), Value::String(timestamp()));
        let entry = Value::Object(payload);
        store.append(kind.collection(), username, entry.clone(), None)?;
        debug!("{:?} log appended for {}", kind, username);
        Ok(entry)
    }

    /// Every entry for the user, in stored order.
    pub fn all(store: &dyn RecordStore, kind: LogKind, username: &str) -> Vec<Value> {
        match store.get(kind.collection(), username) {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        }
    }

    /// Up to `limit` entries, newest first by timestamp.
    pub fn recent(store: &dyn RecordStore, kind: LogKind, username: &str, limit: usize) -> Vec<Value> {
        let mut entries = Self::all(store, kind, username);
        // Stable sort, so entries with equal timestamps keep their stored order.
        entries.sort_by(|a, b| entry_timestamp(b).cmp(entry_timestamp(a)));
        entries.truncate(limit);
        entries
    }
}

/// The entry's `timestamp` string, or `""` when absent.
pub fn entry_timestamp(entry: &Value) -> &str {
    entry
        .get("timestamp")
        .and_then(Value::as_str)
        .unwrap_or("")
}
