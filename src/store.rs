use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Per-username documents, one JSON object per collection.
pub type Records = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Workouts,
    Chat,
    Meals,
    WorkoutLogs,
    Wellness,
}

impl Collection {
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Users => "users.json",
            Collection::Workouts => "workouts.json",
            Collection::Chat => "chat.json",
            Collection::Meals => "meals.json",
            Collection::WorkoutLogs => "workout_logs.json",
            Collection::Wellness => "wellness.json",
        }
    }
}

/// Server timestamp used on every stored record.
///
/// Fixed-width local ISO-8601 with microseconds, so string order is time order.
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Keyed record store. Implementors only provide whole-collection `load` and `save`;
/// the per-key operations are read-modify-write cycles on top of them.
///
/// There is no locking: two writers on the same collection can race and one update is lost.
pub trait RecordStore: Send + Sync {
    /// Returns every record in the collection. Missing or unreadable data is an empty map.
    fn load(&self, collection: Collection) -> Records;

    fn save(&self, collection: Collection, records: &Records) -> Result<()>;

    fn get(&self, collection: Collection, key: &str) -> Option<Value> {
        self.load(collection).remove(key)
    }

    fn put(&self, collection: Collection, key: &str, value: Value) -> Result<()> {
        let mut records = self.load(collection);
        records.insert(key.to_string(), value);
        self.save(collection, &records)
    }

    /// Appends `entry` to the list stored under `key`, creating the list if needed.
    /// With `keep_last`, only the newest entries survive the write.
    fn append(
        &self,
        collection: Collection,
        key: &str,
        entry: Value,
        keep_last: Option<usize>,
    ) -> Result<()> {
        let mut records = self.load(collection);
        let slot = records
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            warn!(
                "Replacing non-list record for {} in {}",
                key,
                collection.file_name()
            );
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(list) = slot {
            list.push(entry);
            if let Some(limit) = keep_last {
                if list.len() > limit {
                    let excess = list.len() - limit;
                    list.drain(..excess);
                }
            }
        }
        self.save(collection, &records)
    }
}

/// Flat-file store: one pretty-printed JSON document per collection under `data_dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, collection: Collection) -> Records {
        let path = self.path(collection);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No data at {}: {}", path.display(), e);
                return Records::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(records)) => records,
            Ok(_) => {
                warn!("Ignoring non-object document at {}", path.display());
                Records::new()
            }
            Err(e) => {
                // Corrupt documents read as empty; the next save overwrites them.
                warn!("Ignoring malformed JSON at {}: {}", path.display(), e);
                Records::new()
            }
        }
    }

    fn save(&self, collection: Collection, records: &Records) -> Result<()> {
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("creating data dir {}", self.data_dir.display()))?;
        let path = self.path(collection);
        let body = serde_json::to_string_pretty(records)?;
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        debug!("Saved {} records to {}", records.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = store();
        assert!(store.load(Collection::Users).is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let (_dir, store) = store();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.data_dir().join("meals.json"), "{not json").unwrap();
        assert!(store.load(Collection::Meals).is_empty());

        fs::write(store.data_dir().join("meals.json"), "[1, 2]").unwrap();
        assert!(store.load(Collection::Meals).is_empty());
    }

    #[test]
    fn save_creates_data_dir_and_keeps_unicode() {
        let (_dir, store) = store();
        store
            .put(Collection::Users, "zoë", json!({"goal": "力量"}))
            .unwrap();

        let raw = fs::read_to_string(store.data_dir().join("users.json")).unwrap();
        assert!(raw.contains("zoë"));
        assert!(raw.contains("力量"));
        assert!(raw.contains("\n  \"zoë\""));
        assert_eq!(
            store.get(Collection::Users, "zoë"),
            Some(json!({"goal": "力量"}))
        );
    }

    #[test]
    fn append_creates_list_and_leaves_other_keys() {
        let (_dir, store) = store();
        store
            .append(Collection::Meals, "bob", json!({"food": "eggs"}), None)
            .unwrap();
        store
            .append(Collection::Meals, "amy", json!({"food": "rice"}), None)
            .unwrap();
        store
            .append(Collection::Meals, "amy", json!({"food": "tofu"}), None)
            .unwrap();

        let records = store.load(Collection::Meals);
        assert_eq!(records["bob"].as_array().unwrap().len(), 1);
        assert_eq!(records["amy"].as_array().unwrap().len(), 2);
        assert_eq!(records["amy"][1]["food"], "tofu");
    }

    #[test]
    fn append_with_keep_last_trims_from_front() {
        let (_dir, store) = store();
        for i in 0..7 {
            store
                .append(Collection::Chat, "amy", json!(i), Some(5))
                .unwrap();
        }
        let list = store.get(Collection::Chat, "amy").unwrap();
        assert_eq!(list, json!([2, 3, 4, 5, 6]));
    }

    #[test]
    fn timestamps_sort_chronologically() {
        let first = timestamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = timestamp();
        assert_eq!(first.len(), 26);
        assert!(second > first);
    }
}
