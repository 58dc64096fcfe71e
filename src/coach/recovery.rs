use serde_json::Value;

use crate::models::{LogEntry, LogKind};
use crate::store::RecordStore;

const RECENT_WELLNESS_WINDOW: usize = 3;
const POOR_ENTRIES_REQUIRED: usize = 3;
const POOR_SLEEP_BELOW: f64 = 50.0;
const HIGH_STRESS_FROM: f64 = 4.0;

/// True when each of the last three wellness logs shows poor sleep or high stress.
pub fn should_reduce_intensity(store: &dyn RecordStore, username: &str) -> bool {
    let recent = LogEntry::recent(store, LogKind::Wellness, username, RECENT_WELLNESS_WINDOW);
    recent.iter().filter(|entry| is_poor_recovery(entry)).count() >= POOR_ENTRIES_REQUIRED
}

fn is_poor_recovery(entry: &Value) -> bool {
    let numeric = |field: &str| entry.get(field).and_then(Value::as_f64);

    numeric("sleep_quality").is_some_and(|sleep| sleep < POOR_SLEEP_BELOW)
        || numeric("stress_level").is_some_and(|stress| stress >= HIGH_STRESS_FROM)
}
