use anyhow::Result;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{timestamp, Collection, RecordStore};

/// The most recently generated plan for a user. Each generation replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutPlan {
    pub text: String,
    #[serde(default)]
    pub timestamp: String,
}

impl WorkoutPlan {
    pub fn save(store: &dyn RecordStore, username: &str, text: &str) -> Result<Self> {
        let plan = WorkoutPlan {
            text: text.to_string(),
            timestamp: timestamp(),
        };
        store.put(Collection::Workouts, username, serde_json::to_value(&plan)?)?;
        Ok(plan)
    }

    pub fn latest(store: &dyn RecordStore, username: &str) -> Option<Self> {
        store
            .get(Collection::Workouts, username)
            .and_then(|value| serde_json::from_value(value).ok())
    }
}
