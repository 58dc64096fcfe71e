use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::chat_message::ChatMessage;
use crate::models::log_entry::{entry_timestamp, LogEntry, LogKind};
use crate::models::profile::Profile;
use crate::store::{Collection, RecordStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserStats {
    /// Raw stored profile, or an empty object for unknown users.
    #[schema(value_type = Object)]
    pub profile: Value,
    pub total_meals: usize,
    pub total_workouts: usize,
    pub total_wellness_logs: usize,
    pub total_chat_messages: usize,
    pub last_activity: String,
}

impl UserStats {
    /// Aggregates counts across every collection for one user.
    ///
    /// `last_activity` is the string maximum of the profile's `last_updated` and the final
    /// timestamp of each log. This equals the newest time only while every source writes the
    /// same fixed-width ISO-8601 format.
    pub fn for_user(store: &dyn RecordStore, username: &str) -> Self {
        let profile = store
            .get(Collection::Users, username)
            .unwrap_or_else(|| Value::Object(Default::default()));
        let meals = LogEntry::all(store, LogKind::Meal, username);
        let workouts = LogEntry::all(store, LogKind::Workout, username);
        let wellness = LogEntry::all(store, LogKind::Wellness, username);

        let last_updated = profile
            .get("last_updated")
            .and_then(Value::as_str)
            .unwrap_or("");
        let last_activity = [
            last_updated,
            meals.last().map(entry_timestamp).unwrap_or(""),
            workouts.last().map(entry_timestamp).unwrap_or(""),
            wellness.last().map(entry_timestamp).unwrap_or(""),
        ]
        .into_iter()
        .max()
        .unwrap_or("")
        .to_string();

        UserStats {
            total_meals: meals.len(),
            total_workouts: workouts.len(),
            total_wellness_logs: wellness.len(),
            total_chat_messages: ChatMessage::count(store, username),
            last_activity,
            profile,
        }
    }

    /// The stored profile in typed form, if there is one.
    pub fn typed_profile(&self) -> Option<Profile> {
        serde_json::from_value(self.profile.clone()).ok()
    }
}
