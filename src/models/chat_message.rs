use anyhow::Result;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{timestamp, Collection, RecordStore};

/// Transcript length kept per user; older turns are dropped on write.
pub const CHAT_HISTORY_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Coach,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: Role,
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

impl ChatMessage {
    pub fn append(store: &dyn RecordStore, username: &str, role: Role, message: &str) -> Result<Self> {
        let chat_message = ChatMessage {
            role,
            message: message.to_string(),
            timestamp: timestamp(),
        };
        store.append(
            Collection::Chat,
            username,
            serde_json::to_value(&chat_message)?,
            Some(CHAT_HISTORY_LIMIT),
        )?;
        Ok(chat_message)
    }

    /// The last `limit` stored entries, oldest first. Entries that do not parse as a
    /// message (unknown `role`, missing `message`) are skipped, so fewer than `limit` may
    /// come back even when [`ChatMessage::count`] is larger.
    pub fn history(store: &dyn RecordStore, username: &str, limit: usize) -> Vec<Self> {
        let Some(serde_json::Value::Array(entries)) = store.get(Collection::Chat, username) else {
            return Vec::new();
        };
        let start = entries.len().saturating_sub(limit);
        entries
            .into_iter()
            .skip(start)
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }

    /// Length of the stored transcript, unparseable entries included.
    pub fn count(store: &dyn RecordStore, username: &str) -> usize {
        store
            .get(Collection::Chat, username)
            .and_then(|value| value.as_array().map(Vec::len))
            .unwrap_or(0)
    }
}
