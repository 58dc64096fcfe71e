use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::store::{timestamp, Collection, RecordStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_age")]
    pub age: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_string")]
    pub fitness_level: String,
    #[serde(deserialize_with = "lenient_string")]
    pub goal: String,
    #[serde(deserialize_with = "lenient_string")]
    pub equipment: String,
    #[serde(deserialize_with = "lenient_string")]
    pub physical_limitations: String,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_updated: String,
}

/// Stored records may hold `null` or non-string scalars; those read as text or `""`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

/// Integral numbers (`30` or `30.0`) and numeric strings; anything else is no age.
fn lenient_age<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|age| age.fract() == 0.0)
                .map(|age| age as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

impl Profile {
    pub fn get(store: &dyn RecordStore, username: &str) -> Option<Self> {
        store
            .get(Collection::Users, username)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Creates or replaces the profile stored under `profile.name`. The last write wins,
    /// timestamps included.
    pub fn upsert(store: &dyn RecordStore, mut profile: Profile) -> Result<Self> {
        let now = timestamp();
        profile.created_at = now.clone();
        profile.last_updated = now;

        store.put(
            Collection::Users,
            &profile.name,
            serde_json::to_value(&profile)?,
        )?;

        debug!("Profile saved: {:?}", profile);
        Ok(profile)
    }
}
