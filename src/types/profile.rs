use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::Profile;

/// Registration form. Everything is optional on the wire so missing fields
/// get a readable error instead of a deserialization failure.
#[derive(Deserialize, ToSchema, Default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    /// Integer, or a string holding one.
    #[schema(value_type = Option<i64>)]
    pub age: Option<Value>,
    pub gender: Option<String>,
    pub fitness_level: Option<String>,
    pub goal: Option<String>,
    pub equipment: Option<String>,
    pub physical_limitations: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct RegisterResponse {
    pub status: String,
    pub profile: Profile,
}

impl RegisterRequest {
    /// Checks the form and builds the profile to store. Timestamps are filled in on save.
    pub fn into_profile(self) -> Result<Profile, String> {
        // The name is the store key for every other route, so it is kept verbatim.
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| "name required".to_string())?;
        let age = match self.age {
            None | Some(Value::Null) => return Err("age required".to_string()),
            Some(value) => parse_age(&value).ok_or_else(|| "Invalid age value.".to_string())?,
        };
        let required = |field: Option<String>, label: &str| {
            field.ok_or_else(|| format!("{} required", label))
        };

        Ok(Profile {
            name,
            age: Some(age),
            gender: required(self.gender, "gender")?,
            fitness_level: required(self.fitness_level, "fitness_level")?,
            goal: required(self.goal, "goal")?,
            equipment: required(self.equipment, "equipment")?,
            physical_limitations: self.physical_limitations.unwrap_or_default(),
            ..Default::default()
        })
    }
}

fn parse_age(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
