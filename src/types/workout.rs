use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::WorkoutPlan;

#[derive(Deserialize, ToSchema)]
pub struct GenerateWorkoutRequest {
    pub username: Option<String>,
    pub duration_minutes: Option<u32>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct WorkoutResponse {
    pub status: String,
    pub plan: WorkoutPlan,
}
