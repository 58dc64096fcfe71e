use tracing::{info, warn};

use crate::models::Profile;
use crate::openai::TextGenerator;
use crate::prompts::Prompts;

pub const DEFAULT_DURATION_MINUTES: u32 = 30;

#[derive(Debug, Clone, Default)]
pub struct WorkoutRequest {
    pub level: String,
    pub goal: String,
    pub duration_minutes: u32,
    pub equipment: String,
    pub gender: String,
    pub age: Option<i64>,
    pub physical_limitations: String,
}

impl WorkoutRequest {
    pub fn from_profile(profile: &Profile, duration_minutes: u32) -> Self {
        WorkoutRequest {
            level: profile.fitness_level.clone(),
            goal: profile.goal.clone(),
            duration_minutes,
            equipment: profile.equipment.clone(),
            gender: profile.gender.clone(),
            age: profile.age,
            physical_limitations: profile.physical_limitations.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        let mut parts = vec![
            "Create a safe, personalized workout plan in 6-10 lines.".to_string(),
            format!("Fitness Level: {}", self.level),
            format!("Goal: {}", self.goal),
            format!("Duration: {} minutes", self.duration_minutes),
            format!("Equipment: {}", self.equipment),
        ];
        if !self.gender.is_empty() {
            parts.push(format!("Gender: {}", self.gender));
        }
        if let Some(age) = self.age.filter(|age| *age != 0) {
            parts.push(format!("Age: {}", age));
        }
        if !self.physical_limitations.is_empty() {
            parts.push(format!(
                "IMPORTANT - Physical Limitations: {}",
                self.physical_limitations
            ));
            parts.push(
                "CRITICAL: Avoid exercises that could worsen these conditions. Suggest safe alternatives."
                    .to_string(),
            );
        }
        parts.push("Include: warm-up, main exercises with sets/reps, and cool-down.".to_string());
        parts.push("Prioritize safety and proper form over intensity.".to_string());
        parts.join(". ")
    }

    /// Deterministic plan used whenever generation fails or comes back empty.
    pub fn fallback_plan(&self) -> String {
        let equipment = if self.equipment.is_empty() {
            "bodyweight"
        } else {
            self.equipment.as_str()
        };
        format!(
            "Workout ({} minutes) - Level: {}, Goal: {}\n\
             Warm-up: 5 min brisk walk or light cycle\n\
             Circuit (3 rounds): 10 squats, 10 push-ups (knees if needed), 20s plank\n\
             Cool-down: 5 min easy walk + stretch\n\
             Equipment: {}",
            self.duration_minutes, self.level, self.goal, equipment
        )
    }
}

/// Always returns a plan, generated when possible.
pub async fn generate_workout(generator: &dyn TextGenerator, request: &WorkoutRequest) -> String {
    match generator
        .generate(&request.prompt(), Prompts::WORKOUT_SYSTEM)
        .await
    {
        Ok(text) if !text.is_empty() => {
            info!("Generated workout plan ({} chars)", text.len());
            text
        }
        Ok(_) => {
            warn!("Empty workout plan from generator, using fallback");
            request.fallback_plan()
        }
        Err(e) => {
            warn!("Workout generation failed, using fallback: {}", e);
            request.fallback_plan()
        }
    }
}
