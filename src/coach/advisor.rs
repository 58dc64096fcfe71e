use tracing::warn;

use crate::coach::CoachContext;
use crate::openai::{GenerationError, TextGenerator};
use crate::prompts::Prompts;

/// One role-specific prompt policy. All advisors share `call_with_fallback`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advisor {
    Fitness,
    Nutrition,
    Wellness,
}

impl Advisor {
    pub fn label(&self) -> &'static str {
        match self {
            Advisor::Fitness => "fitness",
            Advisor::Nutrition => "nutrition",
            Advisor::Wellness => "wellness",
        }
    }

    pub fn system_instruction(&self) -> &'static str {
        match self {
            Advisor::Fitness => Prompts::FITNESS_SYSTEM,
            Advisor::Nutrition => Prompts::NUTRITION_SYSTEM,
            Advisor::Wellness => Prompts::WELLNESS_SYSTEM,
        }
    }

    /// Prefix of the reply returned when generation fails.
    pub fn fallback_label(&self) -> &'static str {
        match self {
            Advisor::Fitness => "Training guidance unavailable",
            Advisor::Nutrition => "Nutrition guidance unavailable",
            Advisor::Wellness => "Recovery guidance unavailable",
        }
    }

    pub fn build_prompt(&self, context: &CoachContext, message: &str) -> String {
        let profile = context.profile_json();
        let mut parts = match self {
            Advisor::Fitness => {
                let mut parts = vec![
                    format!("User Query: {}", message),
                    format!("User Profile: {}", profile),
                    Prompts::FITNESS_TAIL.to_string(),
                ];
                if let Some(p) = &context.profile {
                    if !p.physical_limitations.is_empty() {
                        parts.push(format!(
                            "IMPORTANT: User has physical limitations: {}. Avoid exercises that could worsen these conditions and suggest safe alternatives.",
                            p.physical_limitations
                        ));
                    }
                    if !p.gender.is_empty() {
                        parts.push(format!(
                            "Consider gender-specific recommendations for: {}",
                            p.gender
                        ));
                    }
                    if let Some(age) = p.age.filter(|age| *age != 0) {
                        parts.push(format!(
                            "Consider age-appropriate exercises for: {} years old",
                            age
                        ));
                    }
                }
                parts
            }
            Advisor::Nutrition => vec![
                format!("User: {}", message),
                format!("Context: {}", profile),
                Prompts::NUTRITION_TAIL.to_string(),
            ],
            Advisor::Wellness => vec![
                format!("User: {}", message),
                format!("Context: {}", profile),
                Prompts::WELLNESS_TAIL.to_string(),
            ],
        };

        if let Some(transcript) = context.recent_transcript() {
            parts.push(format!("Recent conversation:\n{}", transcript));
        }
        parts.join("\n")
    }

    /// Never fails: generation errors come back as `"<fallback label>: <error>"`.
    pub async fn consult(
        &self,
        generator: &dyn TextGenerator,
        context: &CoachContext,
        message: &str,
    ) -> String {
        let prompt = self.build_prompt(context, message);
        call_with_fallback(generator, &prompt, self.system_instruction(), |e| {
            format!("{}: {}", self.fallback_label(), e)
        })
        .await
    }
}

/// Calls the generator once and converts any failure with `on_error`.
pub async fn call_with_fallback(
    generator: &dyn TextGenerator,
    prompt: &str,
    system_instruction: &str,
    on_error: impl FnOnce(&GenerationError) -> String,
) -> String {
    match generator.generate(prompt, system_instruction).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Generation failed: {}", e);
            on_error(&e)
        }
    }
}
