pub mod advisor;
pub mod recovery;
pub mod router;
pub mod synthesizer;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::models::{ChatMessage, Profile, Role, UserStats};
use crate::openai::TextGenerator;
use crate::prompts::Prompts;
use crate::store::RecordStore;

pub use advisor::Advisor;
pub use router::{route, Route};

/// Chat entries handed to the advisors as conversation memory.
const RECENT_CHAT_WINDOW: usize = 3;

const GREETINGS: &[&str] = &["hi", "hello", "hey", "hi there"];
const THANKS: &[&str] = &["thanks", "thank you", "thx"];
const FAREWELLS: &[&str] = &["bye", "goodbye", "see you"];

/// What the advisors know about the user for one turn.
#[derive(Debug, Clone, Default)]
pub struct CoachContext {
    pub stats: UserStats,
    pub profile: Option<Profile>,
    pub recent_chat: Vec<ChatMessage>,
    pub original_message: String,
}

impl CoachContext {
    pub fn gather(store: &dyn RecordStore, username: &str, message: &str) -> Self {
        let stats = UserStats::for_user(store, username);
        CoachContext {
            profile: stats.typed_profile(),
            recent_chat: ChatMessage::history(store, username, RECENT_CHAT_WINDOW),
            original_message: message.to_string(),
            stats,
        }
    }

    /// The stored profile as compact JSON, `{}` when the user has none.
    pub fn profile_json(&self) -> String {
        match &self.stats.profile {
            profile @ Value::Object(_) => profile.to_string(),
            _ => "{}".to_string(),
        }
    }

    pub fn recent_transcript(&self) -> Option<String> {
        if self.recent_chat.is_empty() {
            return None;
        }
        let lines = self
            .recent_chat
            .iter()
            .map(|entry| {
                let speaker = match entry.role {
                    Role::User => "user",
                    Role::Coach => "coach",
                };
                format!("{}: {}", speaker, entry.message)
            })
            .collect::<Vec<_>>();
        Some(lines.join("\n"))
    }
}

/// Fixed replies for small talk. Matching is exact after trimming and lower-casing.
pub fn canned_reply(username: &str, message: &str) -> Option<String> {
    let text = message.trim().to_lowercase();
    let text = text.as_str();

    if GREETINGS.contains(&text) {
        Some(Prompts::greeting_reply(username))
    } else if THANKS.contains(&text) {
        Some(Prompts::THANKS_REPLY.to_string())
    } else if FAREWELLS.contains(&text) {
        Some(Prompts::FAREWELL_REPLY.to_string())
    } else {
        None
    }
}

/// Stateless conversation handler; all memory lives in the store.
#[derive(Clone)]
pub struct Coach {
    store: Arc<dyn RecordStore>,
    generator: Arc<dyn TextGenerator>,
}

impl Coach {
    pub fn new(store: Arc<dyn RecordStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Coach { store, generator }
    }

    /// Answers one chat turn and records it. Always returns a reply.
    pub async fn handle(&self, username: &str, message: &str) -> String {
        let reply = match canned_reply(username, message) {
            Some(reply) => {
                info!("Canned reply for {}", username);
                reply
            }
            None => self.advise(username, message).await,
        };

        self.record_turn(username, message, &reply);
        reply
    }

    async fn advise(&self, username: &str, message: &str) -> String {
        let store = self.store.as_ref();
        let generator = self.generator.as_ref();
        let context = CoachContext::gather(store, username, message);
        debug!(
            "Context for {}: {} recent chat entries, last activity {:?}, message {:?}",
            username,
            context.recent_chat.len(),
            context.stats.last_activity,
            context.original_message
        );

        let intent = route(message);
        info!("Routing message from {} to {:?}", username, intent);

        let outputs = match intent {
            Route::Fitness => {
                let fitness_message = self.fitness_message(username, message);
                vec![(
                    Advisor::Fitness,
                    Advisor::Fitness
                        .consult(generator, &context, &fitness_message)
                        .await,
                )]
            }
            Route::Nutrition => vec![(
                Advisor::Nutrition,
                Advisor::Nutrition.consult(generator, &context, message).await,
            )],
            Route::Wellness => vec![(
                Advisor::Wellness,
                Advisor::Wellness.consult(generator, &context, message).await,
            )],
            Route::Mixed => {
                let fitness_message = self.fitness_message(username, message);
                let (fitness, nutrition, wellness) = tokio::join!(
                    Advisor::Fitness.consult(generator, &context, &fitness_message),
                    Advisor::Nutrition.consult(generator, &context, message),
                    Advisor::Wellness.consult(generator, &context, message),
                );
                vec![
                    (Advisor::Fitness, fitness),
                    (Advisor::Nutrition, nutrition),
                    (Advisor::Wellness, wellness),
                ]
            }
        };

        synthesizer::synthesize(generator, &outputs).await
    }

    /// The message for the fitness advisor, with the intensity note when recovery is poor.
    fn fitness_message(&self, username: &str, message: &str) -> String {
        if recovery::should_reduce_intensity(self.store.as_ref(), username) {
            info!("Recovery guard active for {}", username);
            format!("{}{}", message, Prompts::REDUCE_INTENSITY_NOTE)
        } else {
            message.to_string()
        }
    }

    /// Best effort: a failed write is logged and the reply still goes out.
    fn record_turn(&self, username: &str, message: &str, reply: &str) {
        let store = self.store.as_ref();
        let result = ChatMessage::append(store, username, Role::User, message)
            .and_then(|_| ChatMessage::append(store, username, Role::Coach, reply));
        if let Err(e) = result {
            error!("Failed to save chat turn for {}: {:?}", username, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogKind;
    use crate::openai::testing::ScriptedGenerator;
    use crate::openai::GenerationError;
    use crate::store::{Collection, JsonFileStore};
    use serde_json::json;
    use tempfile::TempDir;

    fn coach_with(generator: Arc<ScriptedGenerator>) -> (TempDir, Arc<JsonFileStore>, Coach) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path()));
        let coach = Coach::new(store.clone(), generator);
        (dir, store, coach)
    }

    fn poor_sleep_logs(store: &JsonFileStore) {
        store
            .put(
                Collection::Wellness,
                "amy",
                json!([
                    {"sleep_quality": 20, "timestamp": "2024-01-01T00:00:00.000000"},
                    {"sleep_quality": 30, "timestamp": "2024-01-02T00:00:00.000000"},
                    {"stress_level": 5, "timestamp": "2024-01-03T00:00:00.000000"}
                ]),
            )
            .unwrap();
    }

    #[test]
    fn canned_replies_match_exact_phrases() {
        assert_eq!(
            canned_reply("amy", "  Hi There "),
            Some(Prompts::greeting_reply("amy"))
        );
        assert_eq!(
            canned_reply("amy", "THX"),
            Some(Prompts::THANKS_REPLY.to_string())
        );
        assert_eq!(
            canned_reply("amy", "see you"),
            Some(Prompts::FAREWELL_REPLY.to_string())
        );
        assert_eq!(canned_reply("amy", "hi coach"), None);
    }

    #[tokio::test]
    async fn greeting_skips_advisors_and_records_two_messages() {
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let (_dir, store, coach) = coach_with(generator.clone());

        let reply = coach.handle("amy", "hi").await;

        assert_eq!(reply, Prompts::greeting_reply("amy"));
        assert!(generator.calls().is_empty());
        let history = ChatMessage::history(store.as_ref(), "amy", 50);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].message, "hi");
        assert_eq!(history[1].role, Role::Coach);
        assert_eq!(history[1].message, reply);
    }

    #[tokio::test]
    async fn fitness_route_consults_one_advisor_then_synthesizes() {
        let generator = Arc::new(ScriptedGenerator::new(|_, system| {
            if system == Prompts::SYNTHESIZER_SYSTEM {
                Ok("final answer".to_string())
            } else {
                Ok("do squats".to_string())
            }
        }));
        let (_dir, _store, coach) = coach_with(generator.clone());

        let reply = coach.handle("amy", "Give me a workout").await;

        assert_eq!(reply, "final answer");
        let calls = generator.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, Prompts::FITNESS_SYSTEM);
        assert!(!calls[0].0.contains("NOTE: Reduce intensity"));
        assert!(calls[1].0.contains("FITNESS: do squats"));
    }

    #[tokio::test]
    async fn recovery_note_goes_to_fitness_leg_only() {
        let generator = Arc::new(ScriptedGenerator::replying("ok"));
        let (_dir, store, coach) = coach_with(generator.clone());
        poor_sleep_logs(&store);

        coach.handle("amy", "what should I do this week").await;

        let calls = generator.calls();
        assert_eq!(calls.len(), 4);
        for (prompt, system) in &calls {
            let noted = prompt.contains("NOTE: Reduce intensity by ~30%");
            assert_eq!(noted, system == Prompts::FITNESS_SYSTEM, "{system}");
        }

        // The transcript keeps the user's own words.
        let history = ChatMessage::history(store.as_ref(), "amy", 50);
        assert_eq!(history[0].message, "what should I do this week");
    }

    #[tokio::test]
    async fn recovery_note_added_on_fitness_route() {
        let generator = Arc::new(ScriptedGenerator::replying("ok"));
        let (_dir, store, coach) = coach_with(generator.clone());
        poor_sleep_logs(&store);

        coach.handle("amy", "gym session today?").await;

        let (prompt, _) = generator.calls().remove(0);
        assert!(prompt.contains("NOTE: Reduce intensity by ~30% this week"));
    }

    #[tokio::test]
    async fn failing_advisor_in_mixed_route_still_yields_reply() {
        let generator = Arc::new(ScriptedGenerator::new(|_, system| {
            if system == Prompts::NUTRITION_SYSTEM || system == Prompts::SYNTHESIZER_SYSTEM {
                Err(GenerationError::NoChoices)
            } else if system == Prompts::FITNESS_SYSTEM {
                Ok("Lift.".to_string())
            } else {
                Ok("Rest.".to_string())
            }
        }));
        let (_dir, store, coach) = coach_with(generator);

        let reply = coach.handle("amy", "what's the weather").await;

        assert_eq!(
            reply,
            "Lift. Nutrition guidance unavailable: no choices in completion response Rest."
        );
        assert_eq!(ChatMessage::count(store.as_ref(), "amy"), 2);
    }

    #[tokio::test]
    async fn context_carries_profile_and_recent_chat() {
        let generator = Arc::new(ScriptedGenerator::replying("ok"));
        let (_dir, store, coach) = coach_with(generator.clone());
        Profile::upsert(
            store.as_ref(),
            Profile {
                name: "amy".to_string(),
                goal: "marathon".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        coach.handle("amy", "hello").await;

        coach.handle("amy", "high protein breakfast?").await;

        let (prompt, system) = generator.calls().remove(0);
        assert_eq!(system, Prompts::NUTRITION_SYSTEM);
        assert!(prompt.contains("\"goal\":\"marathon\""));
        assert!(prompt.contains("user: hello"));

        let context = CoachContext::gather(store.as_ref(), "amy", "next");
        assert_eq!(context.stats.total_chat_messages, 4);
        assert_eq!(context.recent_chat.len(), RECENT_CHAT_WINDOW);
        assert_eq!(context.original_message, "next");
    }

    #[tokio::test]
    async fn legacy_profile_with_nulls_keeps_limitations_in_fitness_prompt() {
        let generator = Arc::new(ScriptedGenerator::replying("ok"));
        let (_dir, store, coach) = coach_with(generator.clone());
        store
            .put(
                Collection::Users,
                "amy",
                json!({"gender": null, "age": 30.0, "physical_limitations": "bad knee"}),
            )
            .unwrap();

        coach.handle("amy", "workout ideas").await;

        let (prompt, system) = generator.calls().remove(0);
        assert_eq!(system, Prompts::FITNESS_SYSTEM);
        assert!(prompt.contains("physical limitations: bad knee"));
        assert!(prompt.contains("exercises for: 30 years old"));
        assert!(!prompt.contains("gender-specific"));
    }

    #[test]
    fn feedback_messages_route_to_matching_advisor() {
        assert_eq!(route(Prompts::MEAL_FEEDBACK), Route::Nutrition);
        assert_eq!(route(Prompts::WORKOUT_FEEDBACK), Route::Fitness);
        assert_eq!(route(Prompts::WELLNESS_FEEDBACK), Route::Wellness);
        assert_eq!(LogKind::Wellness.collection(), Collection::Wellness);
    }
}
