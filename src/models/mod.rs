pub mod chat_message;
pub mod log_entry;
pub mod profile;
pub mod stats;
pub mod workout_plan;

pub use chat_message::{ChatMessage, Role};
pub use log_entry::{LogEntry, LogKind};
pub use profile::Profile;
pub use stats::UserStats;
pub use workout_plan::WorkoutPlan;
