use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement for a logged entry, with the coach's reaction to it.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct FeedbackResponse {
    pub status: String,
    pub feedback: String,
}
