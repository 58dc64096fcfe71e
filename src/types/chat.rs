use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ChatMessage;

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Defaults to "Guest".
    pub username: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct HistoryResponse {
    pub username: String,
    pub history: Vec<ChatMessage>,
}
