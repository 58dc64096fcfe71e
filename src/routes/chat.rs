use actix_web::{get, post, web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::info;

use crate::models::chat_message::{ChatMessage, CHAT_HISTORY_LIMIT};
use crate::types::{ChatRequest, ChatResponse, ErrorResponse, HistoryQuery, HistoryResponse};
use crate::AppState;

const GUEST_USERNAME: &str = "Guest";

/// One conversation turn with the coach. The turn is appended to the user's transcript.
#[post("/chat")]
pub async fn chat(
    app_state: web::Data<Arc<AppState>>,
    web::Json(chat_request): web::Json<ChatRequest>,
) -> impl Responder {
    if chat_request.message.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("message required"));
    }
    let username = chat_request
        .username
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| GUEST_USERNAME.to_string());

    info!("Chat received from {}: {}", username, chat_request.message);
    let reply = app_state.coach.handle(&username, &chat_request.message).await;
    info!("AI response sent to {}", username);

    HttpResponse::Ok().json(ChatResponse { reply })
}

/// Most recent transcript entries, oldest first.
#[get("/chat/{username}")]
pub async fn chat_history(
    app_state: web::Data<Arc<AppState>>,
    username: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> web::Json<HistoryResponse> {
    let limit = query
        .limit
        .unwrap_or(CHAT_HISTORY_LIMIT)
        .min(CHAT_HISTORY_LIMIT);
    let username = username.into_inner();
    let history = ChatMessage::history(app_state.store.as_ref(), &username, limit);
    web::Json(HistoryResponse { username, history })
}
