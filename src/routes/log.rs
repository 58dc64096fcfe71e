use actix_web::{post, web, HttpResponse};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::{LogEntry, LogKind};
use crate::prompts::Prompts;
use crate::types::{ErrorResponse, FeedbackResponse};
use crate::AppState;

#[post("/meal")]
pub async fn log_meal(
    app_state: web::Data<Arc<AppState>>,
    body: web::Bytes,
) -> Result<HttpResponse, actix_web::Error> {
    log_with_feedback(
        &app_state,
        LogKind::Meal,
        parse_payload(&body),
        Prompts::MEAL_FEEDBACK,
    )
    .await
}

#[post("/workout")]
pub async fn log_workout(
    app_state: web::Data<Arc<AppState>>,
    body: web::Bytes,
) -> Result<HttpResponse, actix_web::Error> {
    log_with_feedback(
        &app_state,
        LogKind::Workout,
        parse_payload(&body),
        Prompts::WORKOUT_FEEDBACK,
    )
    .await
}

#[post("/wellness")]
pub async fn log_wellness(
    app_state: web::Data<Arc<AppState>>,
    body: web::Bytes,
) -> Result<HttpResponse, actix_web::Error> {
    log_with_feedback(
        &app_state,
        LogKind::Wellness,
        parse_payload(&body),
        Prompts::WELLNESS_FEEDBACK,
    )
    .await
}

/// Any content type is accepted. A body that is not a JSON object reads as empty,
/// which then fails the username check with a JSON error.
fn parse_payload(body: &[u8]) -> Map<String, Value> {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("Unusable log payload, treating as empty: {}", e);
        Map::new()
    })
}

/// Stores the payload as-is, then asks the coach to react to it.
async fn log_with_feedback(
    app_state: &AppState,
    kind: LogKind,
    payload: Map<String, Value>,
    feedback_prompt: &str,
) -> Result<HttpResponse, actix_web::Error> {
    let username = match payload.get("username").and_then(Value::as_str) {
        Some(username) if !username.is_empty() => username.to_string(),
        _ => return Ok(HttpResponse::BadRequest().json(ErrorResponse::new("username required"))),
    };

    LogEntry::append(app_state.store.as_ref(), kind, &username, payload).map_err(|e| {
        error!("Failed to save {:?} log for {}: {:?}", kind, username, e);
        actix_web::error::ErrorInternalServerError(e)
    })?;
    info!("{:?} logged for {}", kind, username);

    let feedback = app_state.coach.handle(&username, feedback_prompt).await;
    Ok(HttpResponse::Ok().json(FeedbackResponse {
        status: "ok".to_string(),
        feedback,
    }))
}
