use actix_web::{get, post, web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::{error, info};

use crate::models::Profile;
use crate::types::{ErrorResponse, RegisterRequest, RegisterResponse};
use crate::AppState;

/// Create or update a profile. Re-registering a name replaces its fields.
#[post("/register")]
pub async fn register(
    app_state: web::Data<Arc<AppState>>,
    web::Json(register_request): web::Json<RegisterRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let profile = match register_request.into_profile() {
        Ok(profile) => profile,
        Err(message) => return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(message))),
    };

    let profile = Profile::upsert(app_state.store.as_ref(), profile).map_err(|e| {
        error!("Failed to save profile: {:?}", e);
        actix_web::error::ErrorInternalServerError(e)
    })?;

    info!("User registered/updated: {}", profile.name);
    Ok(HttpResponse::Ok().json(RegisterResponse {
        status: "ok".to_string(),
        profile,
    }))
}

#[get("/profile/{username}")]
pub async fn get_profile(
    app_state: web::Data<Arc<AppState>>,
    username: web::Path<String>,
) -> impl Responder {
    match Profile::get(app_state.store.as_ref(), &username) {
        Some(profile) => HttpResponse::Ok().json(profile),
        None => HttpResponse::NotFound().json(ErrorResponse::new("user not found")),
    }
}
