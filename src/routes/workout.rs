use actix_web::{get, post, web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::{error, info};

use crate::models::{Profile, WorkoutPlan};
use crate::planner::{self, WorkoutRequest, DEFAULT_DURATION_MINUTES};
use crate::types::{ErrorResponse, GenerateWorkoutRequest, WorkoutResponse};
use crate::AppState;

/// Generate a plan from the stored profile. Replaces the user's previous plan.
#[post("/workout")]
pub async fn generate_workout(
    app_state: web::Data<Arc<AppState>>,
    web::Json(workout_request): web::Json<GenerateWorkoutRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let Some(username) = workout_request.username.filter(|u| !u.is_empty()) else {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new("username required")));
    };
    let Some(profile) = Profile::get(app_state.store.as_ref(), &username) else {
        return Ok(HttpResponse::NotFound().json(ErrorResponse::new("user not found")));
    };

    info!("Generating workout for {}", username);
    let request = WorkoutRequest::from_profile(
        &profile,
        workout_request
            .duration_minutes
            .unwrap_or(DEFAULT_DURATION_MINUTES),
    );
    let text = planner::generate_workout(app_state.generator.as_ref(), &request).await;

    let plan = WorkoutPlan::save(app_state.store.as_ref(), &username, &text).map_err(|e| {
        error!("Failed to save workout for {}: {:?}", username, e);
        actix_web::error::ErrorInternalServerError(e)
    })?;

    Ok(HttpResponse::Ok().json(WorkoutResponse {
        status: "ok".to_string(),
        plan,
    }))
}

#[get("/workout/{username}")]
pub async fn latest_workout(
    app_state: web::Data<Arc<AppState>>,
    username: web::Path<String>,
) -> impl Responder {
    match WorkoutPlan::latest(app_state.store.as_ref(), &username) {
        Some(plan) => HttpResponse::Ok().json(plan),
        None => HttpResponse::NotFound().json(ErrorResponse::new("no workout plan yet")),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use super::*;
    use crate::openai::testing::ScriptedGenerator;
    use crate::routes::{configure, test_support};

    #[actix_web::test]
    async fn generates_and_stores_plan() {
        let (_dir, state) =
            test_support::app_state(Arc::new(ScriptedGenerator::replying("Run 5k easy")));
        Profile::upsert(
            state.store.as_ref(),
            Profile {
                name: "amy".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/workout")
            .set_json(json!({"username": "amy"}))
            .to_request();
        let resp: WorkoutResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.plan.text, "Run 5k easy");

        let req = test::TestRequest::get().uri("/workout/amy").to_request();
        let plan: WorkoutPlan = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plan, resp.plan);
    }

    #[actix_web::test]
    async fn failed_generation_stores_fallback_plan() {
        let (_dir, state) = test_support::app_state(Arc::new(ScriptedGenerator::failing()));
        Profile::upsert(
            state.store.as_ref(),
            Profile {
                name: "amy".to_string(),
                fitness_level: "beginner".to_string(),
                goal: "mobility".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/workout")
            .set_json(json!({"username": "amy", "duration_minutes": 20}))
            .to_request();
        let resp: WorkoutResponse = test::call_and_read_body_json(&app, req).await;
        assert!(resp
            .plan
            .text
            .starts_with("Workout (20 minutes) - Level: beginner, Goal: mobility"));
    }

    #[actix_web::test]
    async fn unknown_user_gets_not_found() {
        let (_dir, state) = test_support::app_state(Arc::new(ScriptedGenerator::failing()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/workout")
            .set_json(json!({"username": "ghost"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::get().uri("/workout/ghost").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
