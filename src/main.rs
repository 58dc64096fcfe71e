use actix_cors::Cors;
use actix_web::web;
use shuttle_actix_web::ShuttleActixWeb;
use shuttle_runtime::SecretStore;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

mod coach;
mod config;
mod models;
mod openai;
mod planner;
mod prompts;
mod routes;
mod store;
mod types;

pub use config::AppConfig;

use coach::Coach;
use openai::{OpenAiGenerator, TextGenerator};
use store::{JsonFileStore, RecordStore};

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub coach: Coach,
    pub generator: Arc<dyn TextGenerator>,
}

#[derive(OpenApi)]
#[openapi(components(schemas(
    models::Profile,
    models::WorkoutPlan,
    models::ChatMessage,
    models::Role,
    models::UserStats,
    types::RegisterRequest,
    types::RegisterResponse,
    types::GenerateWorkoutRequest,
    types::WorkoutResponse,
    types::ChatRequest,
    types::ChatResponse,
    types::HistoryResponse,
    types::FeedbackResponse,
    types::ErrorResponse,
)))]
struct ApiDoc;

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: SecretStore,
) -> ShuttleActixWeb<impl FnOnce(&mut web::ServiceConfig) + Send + Clone + 'static> {
    let app_config = AppConfig::new(&secrets);
    let json_store = JsonFileStore::new(&app_config.data_dir);
    info!(
        "Starting coach with model {} and data dir {}",
        app_config.llm_model,
        json_store.data_dir().display()
    );

    let store: Arc<dyn RecordStore> = Arc::new(json_store);
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiGenerator::new(&app_config));
    let app_state = Arc::new(AppState {
        coach: Coach::new(store.clone(), generator.clone()),
        store,
        generator,
    });

    let config = move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(app_state.clone()));
        cfg.service(Scalar::with_url("/scalar", ApiDoc::openapi()));
        cfg.service(
            web::scope("")
                .wrap(Cors::permissive())
                .configure(routes::configure),
        );
    };

    Ok(config.into())
}
