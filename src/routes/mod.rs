pub mod chat;
pub mod log;
pub mod profile;
pub mod stats;
pub mod workout;

use actix_web::web;

/// Mounts every endpoint. Shared by the server and the route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(profile::register)
        .service(profile::get_profile)
        .service(workout::generate_workout)
        .service(workout::latest_workout)
        .service(chat::chat)
        .service(chat::chat_history)
        .service(stats::user_stats)
        .service(
            web::scope("/api/log")
                .service(log::log_meal)
                .service(log::log_workout)
                .service(log::log_wellness),
        );
}
