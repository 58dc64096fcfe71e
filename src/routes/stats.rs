use actix_web::{get, web};
use std::sync::Arc;

use crate::models::UserStats;
use crate::AppState;

/// Activity summary across every log for one user. Unknown users get zeros.
#[get("/stats/{username}")]
pub async fn user_stats(
    app_state: web::Data<Arc<AppState>>,
    username: web::Path<String>,
) -> web::Json<UserStats> {
    web::Json(UserStats::for_user(app_state.store.as_ref(), &username))
}
