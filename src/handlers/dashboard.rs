use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::models::dashboard;
use crate::store::AppState;

/// GET /api/dashboard
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    let store = state.read();
    HttpResponse::Ok().json(dashboard::stats(&store, Utc::now()))
}
