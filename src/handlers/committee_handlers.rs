use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::errors::AppError;
use crate::handlers::api::query_enum;
use crate::models::committee::{
    self, AddItemRequest, CommitteeSession, CompleteRequest, DecisionRequest, NewSession, SessionFilter,
};
use crate::store::AppState;

/// GET /api/committees/sessions
/// Query params: committee, status.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let filter = SessionFilter {
        committee: query_enum(&query, "committee")?,
        status: query_enum(&query, "status")?,
    };
    let store = state.read();
    let sessions: Vec<&CommitteeSession> = committee::find_all(&store, &filter);
    Ok(HttpResponse::Ok().json(sessions))
}

/// POST /api/committees/sessions
pub async fn create(state: web::Data<AppState>, body: web::Json<NewSession>) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let session = committee::create(&mut store, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Created().json(session))
}

/// GET /api/committees/sessions/{id}
pub async fn read(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let store = state.read();
    let session = committee::find_by_id(&store, &path).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(session))
}

/// POST /api/committees/sessions/{id}/items
pub async fn add_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AddItemRequest>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let session = committee::add_item(&mut store, &path, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(session))
}

/// POST /api/committees/sessions/{id}/decisions
/// Records the decision only; the document is moved through its own transition.
pub async fn record_decision(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<DecisionRequest>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let session = committee::record_decision(&mut store, &path, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(session))
}

/// POST /api/committees/sessions/{id}/complete
pub async fn complete(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CompleteRequest>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let session = committee::complete(&mut store, &path, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(session))
}

/// GET /api/committees/summary
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    let store = state.read();
    HttpResponse::Ok().json(committee::summary(&store))
}

/// GET /api/committees/portfolio
/// Query params: status (project status).
pub async fn portfolio(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let status = query_enum(&query, "status")?;
    let store = state.read();
    Ok(HttpResponse::Ok().json(committee::portfolio(&store, status)))
}
