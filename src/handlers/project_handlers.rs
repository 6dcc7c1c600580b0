use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::errors::AppError;
use crate::handlers::api::{paginate, pagination, query_enum};
use crate::models::project::{self, NewProject, ProjectFilter, ProjectResponse, ProjectUpdate, SpendRequest};
use crate::store::AppState;

/// GET /api/projects
/// Query params: status, health, page, per_page.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let filter = ProjectFilter {
        status: query_enum(&query, "status")?,
        health: query_enum(&query, "health")?,
        committee: query_enum(&query, "committee")?,
    };
    let (page, per_page) = pagination(&query);

    let store = state.read();
    let items: Vec<ProjectResponse> = project::find_all(&store, &filter)
        .into_iter()
        .map(ProjectResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(paginate(items, page, per_page)))
}

/// POST /api/projects
pub async fn create(state: web::Data<AppState>, body: web::Json<NewProject>) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let created = project::create_from_charter(&mut store, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(&created)))
}

/// GET /api/projects/{id}
pub async fn read(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let store = state.read();
    let found = project::find_by_id(&store, &path).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ProjectResponse::from(found)))
}

/// POST /api/projects/{id}/updates
pub async fn record_update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ProjectUpdate>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let updated = project::record_update(&mut store, &path, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(ProjectResponse::from(&updated)))
}

/// POST /api/projects/{id}/spend
pub async fn record_spend(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SpendRequest>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let updated = project::record_spend(&mut store, &path, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(ProjectResponse::from(&updated)))
}
