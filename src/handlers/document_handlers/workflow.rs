use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::errors::AppError;
use crate::models::document::{self, CharterRequest, DocumentResponse, TransitionRequest};
use crate::store::AppState;

/// POST /api/documents/{id}/transition
/// 409 when the target is not reachable from the current status,
/// 400 when the transition requires a comment and none was given.
pub async fn transition(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<TransitionRequest>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let doc = document::transition(&mut store, &path, &body, Utc::now())?;
    Ok(HttpResponse::Ok().json(DocumentResponse::from(&doc)))
}

/// POST /api/documents/{id}/charter
/// Starts the FP of an approved FI.
pub async fn create_charter(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CharterRequest>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let fp = document::create_project_charter(&mut store, &path, &body, Utc::now())?;
    Ok(HttpResponse::Created().json(DocumentResponse::from(&fp)))
}
