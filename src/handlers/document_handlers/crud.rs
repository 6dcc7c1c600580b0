use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::document::{self, DocumentPatch, DocumentResponse, NewDocument};
use crate::store::AppState;

/// POST /api/documents
pub async fn create(state: web::Data<AppState>, body: web::Json<NewDocument>) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let doc = document::create(&mut store, body.into_inner(), Utc::now())?;
    log::info!("Document {} ({}) created by {}", doc.id, doc.document_type.label(), doc.created_by);
    Ok(HttpResponse::Created().json(DocumentResponse::from(&doc)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub acting_user: String,
    #[serde(flatten)]
    pub patch: DocumentPatch,
}

/// PATCH /api/documents/{id}
/// Only allowed while the document is in `draft` or a corrections status.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<EditRequest>,
) -> Result<HttpResponse, AppError> {
    let EditRequest { acting_user, patch } = body.into_inner();
    let mut store = state.write();
    let doc = document::update_fields(&mut store, &path, patch, acting_user.trim(), Utc::now())?;
    Ok(HttpResponse::Ok().json(DocumentResponse::from(&doc)))
}
