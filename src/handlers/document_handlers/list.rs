use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::errors::AppError;
use crate::handlers::api::{paginate, pagination, query_filter};
use crate::models::document::{self, DocumentFilter, DocumentResponse};
use crate::models::workflow::{self, AvailableAction, WorkflowStatus};
use crate::store::AppState;

/// GET /api/documents
/// Query params: status, type (FI|FP), q (search), page, per_page.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let filter = DocumentFilter {
        status: query_filter(&query, "status")?,
        document_type: query_filter(&query, "type")?,
        search: query.get("q").cloned(),
    };
    let (page, per_page) = pagination(&query);

    let store = state.read();
    let items: Vec<DocumentResponse> = document::find_all(&store, &filter)
        .into_iter()
        .map(DocumentResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(paginate(items, page, per_page)))
}

/// GET /api/documents/{id}
pub async fn read(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let store = state.read();
    let doc = document::find_by_id(&store, &path).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(DocumentResponse::from(doc)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionsResponse {
    status: WorkflowStatus,
    allowed: Vec<WorkflowStatus>,
    actions: Vec<AvailableAction>,
}

/// GET /api/documents/{id}/actions
pub async fn actions(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let store = state.read();
    let doc = document::find_by_id(&store, &path).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ActionsResponse {
        status: doc.status,
        allowed: workflow::allowed_next(doc.status),
        actions: workflow::available_actions(doc.document_type, doc.status),
    }))
}
