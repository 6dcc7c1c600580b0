use std::collections::HashMap;

use actix_web::{HttpResponse, http::header, web};
use chrono::Utc;

use crate::errors::AppError;
use crate::models::value_list::{self, DeleteRequest, ItemInput, MoveRequest};
use crate::store::AppState;

/// GET /api/value-lists
/// Query params: q (name/description search), category.
pub async fn list(state: web::Data<AppState>, query: web::Query<HashMap<String, String>>) -> HttpResponse {
    let search = query.get("q").map(|s| s.as_str());
    let category = query.get("category").map(|s| s.as_str()).filter(|s| !s.is_empty());
    let store = state.read();
    HttpResponse::Ok().json(value_list::find_all(&store, search, category))
}

/// GET /api/value-lists/{id}
pub async fn read(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let store = state.read();
    let list = value_list::find_by_id(&store, &path).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(list))
}

/// GET /api/value-lists/{id}/export
/// Same document as `read`, served as a download.
pub async fn export(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let store = state.read();
    let list = value_list::find_by_id(&store, &path).ok_or(AppError::NotFound)?;
    let filename = format!("{}_{}.json", list.system_key, Utc::now().format("%Y-%m-%d"));
    Ok(HttpResponse::Ok()
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .json(list))
}

/// GET /api/value-lists/{id}/audit
pub async fn audit(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let store = state.read();
    value_list::find_by_id(&store, &path).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(value_list::audit_entries(&store, &path)))
}

/// POST /api/value-lists/{id}/items
pub async fn add_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ItemInput>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let outcome = value_list::add_item(&mut store, &path, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Created().json(outcome))
}

/// PUT /api/value-lists/{id}/items/{item_id}
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<ItemInput>,
) -> Result<HttpResponse, AppError> {
    let (list_id, item_id) = path.into_inner();
    let mut store = state.write();
    let outcome = value_list::update_item(&mut store, &list_id, &item_id, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /api/value-lists/{id}/items/{item_id}
pub async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<DeleteRequest>,
) -> Result<HttpResponse, AppError> {
    let (list_id, item_id) = path.into_inner();
    let mut store = state.write();
    let outcome = value_list::delete_item(&mut store, &list_id, &item_id, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// POST /api/value-lists/{id}/items/{item_id}/move
pub async fn move_item(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<MoveRequest>,
) -> Result<HttpResponse, AppError> {
    let (list_id, item_id) = path.into_inner();
    let mut store = state.write();
    let outcome = value_list::move_item(&mut store, &list_id, &item_id, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(outcome))
}
