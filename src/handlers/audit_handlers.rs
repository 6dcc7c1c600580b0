use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use crate::audit::{self, AuditEntry};
use crate::handlers::api::{paginate, pagination};
use crate::store::AppState;

fn non_empty<'a>(query: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    query.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// GET /api/audit
/// `action` matches by prefix, so `document.` selects every document event.
pub async fn list(state: web::Data<AppState>, query: web::Query<HashMap<String, String>>) -> HttpResponse {
    let (page, per_page) = pagination(&query);
    let action_filter = non_empty(&query, "action");

    let store = state.read();
    let entries: Vec<&AuditEntry> = audit::find_entries(
        &store,
        non_empty(&query, "target_type"),
        non_empty(&query, "target_id"),
    )
    .into_iter()
    .filter(|e| action_filter.is_none_or(|a| e.action.starts_with(a)))
    .collect();

    HttpResponse::Ok().json(paginate(entries, page, per_page))
}
