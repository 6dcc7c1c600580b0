use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::handlers::api::query_enum;
use crate::notifications::{
    self, AcknowledgeRequest, Reminder, ReminderFilter, RulesUpdate, SendRequest,
};
use crate::store::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectReminder {
    project_id: String,
    reminder: Option<Reminder>,
}

/// GET /api/projects/{id}/notifications
/// `reminder` is null when the project is up to date.
pub async fn for_project(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let store = state.read();
    let reminder = notifications::reminder_for_project(&store, &path, Utc::now())?;
    Ok(HttpResponse::Ok().json(ProjectReminder {
        project_id: path.into_inner(),
        reminder,
    }))
}

/// POST /api/projects/{id}/notifications/send
pub async fn send(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SendRequest>,
) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let reminder = notifications::send(&mut store, &path, &body.acting_user, Utc::now())?;
    Ok(HttpResponse::Ok().json(reminder))
}

/// POST /api/projects/{id}/notifications/{reminder_id}/ack
pub async fn acknowledge(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<AcknowledgeRequest>,
) -> Result<HttpResponse, AppError> {
    let (project_id, reminder_id) = path.into_inner();
    let mut store = state.write();
    let reminder = notifications::acknowledge(&mut store, &project_id, &reminder_id, &body.acting_user, Utc::now())?;
    Ok(HttpResponse::Ok().json(reminder))
}

/// GET /api/notifications
/// Query params: state (pending|sent|acknowledged), project_id.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let filter = ReminderFilter {
        state: query_enum(&query, "state")?,
        project_id: query.get("project_id").cloned().filter(|s| !s.is_empty()),
    };
    let store = state.read();
    Ok(HttpResponse::Ok().json(notifications::list_reminders(&store, &filter, Utc::now())))
}

/// GET /api/notification-rules
pub async fn rules(state: web::Data<AppState>) -> HttpResponse {
    let store = state.read();
    HttpResponse::Ok().json(&store.notification_rules)
}

/// PUT /api/notification-rules
pub async fn update_rules(state: web::Data<AppState>, body: web::Json<RulesUpdate>) -> Result<HttpResponse, AppError> {
    let mut store = state.write();
    let rules = notifications::update_rules(&mut store, body.into_inner(), Utc::now())?;
    Ok(HttpResponse::Ok().json(rules))
}
