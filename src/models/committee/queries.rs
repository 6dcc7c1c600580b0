use chrono::{DateTime, Utc};

use super::types::*;
use crate::audit;
use crate::errors::AppError;
use crate::models::project::{self, HealthStatus, ProjectFilter};
use crate::models::workflow::WorkflowStatus;
use crate::store::{Store, new_id};
use crate::validate::FieldError;

fn invalid(field: &str, message: impl Into<String>) -> AppError {
    AppError::Validation(vec![FieldError::new(field, message)])
}

pub fn create(store: &mut Store, input: NewSession, now: DateTime<Utc>) -> Result<CommitteeSession, AppError> {
    if input.acting_user.trim().is_empty() {
        return Err(invalid("actingUser", "Acting user is required"));
    }
    let session = CommitteeSession {
        id: new_id("cs"),
        committee: input.committee,
        date: input.date,
        time: input.time,
        location: input.location.trim().to_string(),
        status: SessionStatus::Scheduled,
        items: Vec::new(),
        notes: None,
    };

    audit::log(
        store,
        input.acting_user.trim(),
        "committee.session_created",
        "committee_session",
        &session.id,
        serde_json::json!({
            "committee": session.committee,
            "date": session.date,
            "summary": format!("Scheduled {} on {}", session.committee.label(), session.date),
        }),
        now,
    );
    store.committee_sessions.insert(session.id.clone(), session.clone());
    Ok(session)
}

pub fn find_by_id<'a>(store: &'a Store, id: &str) -> Option<&'a CommitteeSession> {
    store.committee_sessions.get(id)
}

/// Sessions matching `filter`, most recent date first.
pub fn find_all<'a>(store: &'a Store, filter: &SessionFilter) -> Vec<&'a CommitteeSession> {
    let mut items: Vec<&CommitteeSession> = store
        .committee_sessions
        .values()
        .filter(|s| filter.committee.is_none_or(|c| s.committee == c))
        .filter(|s| filter.status.is_none_or(|st| s.status == st))
        .collect();
    items.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.time.cmp(&a.time))
            .then_with(|| a.id.cmp(&b.id))
    });
    items
}

/// Put a document under committee review on the session agenda.
pub fn add_item(
    store: &mut Store,
    session_id: &str,
    request: AddItemRequest,
    now: DateTime<Utc>,
) -> Result<CommitteeSession, AppError> {
    let doc = store
        .documents
        .get(&request.document_id)
        .ok_or_else(|| invalid("documentId", format!("Document '{}' does not exist", request.document_id)))?;
    if doc.status != WorkflowStatus::CommitteeReview {
        return Err(invalid(
            "documentId",
            format!("Only documents in committee review can be scheduled (status is {})", doc.status),
        ));
    }
    let title = doc.title.clone();
    let project_id = store
        .projects
        .values()
        .find(|p| p.document_id == request.document_id)
        .map(|p| p.id.clone());

    let session = store
        .committee_sessions
        .get_mut(session_id)
        .ok_or(AppError::NotFound)?;
    if !session.status.is_open() {
        return Err(invalid("sessionId", "The session is closed"));
    }
    if session.items.iter().any(|i| i.document_id == request.document_id) {
        return Err(invalid("documentId", "The document is already on the agenda"));
    }
    session.items.push(SessionItem {
        document_id: request.document_id.clone(),
        title,
        decision: Decision::Pending,
        recommendation: None,
        project_id,
    });
    let updated = session.clone();

    audit::log(
        store,
        request.acting_user.trim(),
        "committee.item_added",
        "committee_session",
        session_id,
        serde_json::json!({ "document_id": request.document_id }),
        now,
    );
    Ok(updated)
}

/// Record the committee's decision on an agenda item. The document's workflow
/// status is left alone: the transition is applied separately with its comment.
pub fn record_decision(
    store: &mut Store,
    session_id: &str,
    request: DecisionRequest,
    now: DateTime<Utc>,
) -> Result<CommitteeSession, AppError> {
    let session = store
        .committee_sessions
        .get_mut(session_id)
        .ok_or(AppError::NotFound)?;
    if !session.status.is_open() {
        return Err(invalid("sessionId", "The session is closed"));
    }
    let item = session
        .items
        .iter_mut()
        .find(|i| i.document_id == request.document_id)
        .ok_or_else(|| invalid("documentId", "The document is not on this session's agenda"))?;

    item.decision = request.decision;
    item.recommendation = request
        .recommendation
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    if session.status == SessionStatus::Scheduled {
        session.status = SessionStatus::InProgress;
    }
    let updated = session.clone();

    audit::log(
        store,
        request.acting_user.trim(),
        "committee.decision",
        "committee_session",
        session_id,
        serde_json::json!({ "document_id": request.document_id, "decision": request.decision }),
        now,
    );
    Ok(updated)
}

pub fn complete(
    store: &mut Store,
    session_id: &str,
    request: CompleteRequest,
    now: DateTime<Utc>,
) -> Result<CommitteeSession, AppError> {
    let session = store
        .committee_sessions
        .get_mut(session_id)
        .ok_or(AppError::NotFound)?;
    if !session.status.is_open() {
        return Err(invalid("sessionId", "The session is closed"));
    }
    session.status = SessionStatus::Completed;
    session.notes = request.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let updated = session.clone();

    audit::log(
        store,
        request.acting_user.trim(),
        "committee.session_completed",
        "committee_session",
        session_id,
        serde_json::json!({ "items": updated.items.len() }),
        now,
    );
    Ok(updated)
}

pub fn summary(store: &Store) -> CommitteeSummary {
    let mut summary = CommitteeSummary::default();
    for session in store.committee_sessions.values() {
        summary.total_sessions += 1;
        match session.status {
            SessionStatus::Scheduled | SessionStatus::InProgress => summary.scheduled += 1,
            SessionStatus::Completed => summary.completed += 1,
            SessionStatus::Cancelled => summary.cancelled += 1,
        }
        for item in &session.items {
            match item.decision {
                Decision::Pending => summary.pending_items += 1,
                Decision::Approved => summary.approved_items += 1,
                Decision::Rejected => summary.rejected_items += 1,
            }
        }
    }
    summary
}

/// Projects grouped by steering committee, one entry per committee even when
/// it has nothing assigned. `status` narrows the project list and the counts.
pub fn portfolio(store: &Store, status: Option<project::ProjectStatus>) -> Vec<CommitteePortfolio> {
    CommitteeType::ALL
        .iter()
        .map(|&committee| {
            let filter = ProjectFilter {
                status,
                committee: Some(committee),
                ..Default::default()
            };
            let projects = project::find_all(store, &filter);
            let count = |h: HealthStatus| projects.iter().filter(|p| p.monitoring.health_status == h).count();
            CommitteePortfolio {
                committee,
                label: committee.label(),
                project_count: projects.len(),
                green: count(HealthStatus::Green),
                orange: count(HealthStatus::Orange),
                red: count(HealthStatus::Red),
                projects: projects
                    .iter()
                    .map(|p| ProjectBrief {
                        id: p.id.clone(),
                        title: p.title.clone(),
                        project_manager: p.governance.project_manager.clone(),
                        status: p.status,
                        health_status: p.monitoring.health_status,
                        completion_percentage: p.monitoring.completion_percentage,
                    })
                    .collect(),
            }
        })
        .collect()
}
