use chrono::{DateTime, Utc};

use super::types::*;
use super::validation::validate_document;
use crate::audit;
use crate::errors::AppError;
use crate::models::value_list;
use crate::models::workflow::{self, WorkflowStatus};
use crate::store::{Store, new_id};
use crate::validate::{self, FieldError, FieldErrors};

/// Create a document in `draft`. No workflow comment is recorded for creation.
pub fn create(store: &mut Store, input: NewDocument, now: DateTime<Utc>) -> Result<Document, AppError> {
    let doc = Document {
        id: new_id("doc"),
        document_type: input.document_type,
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        objectives: input.objectives.trim().to_string(),
        scope: input.scope.trim().to_string(),
        budget_estimated: input.budget_estimated,
        budget_min: input.budget_min,
        budget_max: input.budget_max,
        timeline: input.timeline,
        initiating_service: input.initiating_service.trim().to_string(),
        initiator: input.initiator.trim().to_string(),
        n1_validator: input.n1_validator,
        project_manager: input.project_manager,
        sponsor: input.sponsor,
        created_by: input.created_by.trim().to_string(),
        fi_id: input.fi_id,
        status: WorkflowStatus::Draft,
        workflow_comments: Vec::new(),
        rejection_reason: None,
        created_at: now,
        updated_at: now,
        version: 1,
    };

    validate_document(&doc)?;
    check_service(store, &doc)?;
    check_origin(store, &doc)?;

    audit::log(
        store,
        &doc.created_by,
        "document.created",
        "document",
        &doc.id,
        serde_json::json!({
            "document_type": doc.document_type,
            "title": doc.title,
            "summary": format!("Created {} '{}'", doc.document_type.label(), doc.title),
        }),
        now,
    );
    store.documents.insert(doc.id.clone(), doc.clone());
    Ok(doc)
}

pub fn find_by_id<'a>(store: &'a Store, id: &str) -> Option<&'a Document> {
    store.documents.get(id)
}

/// All documents matching `filter`, most recently updated first.
pub fn find_all<'a>(store: &'a Store, filter: &DocumentFilter) -> Vec<&'a Document> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut items: Vec<&Document> = store
        .documents
        .values()
        .filter(|d| filter.status.is_none_or(|s| d.status == s))
        .filter(|d| filter.document_type.is_none_or(|t| d.document_type == t))
        .filter(|d| match &needle {
            None => true,
            Some(q) => {
                d.title.to_lowercase().contains(q)
                    || d.description.to_lowercase().contains(q)
                    || d.initiator.to_lowercase().contains(q)
            }
        })
        .collect();

    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
    items
}

/// The initiating service must be an active entry of the `services` value list
/// when that list is configured.
fn check_service(store: &Store, doc: &Document) -> Result<(), AppError> {
    let services = value_list::active_labels(store, "services");
    if services.is_empty() || services.iter().any(|s| s == &doc.initiating_service) {
        return Ok(());
    }
    Err(AppError::Validation(vec![FieldError::new(
        "initiatingService",
        format!("'{}' is not an active service", doc.initiating_service),
    )]))
}

/// An FI has no origin. An FP may only point at an approved FI that has no
/// charter yet.
fn check_origin(store: &Store, doc: &Document) -> Result<(), AppError> {
    let Some(fi_id) = doc.fi_id.as_deref() else {
        return Ok(());
    };
    let invalid = |message: String| Err(AppError::Validation(vec![FieldError::new("fiId", message)]));

    if doc.document_type == DocumentType::Fi {
        return invalid("An initiative (FI) cannot reference another initiative".to_string());
    }
    let Some(fi) = store.documents.get(fi_id) else {
        return invalid(format!("Originating initiative '{fi_id}' does not exist"));
    };
    if fi.document_type != DocumentType::Fi || fi.status != WorkflowStatus::Approved {
        return invalid(format!("'{fi_id}' is not an approved initiative (FI)"));
    }
    if has_charter(store, fi_id) {
        return invalid(format!("A project charter already exists for '{fi_id}'"));
    }
    Ok(())
}

fn has_charter(store: &Store, fi_id: &str) -> bool {
    store
        .documents
        .values()
        .any(|d| d.document_type == DocumentType::Fp && d.fi_id.as_deref() == Some(fi_id))
}

fn check_version(doc: &Document, expected: Option<u64>) -> Result<(), AppError> {
    match expected {
        Some(expected) if expected != doc.version => Err(AppError::Conflict {
            expected,
            actual: doc.version,
        }),
        _ => Ok(()),
    }
}

/// Edit fields of a document in `draft` or a `*_corrections` status.
/// The merged document is validated before anything is stored.
pub fn update_fields(
    store: &mut Store,
    id: &str,
    patch: DocumentPatch,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<Document, AppError> {
    let current = store.documents.get(id).ok_or(AppError::NotFound)?;
    check_version(current, patch.expected_version)?;
    if !current.status.is_editable() {
        return Err(AppError::NotEditable(current.status));
    }

    let mut updated = current.clone();
    if let Some(v) = patch.title {
        updated.title = v.trim().to_string();
    }
    if let Some(v) = patch.description {
        updated.description = v.trim().to_string();
    }
    if let Some(v) = patch.objectives {
        updated.objectives = v.trim().to_string();
    }
    if let Some(v) = patch.scope {
        updated.scope = v.trim().to_string();
    }
    if let Some(v) = patch.initiating_service {
        updated.initiating_service = v.trim().to_string();
    }
    if patch.budget_estimated.is_some() {
        updated.budget_estimated = patch.budget_estimated;
    }
    if patch.budget_min.is_some() {
        updated.budget_min = patch.budget_min;
    }
    if patch.budget_max.is_some() {
        updated.budget_max = patch.budget_max;
    }
    if let Some(v) = patch.timeline {
        updated.timeline = v;
    }
    if patch.n1_validator.is_some() {
        updated.n1_validator = patch.n1_validator;
    }
    if patch.project_manager.is_some() {
        updated.project_manager = patch.project_manager;
    }
    if patch.sponsor.is_some() {
        updated.sponsor = patch.sponsor;
    }

    validate_document(&updated)?;
    check_service(store, &updated)?;
    updated.touch(now);

    audit::log(
        store,
        actor,
        "document.updated",
        "document",
        id,
        serde_json::json!({ "version": updated.version, "summary": format!("Edited '{}'", updated.title) }),
        now,
    );
    store.documents.insert(id.to_string(), updated.clone());
    Ok(updated)
}

/// Apply a workflow transition to a stored document.
pub fn transition(
    store: &mut Store,
    id: &str,
    request: &TransitionRequest,
    now: DateTime<Utc>,
) -> Result<Document, AppError> {
    let doc = store.documents.get_mut(id).ok_or(AppError::NotFound)?;
    check_version(doc, request.expected_version)?;
    check_actor(doc, request)?;

    let from = doc.status;
    let result = workflow::apply_transition(
        doc,
        request.target_status,
        &request.comment,
        &request.acting_user,
        &request.acting_role,
        now,
    );
    let entry = match result {
        Ok(entry) => entry,
        Err(e) => {
            log::warn!("Rejected transition on document {id}: {e}");
            return Err(e.into());
        }
    };
    let updated = doc.clone();

    log::info!(
        "Document {id} moved {from} -> {} by {} ({})",
        updated.status,
        entry.author,
        entry.role
    );
    audit::log(
        store,
        &entry.author,
        &format!("document.{}", updated.status),
        "document",
        id,
        serde_json::json!({
            "from": from,
            "to": updated.status,
            "comment": entry.comment,
            "summary": format!("'{}': {} -> {}", updated.title, from.label(), updated.status.label()),
        }),
        now,
    );
    Ok(updated)
}

/// The acting user and role are required. A bad target or a missing comment
/// is still reported first.
fn check_actor(doc: &Document, request: &TransitionRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.add("actingUser", validate::validate_required(&request.acting_user, "Acting user", 200));
    errors.add("actingRole", validate::validate_required(&request.acting_role, "Acting role", 100));
    if errors.is_empty() {
        return Ok(());
    }

    if workflow::find_transition(doc.status, request.target_status).is_none() {
        return Err(AppError::InvalidTransition {
            from: doc.status,
            to: request.target_status,
            allowed: workflow::allowed_next(doc.status),
        });
    }
    if request.comment.trim().is_empty() {
        return Err(AppError::MissingComment);
    }
    errors.into_result()
}

/// Start the FP for an approved FI. Fields carry over; the charter begins in `draft`.
pub fn create_project_charter(
    store: &mut Store,
    fi_id: &str,
    request: &CharterRequest,
    now: DateTime<Utc>,
) -> Result<Document, AppError> {
    let actor = request.acting_user.trim();
    let fi = store.documents.get(fi_id).ok_or(AppError::NotFound)?;
    if fi.document_type != DocumentType::Fi || fi.status != WorkflowStatus::Approved {
        return Err(AppError::Validation(vec![FieldError::new(
            "fiId",
            "A project charter can only be created from an approved initiative (FI)",
        )]));
    }
    if has_charter(store, fi_id) {
        return Err(AppError::Validation(vec![FieldError::new(
            "fiId",
            "A project charter already exists for this initiative",
        )]));
    }

    let charter = Document {
        id: new_id("doc"),
        document_type: DocumentType::Fp,
        title: fi.title.clone(),
        description: fi.description.clone(),
        objectives: fi.objectives.clone(),
        scope: fi.scope.clone(),
        budget_estimated: fi.budget_estimated,
        budget_min: fi.budget_min,
        budget_max: fi.budget_max,
        timeline: fi.timeline.clone(),
        initiating_service: fi.initiating_service.clone(),
        initiator: fi.initiator.clone(),
        n1_validator: fi.n1_validator.clone(),
        project_manager: request.project_manager.clone(),
        sponsor: request.sponsor.clone(),
        created_by: actor.to_string(),
        fi_id: Some(fi_id.to_string()),
        status: WorkflowStatus::Draft,
        workflow_comments: Vec::new(),
        rejection_reason: None,
        created_at: now,
        updated_at: now,
        version: 1,
    };

    audit::log(
        store,
        actor,
        "document.charter_created",
        "document",
        &charter.id,
        serde_json::json!({ "fi_id": fi_id, "summary": format!("Created project charter for '{}'", charter.title) }),
        now,
    );
    store.documents.insert(charter.id.clone(), charter.clone());
    Ok(charter)
}
