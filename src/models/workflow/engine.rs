use chrono::{DateTime, Utc};

use super::types::*;
use crate::models::document::{Document, DocumentType};
use crate::store::new_id;

/// A legal move in the approval workflow.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub from: WorkflowStatus,
    pub to: WorkflowStatus,
    pub label: &'static str,
    pub role: ActorRole,
}

const fn t(from: WorkflowStatus, to: WorkflowStatus, label: &'static str, role: ActorRole) -> Transition {
    Transition { from, to, label, role }
}

use WorkflowStatus as S;

/// The complete transition table. Both the validator and the action listing read it.
pub const TRANSITIONS: &[Transition] = &[
    t(S::Draft, S::PendingN1, "Soumettre pour validation N+1", ActorRole::Initiator),
    t(S::PendingN1, S::PmoReview, "Valider et transmettre au PMO", ActorRole::N1Validator),
    t(S::PendingN1, S::RejectedN1, "Rejeter", ActorRole::N1Validator),
    t(S::RejectedN1, S::PendingN1, "Soumettre à nouveau", ActorRole::Initiator),
    t(S::PmoReview, S::CommitteeReview, "Transmettre au Comité", ActorRole::Pmo),
    t(S::PmoReview, S::PmoCorrections, "Demander des corrections", ActorRole::Pmo),
    t(S::PmoCorrections, S::PmoReview, "Soumettre les corrections au PMO", ActorRole::Initiator),
    t(S::CommitteeReview, S::Approved, "Approuver (GO)", ActorRole::Committee),
    t(S::CommitteeReview, S::CommitteeCorrections, "Demander des corrections", ActorRole::Committee),
    t(S::CommitteeReview, S::Archived, "Archiver (projet non poursuivi)", ActorRole::Committee),
    t(S::CommitteeCorrections, S::CommitteeReview, "Soumettre les corrections au Comité", ActorRole::Initiator),
];

const CREATE_CHARTER_LABEL: &str = "Créer la Fiche Projet";

/// Statuses reachable in one step from `status`, in table order.
pub fn allowed_next(status: WorkflowStatus) -> Vec<WorkflowStatus> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == status)
        .map(|t| t.to)
        .collect()
}

pub fn find_transition(from: WorkflowStatus, to: WorkflowStatus) -> Option<&'static Transition> {
    TRANSITIONS.iter().find(|t| t.from == from && t.to == to)
}

/// Actions offered for a document. Depends only on the status, except for the
/// charter pseudo-action which is reserved to approved FI documents.
pub fn available_actions(document_type: DocumentType, status: WorkflowStatus) -> Vec<AvailableAction> {
    let mut actions: Vec<AvailableAction> = TRANSITIONS
        .iter()
        .filter(|t| t.from == status)
        .map(|t| AvailableAction {
            kind: ActionKind::Transition,
            target_status: Some(t.to),
            label: t.label,
            role: t.role,
        })
        .collect();

    if status == WorkflowStatus::Approved && document_type == DocumentType::Fi {
        actions.push(AvailableAction {
            kind: ActionKind::CreateProjectCharter,
            target_status: None,
            label: CREATE_CHARTER_LABEL,
            role: ActorRole::Initiator,
        });
    }

    actions
}

/// Move `document` to `target`, recording the mandatory justification.
///
/// Both preconditions are checked before anything is written, so a failed
/// call leaves the document untouched.
pub fn apply_transition(
    document: &mut Document,
    target: WorkflowStatus,
    comment: &str,
    acting_user: &str,
    acting_role: &str,
    now: DateTime<Utc>,
) -> Result<WorkflowComment, WorkflowError> {
    let from = document.status;
    if find_transition(from, target).is_none() {
        return Err(WorkflowError::InvalidTransition {
            from,
            to: target,
            allowed: allowed_next(from),
        });
    }

    let comment = comment.trim();
    if comment.is_empty() {
        return Err(WorkflowError::MissingComment);
    }

    if target == WorkflowStatus::RejectedN1 {
        document.rejection_reason = Some(comment.to_string());
    }

    let entry = WorkflowComment {
        id: new_id("wc"),
        author: acting_user.trim().to_string(),
        role: acting_role.trim().to_string(),
        comment: comment.to_string(),
        status: target,
        created_at: now,
    };
    document.workflow_comments.push(entry.clone());
    document.status = target;
    document.touch(now);

    Ok(entry)
}
