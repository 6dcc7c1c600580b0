use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of an FI/FP document in the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Draft,
    #[serde(rename = "pending_n1")]
    PendingN1,
    #[serde(rename = "rejected_n1")]
    RejectedN1,
    PmoReview,
    PmoCorrections,
    CommitteeReview,
    CommitteeCorrections,
    Approved,
    Archived,
}

impl WorkflowStatus {
    pub const ALL: [WorkflowStatus; 9] = [
        WorkflowStatus::Draft,
        WorkflowStatus::PendingN1,
        WorkflowStatus::RejectedN1,
        WorkflowStatus::PmoReview,
        WorkflowStatus::PmoCorrections,
        WorkflowStatus::CommitteeReview,
        WorkflowStatus::CommitteeCorrections,
        WorkflowStatus::Approved,
        WorkflowStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "draft",
            WorkflowStatus::PendingN1 => "pending_n1",
            WorkflowStatus::RejectedN1 => "rejected_n1",
            WorkflowStatus::PmoReview => "pmo_review",
            WorkflowStatus::PmoCorrections => "pmo_corrections",
            WorkflowStatus::CommitteeReview => "committee_review",
            WorkflowStatus::CommitteeCorrections => "committee_corrections",
            WorkflowStatus::Approved => "approved",
            WorkflowStatus::Archived => "archived",
        }
    }

    /// Display label shown next to a document.
    pub fn label(self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "En cours de rédaction",
            WorkflowStatus::PendingN1 => "En attente validation N+1",
            WorkflowStatus::RejectedN1 => "Rejeté par N+1",
            WorkflowStatus::PmoReview => "En revue par PMO",
            WorkflowStatus::PmoCorrections => "Corrections demandées par PMO",
            WorkflowStatus::CommitteeReview => "En revue par Comité décisionnel",
            WorkflowStatus::CommitteeCorrections => "Corrections demandées par CODIR",
            WorkflowStatus::Approved => "Approuvé par CODIR (GO)",
            WorkflowStatus::Archived => "Archivée",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowStatus::Approved | WorkflowStatus::Archived)
    }

    pub fn is_correction(self) -> bool {
        matches!(
            self,
            WorkflowStatus::PmoCorrections | WorkflowStatus::CommitteeCorrections
        )
    }

    /// Field edits are only accepted in draft and correction states.
    pub fn is_editable(self) -> bool {
        self == WorkflowStatus::Draft || self.is_correction()
    }

    /// Statuses waiting on a reviewer (N+1, PMO or committee).
    pub fn is_pending_review(self) -> bool {
        matches!(
            self,
            WorkflowStatus::PendingN1 | WorkflowStatus::PmoReview | WorkflowStatus::CommitteeReview
        )
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown workflow status '{s}'"))
    }
}

/// Role expected to perform a workflow action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Initiator,
    #[serde(rename = "n1_validator")]
    N1Validator,
    Pmo,
    Committee,
}

/// One entry of a document's append-only justification log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowComment {
    pub id: String,
    pub author: String,
    pub role: String,
    pub comment: String,
    /// The status this comment produced.
    pub status: WorkflowStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Transition,
    /// Approved FI only: start a new FP in draft. Not a status change.
    CreateProjectCharter,
}

/// An action offered for a document in its current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableAction {
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_status: Option<WorkflowStatus>,
    pub label: &'static str,
    pub role: ActorRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    InvalidTransition {
        from: WorkflowStatus,
        to: WorkflowStatus,
        allowed: Vec<WorkflowStatus>,
    },
    MissingComment,
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::InvalidTransition { from, to, .. } => {
                write!(f, "Invalid transition: {from} -> {to}")
            }
            WorkflowError::MissingComment => write!(f, "Missing transition comment"),
        }
    }
}

impl std::error::Error for WorkflowError {}
