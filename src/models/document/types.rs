use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::workflow::{AvailableAction, WorkflowComment, WorkflowStatus};

/// FI = Formulaire d'Initiative, FP = Fiche Projet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "FI")]
    Fi,
    #[serde(rename = "FP")]
    Fp,
}

impl DocumentType {
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Fi => "Formulaire d'Initiative",
            DocumentType::Fp => "Fiche Projet",
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FI" | "fi" => Ok(DocumentType::Fi),
            "FP" | "fp" => Ok(DocumentType::Fp),
            _ => Err(format!("Unknown document type '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// An initiative (FI) or project charter (FP) moving through the approval workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub document_type: DocumentType,
    pub title: String,
    pub description: String,
    pub objectives: String,
    #[serde(default)]
    pub scope: String,
    pub budget_estimated: Option<f64>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub timeline: Timeline,
    pub initiating_service: String,
    pub initiator: String,
    pub n1_validator: Option<String>,
    pub project_manager: Option<String>,
    pub sponsor: Option<String>,
    pub created_by: String,
    /// FP only: the FI this charter was created from.
    pub fi_id: Option<String>,
    pub status: WorkflowStatus,
    #[serde(default)]
    pub workflow_comments: Vec<WorkflowComment>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "initial_version")]
    pub version: u64,
}

fn initial_version() -> u64 {
    1
}

impl Document {
    /// Record a mutation: bumps `updated_at` and the optimistic version.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.version += 1;
    }

    /// Correction requests are not stored; they are the comments that moved
    /// the document into a `*_corrections` status, oldest first.
    pub fn correction_requests(&self) -> Vec<String> {
        self.workflow_comments
            .iter()
            .filter(|c| c.status.is_correction())
            .map(|c| c.comment.clone())
            .collect()
    }
}

/// Input for creating a document. Status is always `draft`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub document_type: DocumentType,
    pub title: String,
    pub description: String,
    pub objectives: String,
    #[serde(default)]
    pub scope: String,
    pub budget_estimated: Option<f64>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub timeline: Timeline,
    pub initiating_service: String,
    pub initiator: String,
    pub n1_validator: Option<String>,
    pub project_manager: Option<String>,
    pub sponsor: Option<String>,
    pub fi_id: Option<String>,
    pub created_by: String,
}

/// Partial edit. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub scope: Option<String>,
    pub budget_estimated: Option<f64>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub timeline: Option<Timeline>,
    pub initiating_service: Option<String>,
    pub n1_validator: Option<String>,
    pub project_manager: Option<String>,
    pub sponsor: Option<String>,
    pub expected_version: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    pub target_status: WorkflowStatus,
    #[serde(default)]
    pub comment: String,
    pub acting_user: String,
    pub acting_role: String,
    pub expected_version: Option<u64>,
}

/// Input for starting the FP of an approved FI. Roles may be filled in later.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharterRequest {
    pub acting_user: String,
    pub project_manager: Option<String>,
    pub sponsor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub status: Option<WorkflowStatus>,
    pub document_type: Option<DocumentType>,
    pub search: Option<String>,
}

/// API representation: the stored document plus read-time derived fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub document: Document,
    pub status_label: &'static str,
    pub correction_requests: Vec<String>,
    pub available_actions: Vec<AvailableAction>,
}

impl From<&Document> for DocumentResponse {
    fn from(doc: &Document) -> Self {
        Self {
            status_label: doc.status.label(),
            correction_requests: doc.correction_requests(),
            available_actions: crate::models::workflow::available_actions(
                doc.document_type,
                doc.status,
            ),
            document: doc.clone(),
        }
    }
}
