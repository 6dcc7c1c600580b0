use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::project::{HealthStatus, ProjectStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitteeType {
    Codir,
    ComexProprete,
    ComexFiliales,
    ComexCommercial,
    ComexCollectes,
}

impl CommitteeType {
    pub const ALL: [CommitteeType; 5] = [
        CommitteeType::Codir,
        CommitteeType::ComexProprete,
        CommitteeType::ComexFiliales,
        CommitteeType::ComexCommercial,
        CommitteeType::ComexCollectes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommitteeType::Codir => "Comité de Direction (CODIR)",
            CommitteeType::ComexProprete => "Comité Exécutif Propreté",
            CommitteeType::ComexFiliales => "Comité Exécutif Filiales",
            CommitteeType::ComexCommercial => "Comité Exécutif Commercial",
            CommitteeType::ComexCollectes => "Comité Exécutif Collectes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Decisions and agenda changes are only accepted before the session closes.
    pub fn is_open(self) -> bool {
        matches!(self, SessionStatus::Scheduled | SessionStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Pending,
    Approved,
    Rejected,
}

/// A document on a session's agenda and the committee's decision on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionItem {
    pub document_id: String,
    pub title: String,
    pub decision: Decision,
    pub recommendation: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeSession {
    pub id: String,
    pub committee: CommitteeType,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub location: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub items: Vec<SessionItem>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub committee: CommitteeType,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub location: String,
    pub acting_user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub document_id: String,
    pub acting_user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub document_id: String,
    pub decision: Decision,
    pub recommendation: Option<String>,
    pub acting_user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest {
    pub notes: Option<String>,
    pub acting_user: String,
}

#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub committee: Option<CommitteeType>,
    pub status: Option<SessionStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeSummary {
    pub total_sessions: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub pending_items: usize,
    pub approved_items: usize,
    pub rejected_items: usize,
}

/// A project as shown on its committee's card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBrief {
    pub id: String,
    pub title: String,
    pub project_manager: String,
    pub status: ProjectStatus,
    pub health_status: HealthStatus,
    pub completion_percentage: i64,
}

/// Health breakdown of the projects steered by one committee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteePortfolio {
    pub committee: CommitteeType,
    pub label: &'static str,
    pub project_count: usize,
    pub green: usize,
    pub orange: usize,
    pub red: usize,
    pub projects: Vec<ProjectBrief>,
}
