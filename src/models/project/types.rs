use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::committee::CommitteeType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Green,
    Orange,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Ahead,
    OnTime,
    Delayed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Technical,
    Organizational,
    Financial,
    Regulatory,
    Operational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Open,
    Mitigated,
    Closed,
}

/// RACI tag: Responsible, Accountable, Consulted, Informed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Raci {
    R,
    A,
    C,
    I,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceRole {
    Sponsor,
    ProjectManager,
    ActivityManager,
    SteeringMember,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
}

/// Self-assessed performance of one axis in a status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    Conforme,
    MiseEnGarde,
    ARisque,
    EnDerive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evolution {
    Ameliore,
    Stable,
    Degrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaciRole {
    pub id: String,
    pub name: String,
    pub function: String,
    pub responsibility: Raci,
    pub role: GovernanceRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Governance {
    #[serde(default)]
    pub raci_matrix: Vec<RaciRole>,
    pub sponsor: String,
    pub project_manager: String,
    #[serde(default)]
    pub steering_committee: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverableBudget {
    pub id: String,
    pub deliverable_name: String,
    pub milestone_id: Option<String>,
    pub allocated_budget: f64,
    pub spent_budget: f64,
}

/// Budget as stored. `remaining` and variance are computed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub initial_estimate: f64,
    pub current_budget: f64,
    pub spent: f64,
    #[serde(default)]
    pub external_costs: f64,
    #[serde(default)]
    pub internal_costs: f64,
    #[serde(default)]
    pub budget_code: String,
    #[serde(default)]
    pub deliverable_budgets: Vec<DeliverableBudget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planning {
    pub initial_start_date: NaiveDate,
    pub initial_end_date: NaiveDate,
    pub actual_start_date: Option<NaiveDate>,
    pub current_end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub id: String,
    pub description: String,
    pub category: RiskCategory,
    pub probability: Level,
    pub impact: Level,
    pub severity: RiskSeverity,
    #[serde(default)]
    pub mitigation: String,
    #[serde(default)]
    pub owner: String,
    pub status: RiskStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskManagement {
    pub global_risk_level: Level,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub complexity_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitoring {
    pub health_status: HealthStatus,
    pub schedule_status: ScheduleStatus,
    pub completion_percentage: i64,
    #[serde(default)]
    pub last_achievements: String,
    #[serde(default)]
    pub next_major_milestone: String,
    #[serde(default)]
    pub blockers: Vec<String>,
    #[serde(default)]
    pub attention_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub planned_date: NaiveDate,
    pub actual_date: Option<NaiveDate>,
    pub status: MilestoneStatus,
    pub budget_allocated: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub status: PerformanceStatus,
    pub evolution: Evolution,
}

/// A status report as submitted by the project manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub id: String,
    pub author: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub budget: Performance,
    pub planning: Performance,
    pub scope: Performance,
    pub achievements: String,
    pub next_plans: String,
    pub completion_percentage: i64,
    pub health_status: HealthStatus,
    pub submitted_at: DateTime<Utc>,
}

/// A tracked project, created from an approved FP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    /// The approved FP this project executes.
    pub document_id: String,
    pub fi_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    pub committee: Option<CommitteeType>,
    pub governance: Governance,
    pub budget: Budget,
    pub planning: Planning,
    pub risk_management: RiskManagement,
    pub monitoring: Monitoring,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub reports: Vec<StatusReport>,
    pub last_updated: DateTime<Utc>,
    pub next_update_due: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub document_id: String,
    pub initial_start_date: NaiveDate,
    pub initial_end_date: NaiveDate,
    #[serde(default)]
    pub budget_code: String,
    pub committee: Option<CommitteeType>,
    pub acting_user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub acting_user: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub budget: Performance,
    pub planning: Performance,
    pub scope: Performance,
    #[serde(default)]
    pub achievements: String,
    #[serde(default)]
    pub next_plans: String,
    #[serde(default)]
    pub blockers: Vec<String>,
    #[serde(default)]
    pub attention_points: Vec<String>,
    pub completion_percentage: i64,
    pub schedule_status: Option<ScheduleStatus>,
    pub next_major_milestone: Option<String>,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendRequest {
    pub amount: f64,
    pub acting_user: String,
    /// Counts toward external costs when true, internal otherwise.
    #[serde(default)]
    pub external: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub health: Option<HealthStatus>,
    pub committee: Option<CommitteeType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub remaining: f64,
    pub variance_pct: f64,
    pub utilisation_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningSummary {
    pub variance_days: i64,
    pub total_duration_days: i64,
}

/// API representation with derived budget and planning figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,
    pub budget_summary: BudgetSummary,
    pub planning_summary: PlanningSummary,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            budget_summary: project.budget.summary(),
            planning_summary: project.planning.summary(),
            project: project.clone(),
        }
    }
}
