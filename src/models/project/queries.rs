use chrono::{DateTime, Duration, Utc};

use super::types::*;
use crate::audit;
use crate::errors::AppError;
use crate::models::document::DocumentType;
use crate::models::workflow::WorkflowStatus;
use crate::store::{Store, new_id};
use crate::validate::{self, FieldError, FieldErrors};

/// Days between two mandatory status reports.
pub const UPDATE_INTERVAL_DAYS: i64 = 30;

impl Budget {
    pub fn remaining(&self) -> f64 {
        self.current_budget - self.spent
    }

    pub fn summary(&self) -> BudgetSummary {
        let variance_pct = if self.initial_estimate == 0.0 {
            0.0
        } else {
            (self.current_budget - self.initial_estimate) / self.initial_estimate * 100.0
        };
        let utilisation_pct = if self.current_budget == 0.0 {
            0.0
        } else {
            self.spent / self.current_budget * 100.0
        };
        BudgetSummary {
            remaining: self.remaining(),
            variance_pct,
            utilisation_pct,
        }
    }
}

impl Planning {
    pub fn summary(&self) -> PlanningSummary {
        let start = self.actual_start_date.unwrap_or(self.initial_start_date);
        PlanningSummary {
            variance_days: (self.current_end_date - self.initial_end_date).num_days(),
            total_duration_days: (self.current_end_date - start).num_days(),
        }
    }
}

/// Overall health of a report: any drifting or at-risk axis is red,
/// any warning is orange, otherwise green.
pub fn overall_health(axes: &[Performance]) -> HealthStatus {
    if axes
        .iter()
        .any(|p| matches!(p.status, PerformanceStatus::EnDerive | PerformanceStatus::ARisque))
    {
        HealthStatus::Red
    } else if axes.iter().any(|p| p.status == PerformanceStatus::MiseEnGarde) {
        HealthStatus::Orange
    } else {
        HealthStatus::Green
    }
}

/// Open a tracked project for an approved FP.
pub fn create_from_charter(
    store: &mut Store,
    input: NewProject,
    now: DateTime<Utc>,
) -> Result<Project, AppError> {
    let doc = store
        .documents
        .get(&input.document_id)
        .ok_or_else(|| {
            AppError::Validation(vec![FieldError::new(
                "documentId",
                format!("Document '{}' does not exist", input.document_id),
            )])
        })?;

    let mut errors = FieldErrors::new();
    if doc.document_type != DocumentType::Fp || doc.status != WorkflowStatus::Approved {
        errors.add(
            "documentId",
            Some("Projects can only be opened from an approved project charter (FP)".to_string()),
        );
    }
    if store.projects.values().any(|p| p.document_id == input.document_id) {
        errors.add("documentId", Some("A project already exists for this charter".to_string()));
    }
    errors.add(
        "initialEndDate",
        validate::validate_dates(Some(input.initial_start_date), Some(input.initial_end_date)),
    );
    errors.add("actingUser", validate::validate_required(&input.acting_user, "Acting user", 200));
    errors.into_result()?;

    let estimate = doc.budget_estimated.unwrap_or(0.0);
    let project = Project {
        id: new_id("prj"),
        document_id: doc.id.clone(),
        fi_id: doc.fi_id.clone(),
        title: doc.title.clone(),
        description: doc.description.clone(),
        status: ProjectStatus::Planning,
        committee: input.committee,
        governance: Governance {
            raci_matrix: Vec::new(),
            sponsor: doc.sponsor.clone().unwrap_or_default(),
            project_manager: doc.project_manager.clone().unwrap_or_default(),
            steering_committee: Vec::new(),
        },
        budget: Budget {
            initial_estimate: estimate,
            current_budget: estimate,
            spent: 0.0,
            external_costs: 0.0,
            internal_costs: 0.0,
            budget_code: input.budget_code.trim().to_string(),
            deliverable_budgets: Vec::new(),
        },
        planning: Planning {
            initial_start_date: input.initial_start_date,
            initial_end_date: input.initial_end_date,
            actual_start_date: None,
            current_end_date: input.initial_end_date,
        },
        risk_management: RiskManagement {
            global_risk_level: Level::Low,
            risks: Vec::new(),
            complexity_factors: Vec::new(),
        },
        monitoring: Monitoring {
            health_status: HealthStatus::Green,
            schedule_status: ScheduleStatus::OnTime,
            completion_percentage: 0,
            last_achievements: String::new(),
            next_major_milestone: String::new(),
            blockers: Vec::new(),
            attention_points: Vec::new(),
        },
        milestones: Vec::new(),
        reports: Vec::new(),
        last_updated: now,
        next_update_due: now + Duration::days(UPDATE_INTERVAL_DAYS),
        created_at: now,
    };

    audit::log(
        store,
        input.acting_user.trim(),
        "project.created",
        "project",
        &project.id,
        serde_json::json!({ "document_id": project.document_id, "summary": format!("Opened project '{}'", project.title) }),
        now,
    );
    store.projects.insert(project.id.clone(), project.clone());
    Ok(project)
}

pub fn find_by_id<'a>(store: &'a Store, id: &str) -> Option<&'a Project> {
    store.projects.get(id)
}

/// Projects matching `filter`, ordered by title.
pub fn find_all<'a>(store: &'a Store, filter: &ProjectFilter) -> Vec<&'a Project> {
    let mut items: Vec<&Project> = store
        .projects
        .values()
        .filter(|p| filter.status.is_none_or(|s| p.status == s))
        .filter(|p| filter.health.is_none_or(|h| p.monitoring.health_status == h))
        .filter(|p| filter.committee.is_none_or(|c| p.committee == Some(c)))
        .collect();
    items.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
    items
}

/// Record a periodic status report. Resets the reminder clock.
pub fn record_update(
    store: &mut Store,
    id: &str,
    update: ProjectUpdate,
    now: DateTime<Utc>,
) -> Result<Project, AppError> {
    let project = store.projects.get_mut(id).ok_or(AppError::NotFound)?;

    let mut errors = FieldErrors::new();
    errors.add("achievements", validate::validate_required(&update.achievements, "Achievements", 5000));
    errors.add("nextPlans", validate::validate_required(&update.next_plans, "Next plans", 5000));
    errors.add(
        "completionPercentage",
        validate::validate_percentage(update.completion_percentage, "Completion percentage"),
    );
    errors.add("periodEnd", validate::validate_dates(update.period_start, update.period_end));
    errors.add("actingUser", validate::validate_required(&update.acting_user, "Acting user", 200));
    errors.into_result()?;

    let health = overall_health(&[update.budget, update.planning, update.scope]);
    let clean = |items: Vec<String>| -> Vec<String> {
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    };

    project.monitoring.health_status = health;
    project.monitoring.completion_percentage = update.completion_percentage;
    project.monitoring.last_achievements = update.achievements.trim().to_string();
    project.monitoring.blockers = clean(update.blockers);
    project.monitoring.attention_points = clean(update.attention_points);
    if let Some(schedule) = update.schedule_status {
        project.monitoring.schedule_status = schedule;
    }
    if let Some(milestone) = update.next_major_milestone {
        project.monitoring.next_major_milestone = milestone.trim().to_string();
    }
    if let Some(status) = update.status {
        if status == ProjectStatus::InProgress && project.planning.actual_start_date.is_none() {
            project.planning.actual_start_date = Some(now.date_naive());
        }
        project.status = status;
    }
    project.reports.push(StatusReport {
        id: new_id("rpt"),
        author: update.acting_user.trim().to_string(),
        period_start: update.period_start,
        period_end: update.period_end,
        budget: update.budget,
        planning: update.planning,
        scope: update.scope,
        achievements: update.achievements.trim().to_string(),
        next_plans: update.next_plans.trim().to_string(),
        completion_percentage: update.completion_percentage,
        health_status: health,
        submitted_at: now,
    });
    project.last_updated = now;
    project.next_update_due = now + Duration::days(UPDATE_INTERVAL_DAYS);

    let updated = project.clone();
    // A fresh report supersedes any acknowledged reminder for this project.
    let prefix = format!("{id}-");
    store.acknowledged.retain(|rid| !rid.starts_with(&prefix));

    audit::log(
        store,
        update.acting_user.trim(),
        "project.updated",
        "project",
        id,
        serde_json::json!({
            "health": health,
            "completion": update.completion_percentage,
            "summary": format!("Status report for '{}'", updated.title),
        }),
        now,
    );
    Ok(updated)
}

/// Book an expense against the project budget.
pub fn record_spend(
    store: &mut Store,
    id: &str,
    request: SpendRequest,
    now: DateTime<Utc>,
) -> Result<Project, AppError> {
    let project = store.projects.get_mut(id).ok_or(AppError::NotFound)?;
    if !(request.amount.is_finite() && request.amount > 0.0) {
        return Err(AppError::Validation(vec![FieldError::new(
            "amount",
            "Amount must be greater than 0",
        )]));
    }

    project.budget.spent += request.amount;
    if request.external {
        project.budget.external_costs += request.amount;
    } else {
        project.budget.internal_costs += request.amount;
    }
    let updated = project.clone();

    audit::log(
        store,
        request.acting_user.trim(),
        "project.spend",
        "project",
        id,
        serde_json::json!({
            "amount": request.amount,
            "remaining": updated.budget.remaining(),
            "summary": format!("Booked {:.2} on '{}'", request.amount, updated.title),
        }),
        now,
    );
    Ok(updated)
}
