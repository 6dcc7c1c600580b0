use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::document::DocumentType;
use crate::models::project::{ProjectStatus, RiskSeverity, RiskStatus};
use crate::models::workflow::WorkflowStatus;
use crate::notifications::{ReminderFilter, list_reminders};
use crate::store::Store;

// ---------- Types ----------

/// Open risk counts across all projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

/// Portfolio-wide figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_documents: usize,
    pub fi_count: usize,
    pub fp_count: usize,
    pub by_status: BTreeMap<WorkflowStatus, usize>,
    pub pending_reviews: usize,
    pub approved: usize,
    pub total_projects: usize,
    pub active_projects: usize,
    pub overdue_updates: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    pub budget_utilisation_pct: f64,
    pub open_risks: RiskCounts,
}

// ---------- Queries ----------

pub fn stats(store: &Store, now: DateTime<Utc>) -> DashboardStats {
    let docs = || store.documents.values();

    let mut by_status: BTreeMap<WorkflowStatus, usize> =
        WorkflowStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for doc in docs() {
        *by_status.entry(doc.status).or_default() += 1;
    }

    let total_budget: f64 = store.projects.values().map(|p| p.budget.current_budget).sum();
    let total_spent: f64 = store.projects.values().map(|p| p.budget.spent).sum();
    let budget_utilisation_pct = if total_budget == 0.0 {
        0.0
    } else {
        total_spent / total_budget * 100.0
    };

    let mut open_risks = RiskCounts::default();
    for risk in store
        .projects
        .values()
        .flat_map(|p| p.risk_management.risks.iter())
        .filter(|r| r.status == RiskStatus::Open)
    {
        match risk.severity {
            RiskSeverity::Low => open_risks.low += 1,
            RiskSeverity::Medium => open_risks.medium += 1,
            RiskSeverity::High => open_risks.high += 1,
            RiskSeverity::Critical => open_risks.critical += 1,
        }
    }

    DashboardStats {
        total_documents: store.documents.len(),
        fi_count: docs().filter(|d| d.document_type == DocumentType::Fi).count(),
        fp_count: docs().filter(|d| d.document_type == DocumentType::Fp).count(),
        pending_reviews: docs().filter(|d| d.status.is_pending_review()).count(),
        approved: docs().filter(|d| d.status == WorkflowStatus::Approved).count(),
        by_status,
        total_projects: store.projects.len(),
        active_projects: store
            .projects
            .values()
            .filter(|p| p.status == ProjectStatus::InProgress)
            .count(),
        overdue_updates: list_reminders(store, &ReminderFilter::default(), now).len(),
        total_budget,
        total_spent,
        budget_utilisation_pct,
        open_risks,
    }
}
