use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::generators::derive_reminder;
use super::{Delivery, DeliveryState, NotificationRule, Reminder};
use crate::audit;
use crate::errors::AppError;
use crate::models::project::{Project, ProjectStatus};
use crate::store::Store;
use crate::validate::{FieldError, FieldErrors};

#[derive(Debug, Clone, Default)]
pub struct ReminderFilter {
    pub state: Option<DeliveryState>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub acting_user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeRequest {
    pub acting_user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesUpdate {
    pub rules: Vec<NotificationRule>,
    pub acting_user: String,
}

/// Closed projects no longer owe status reports.
pub fn is_tracked(project: &Project) -> bool {
    !matches!(project.status, ProjectStatus::Completed | ProjectStatus::Cancelled)
}

/// Start of the trailing week the delivery cap counts over.
fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(7)
}

fn recent_deliveries<'a>(
    store: &'a Store,
    project_id: &'a str,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a Delivery> + 'a {
    let window_start = window_start(now);
    store
        .deliveries
        .iter()
        .filter(move |d| d.project_id == project_id && d.sent_at > window_start)
}

/// Derive the project's reminder and merge stored delivery state onto it.
fn with_state(store: &Store, project: &Project, now: DateTime<Utc>) -> Option<Reminder> {
    let mut reminder = derive_reminder(project, &store.notification_rules, now)?;
    reminder.sent_at = store
        .deliveries
        .iter()
        .filter(|d| d.reminder_id == reminder.id)
        .map(|d| d.sent_at)
        .max();
    reminder.acknowledged = store.acknowledged.contains(&reminder.id);
    reminder.notification_count = recent_deliveries(store, &project.id, now).count();
    Some(reminder)
}

/// The reminder currently due for one project, if any.
pub fn reminder_for_project(store: &Store, project_id: &str, now: DateTime<Utc>) -> Result<Option<Reminder>, AppError> {
    let project = store.projects.get(project_id).ok_or(AppError::NotFound)?;
    if !is_tracked(project) {
        return Ok(None);
    }
    Ok(with_state(store, project, now))
}

/// Every reminder due across tracked projects, most overdue first.
pub fn list_reminders(store: &Store, filter: &ReminderFilter, now: DateTime<Utc>) -> Vec<Reminder> {
    let mut reminders: Vec<Reminder> = store
        .projects
        .values()
        .filter(|p| is_tracked(p))
        .filter(|p| filter.project_id.as_deref().is_none_or(|id| p.id == id))
        .filter_map(|p| with_state(store, p, now))
        .filter(|r| filter.state.is_none_or(|s| r.state() == s))
        .collect();
    reminders.sort_by(|a, b| {
        b.days_since_last_update
            .cmp(&a.days_since_last_update)
            .then_with(|| a.project_title.cmp(&b.project_title))
    });
    reminders
}

/// Simulate delivery of the project's current reminder over the rule's channels.
pub fn send(store: &mut Store, project_id: &str, actor: &str, now: DateTime<Utc>) -> Result<Reminder, AppError> {
    let mut reminder = reminder_for_project(store, project_id, now)?.ok_or_else(|| {
        AppError::Validation(vec![FieldError::new(
            "projectId",
            "No reminder is due for this project",
        )])
    })?;

    let cap = reminder.max_notifications_per_week as usize;
    if reminder.notification_count >= cap {
        log::warn!(
            "Reminder {} not sent: weekly cap of {cap} reached for project {project_id}",
            reminder.id
        );
        return Err(AppError::RateLimited(format!(
            "At most {cap} notification(s) per week for this project"
        )));
    }

    let cutoff = window_start(now);
    store.deliveries.retain(|d| d.sent_at > cutoff);
    store.deliveries.push(Delivery {
        reminder_id: reminder.id.clone(),
        project_id: project_id.to_string(),
        sent_at: now,
        channels: reminder.channels.clone(),
    });
    reminder.sent_at = Some(now);
    reminder.notification_count += 1;

    log::info!(
        "Simulated delivery of '{}' to {} via {:?}",
        reminder.email_subject,
        reminder.project_manager,
        reminder.channels
    );
    audit::log(
        store,
        actor.trim(),
        "notification.sent",
        "project",
        project_id,
        serde_json::json!({
            "reminder_id": reminder.id,
            "channels": reminder.channels,
            "summary": format!("Sent reminder '{}'", reminder.email_subject),
        }),
        now,
    );
    Ok(reminder)
}

/// Mark the project's current reminder as acknowledged. Only the reminder
/// currently due can be acknowledged; older ids are unknown.
pub fn acknowledge(
    store: &mut Store,
    project_id: &str,
    reminder_id: &str,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<Reminder, AppError> {
    let mut reminder = reminder_for_project(store, project_id, now)?
        .filter(|r| r.id == reminder_id)
        .ok_or(AppError::NotFound)?;

    store.acknowledged.insert(reminder.id.clone());
    reminder.acknowledged = true;

    audit::log(
        store,
        actor.trim(),
        "notification.acknowledged",
        "project",
        project_id,
        serde_json::json!({ "reminder_id": reminder.id }),
        now,
    );
    Ok(reminder)
}

/// Replace the rule set after validating every rule.
pub fn update_rules(store: &mut Store, update: RulesUpdate, now: DateTime<Utc>) -> Result<Vec<NotificationRule>, AppError> {
    let mut errors = FieldErrors::new();
    let mut seen = HashSet::new();
    for (i, rule) in update.rules.iter().enumerate() {
        if rule.id.trim().is_empty() {
            errors.add(&format!("rules[{i}].id"), Some("Rule id is required".to_string()));
        } else if !seen.insert(rule.id.trim()) {
            errors.add(&format!("rules[{i}].id"), Some(format!("Duplicate rule id '{}'", rule.id)));
        }
        if rule.name.trim().is_empty() {
            errors.add(&format!("rules[{i}].name"), Some("Rule name is required".to_string()));
        }
        if rule.days_since_last_update < 1 {
            errors.add(
                &format!("rules[{i}].daysSinceLastUpdate"),
                Some("Threshold must be at least 1 day".to_string()),
            );
        }
        if rule.max_notifications_per_week < 1 {
            errors.add(
                &format!("rules[{i}].maxNotificationsPerWeek"),
                Some("At least one notification per week is required".to_string()),
            );
        }
        if rule.channels.is_empty() {
            errors.add(&format!("rules[{i}].channels"), Some("At least one channel is required".to_string()));
        }
    }
    errors.into_result()?;

    store.notification_rules = update
        .rules
        .into_iter()
        .map(|r| NotificationRule {
            id: r.id.trim().to_string(),
            name: r.name.trim().to_string(),
            ..r
        })
        .collect();
    let rules = store.notification_rules.clone();
    audit::log(
        store,
        update.acting_user.trim(),
        "notification.rules_updated",
        "notification_rule",
        "all",
        serde_json::json!({ "count": rules.len() }),
        now,
    );
    Ok(rules)
}
