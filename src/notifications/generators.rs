use chrono::{DateTime, Duration, Utc};

use super::{NotificationRule, Priority, Reminder, ReminderType};
use crate::models::project::Project;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days elapsed since `last_updated` (floored).
pub fn days_since(last_updated: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_updated).num_seconds().div_euclid(SECONDS_PER_DAY)
}

pub fn classify(days: i64) -> ReminderType {
    if days >= 30 {
        ReminderType::Urgent
    } else if days >= 20 {
        ReminderType::Overdue
    } else {
        ReminderType::UpdateReminder
    }
}

/// The most urgent enabled rule whose threshold has been reached.
pub fn matching_rule(rules: &[NotificationRule], days: i64) -> Option<&NotificationRule> {
    rules
        .iter()
        .filter(|r| r.enabled && days >= r.days_since_last_update)
        .max_by_key(|r| r.days_since_last_update)
}

/// Derive the reminder due for a project, if any. Pure: no state is read or written
/// besides the arguments, so the result can be recomputed at any time.
pub fn derive_reminder(project: &Project, rules: &[NotificationRule], now: DateTime<Utc>) -> Option<Reminder> {
    let days = days_since(project.last_updated, now);
    let rule = matching_rule(rules, days)?;
    let reminder_type = classify(days);

    Some(Reminder {
        id: format!("{}-{}", project.id, days),
        project_id: project.id.clone(),
        project_title: project.title.clone(),
        project_manager: project.governance.project_manager.clone(),
        reminder_type,
        priority: priority_for(reminder_type),
        message: message_for(&project.title, days, reminder_type),
        email_subject: subject_for(&project.title, reminder_type),
        rule_id: rule.id.clone(),
        channels: rule.channels.clone(),
        max_notifications_per_week: rule.max_notifications_per_week,
        days_since_last_update: days,
        created_at: now,
        next_notification_date: now + Duration::days(7),
        sent_at: None,
        acknowledged: false,
        notification_count: 0,
    })
}

fn priority_for(reminder_type: ReminderType) -> Priority {
    match reminder_type {
        ReminderType::Urgent => Priority::High,
        ReminderType::Overdue => Priority::Medium,
        ReminderType::UpdateReminder => Priority::Low,
    }
}

fn message_for(title: &str, days: i64, reminder_type: ReminderType) -> String {
    match reminder_type {
        ReminderType::Urgent => format!(
            "URGENT: Le projet \"{title}\" n'a pas été mis à jour depuis {days} jours. \
             Une actualisation immédiate est requise pour maintenir le suivi du portefeuille."
        ),
        ReminderType::Overdue => format!(
            "Le projet \"{title}\" n'a pas été mis à jour depuis {days} jours. \
             Merci de procéder à l'actualisation de votre projet (performance, avancement, risques, etc.)."
        ),
        ReminderType::UpdateReminder => format!(
            "Rappel automatique: Le projet \"{title}\" nécessite une mise à jour de son statut \
             ({days} jours depuis la dernière actualisation)."
        ),
    }
}

fn subject_for(title: &str, reminder_type: ReminderType) -> String {
    let prefix = match reminder_type {
        ReminderType::Urgent => "[URGENT]",
        ReminderType::Overdue => "[ACTION REQUISE]",
        ReminderType::UpdateReminder => "[RAPPEL]",
    };
    format!("{prefix} Mise à jour requise - Projet: {title}")
}
