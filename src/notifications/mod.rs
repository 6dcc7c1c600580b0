pub mod generators;
pub mod queries;
pub mod scheduler;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use generators::derive_reminder;
pub use queries::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Teams,
}

/// Configurable reminder rule: fires once a project has gone
/// `days_since_last_update` days without a status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub days_since_last_update: i64,
    pub enabled: bool,
    pub channels: Vec<Channel>,
    pub max_notifications_per_week: u32,
}

pub fn default_rules() -> Vec<NotificationRule> {
    vec![
        NotificationRule {
            id: "standard".to_string(),
            name: "Rappel standard".to_string(),
            description: "Rappel envoyé après 15 jours sans mise à jour".to_string(),
            days_since_last_update: 15,
            enabled: true,
            channels: vec![Channel::Email],
            max_notifications_per_week: 1,
        },
        NotificationRule {
            id: "urgent".to_string(),
            name: "Rappel urgent".to_string(),
            description: "Rappel urgent après 30 jours sans mise à jour".to_string(),
            days_since_last_update: 30,
            enabled: true,
            channels: vec![Channel::Email, Channel::Teams],
            max_notifications_per_week: 2,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    UpdateReminder,
    Overdue,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Delivery state of a reminder, used as a list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryState {
    Pending,
    Sent,
    Acknowledged,
}

/// A reminder derived from a project's `last_updated`. Never stored: only
/// deliveries and acknowledgements are, and they are merged in on read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub project_id: String,
    pub project_title: String,
    pub project_manager: String,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub priority: Priority,
    pub message: String,
    pub email_subject: String,
    pub rule_id: String,
    pub channels: Vec<Channel>,
    pub max_notifications_per_week: u32,
    pub days_since_last_update: i64,
    pub created_at: DateTime<Utc>,
    pub next_notification_date: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub acknowledged: bool,
    /// Deliveries for this project over the trailing seven days.
    pub notification_count: usize,
}

impl Reminder {
    pub fn state(&self) -> DeliveryState {
        if self.acknowledged {
            DeliveryState::Acknowledged
        } else if self.sent_at.is_some() {
            DeliveryState::Sent
        } else {
            DeliveryState::Pending
        }
    }
}

/// One simulated send of a reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub reminder_id: String,
    pub project_id: String,
    pub sent_at: DateTime<Utc>,
    pub channels: Vec<Channel>,
}
