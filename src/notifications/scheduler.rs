use std::time::Duration;

use actix_web::web;
use chrono::Utc;

use super::queries::{ReminderFilter, list_reminders};
use super::{DeliveryState, ReminderType};
use crate::store::AppState;

pub fn spawn_scheduler(state: web::Data<AppState>, interval_secs: u64) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            interval.tick().await;
            log::info!("Running notification scheduler");
            scan(&state);
        }
    });
}

/// One pass: derive reminders for every tracked project and log what is due.
/// Read-only; nothing is sent automatically.
pub fn scan(state: &AppState) -> usize {
    let store = state.read();
    let reminders = list_reminders(&store, &ReminderFilter::default(), Utc::now());
    let pending = reminders.iter().filter(|r| r.state() == DeliveryState::Pending).count();
    let urgent = reminders
        .iter()
        .filter(|r| r.reminder_type == ReminderType::Urgent)
        .count();
    for r in reminders.iter().filter(|r| r.state() == DeliveryState::Pending) {
        log::debug!("Reminder due: {} ({} days)", r.id, r.days_since_last_update);
    }
    log::info!(
        "Notification scan: {} reminder(s) due, {pending} pending, {urgent} urgent",
        reminders.len()
    );
    reminders.len()
}
