use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::store::{Store, new_id};

/// One recorded mutation (document lifecycle, project update, committee decision, ...).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub actor: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

/// Append an audit entry. Also emitted through `log` so it shows up in the server output.
pub fn log(
    store: &mut Store,
    actor: &str,
    action: &str,
    target_type: &str,
    target_id: &str,
    details: Value,
    now: DateTime<Utc>,
) {
    log::info!("audit: {actor} {action} {target_type}/{target_id}");
    store.audit.push(AuditEntry {
        id: new_id("audit"),
        actor: actor.to_string(),
        action: action.to_string(),
        target_type: target_type.to_string(),
        target_id: target_id.to_string(),
        details,
        created_at: now,
    });
}

/// Entries for one target, or everything when no target is given. Newest first.
pub fn find_entries<'a>(
    store: &'a Store,
    target_type: Option<&str>,
    target_id: Option<&str>,
) -> Vec<&'a AuditEntry> {
    store
        .audit
        .iter()
        .rev()
        .filter(|e| target_type.is_none_or(|t| e.target_type == t))
        .filter(|e| target_id.is_none_or(|id| e.target_id == id))
        .collect()
}

/// Drop entries older than the retention window. Returns the number removed.
pub fn cleanup_old_entries(store: &mut Store, retention_days: i64, now: DateTime<Utc>) -> usize {
    if retention_days <= 0 {
        log::warn!("Audit cleanup skipped: retention of {retention_days} days is not positive");
        return 0;
    }
    let Some(cutoff) = Duration::try_days(retention_days).and_then(|d| now.checked_sub_signed(d)) else {
        return 0;
    };
    let before = store.audit.len();
    store.audit.retain(|e| e.created_at >= cutoff);
    let removed = before - store.audit.len();
    if removed > 0 {
        log::info!("Audit cleanup removed {removed} entries older than {retention_days} days");
    }
    removed
}
