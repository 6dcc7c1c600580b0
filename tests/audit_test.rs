mod common;

use chrono::Duration;
use common::*;
use portfolio::audit;
use portfolio::config::AppConfig;
use portfolio::models::workflow::WorkflowStatus;
use portfolio::notifications::scheduler;
use portfolio::store::{self, AppState};

#[test]
fn test_mutations_are_audited_newest_first() {
    let mut store = setup_store();
    let doc = create_fi(&mut store, "Optimisation des tournées");
    drive(&mut store, &doc.id, &[WorkflowStatus::PendingN1, WorkflowStatus::PmoReview]);

    let entries = audit::find_entries(&store, Some("document"), Some(&doc.id));
    let actions: Vec<&str> = entries.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["document.pmo_review", "document.pending_n1", "document.created"]);
    assert!(audit::find_entries(&store, Some("project"), None).is_empty());
}

#[test]
fn test_cleanup_drops_entries_past_retention() {
    let mut store = setup_store();
    audit::log(&mut store, PMO, "test.old", "test", "a", serde_json::json!({}), t0() - Duration::days(400));
    audit::log(&mut store, PMO, "test.recent", "test", "b", serde_json::json!({}), t0() - Duration::days(10));

    let removed = audit::cleanup_old_entries(&mut store, 365, t0());
    assert_eq!(removed, 1);
    assert_eq!(store.audit.len(), 1);
    assert_eq!(store.audit[0].action, "test.recent");

    assert_eq!(audit::cleanup_old_entries(&mut store, 365, t0()), 0);
}

#[test]
fn test_cleanup_ignores_unusable_retention() {
    let mut store = setup_store();
    audit::log(&mut store, PMO, "test.recent", "test", "b", serde_json::json!({}), t0() - Duration::days(10));

    assert_eq!(audit::cleanup_old_entries(&mut store, -1, t0()), 0);
    assert_eq!(audit::cleanup_old_entries(&mut store, 0, t0()), 0);
    assert_eq!(audit::cleanup_old_entries(&mut store, i64::MAX, t0()), 0);
    assert_eq!(store.audit.len(), 1);
}

#[test]
fn test_init_state_respects_seed_flag() {
    let seeded = store::init_state(&AppConfig::default()).unwrap();
    assert_eq!(seeded.read().documents.len(), 8);
    assert_eq!(seeded.read().value_lists.len(), 5);

    let config = AppConfig {
        seed_demo_data: false,
        ..AppConfig::default()
    };
    let empty = store::init_state(&config).unwrap();
    assert!(empty.read().documents.is_empty());
    assert_eq!(empty.read().value_lists.len(), 5);
}

#[test]
fn test_seeding_twice_keeps_existing_records() {
    let mut store = setup_store_seeded();
    store.documents.get_mut("doc-fi-vehicules").unwrap().title = "Titre modifié".to_string();

    store::seed_portfolio(&mut store).unwrap();
    assert_eq!(store.documents.len(), 8);
    assert_eq!(store.documents["doc-fi-vehicules"].title, "Titre modifié");
}

#[test]
fn test_scheduler_scan_counts_due_reminders() {
    // Seeded projects were last updated in 2024, so both are overdue today.
    let state = AppState::new(setup_store_seeded(), AppConfig::default());
    assert_eq!(scheduler::scan(&state), 2);

    let empty = AppState::new(setup_store(), AppConfig::default());
    assert_eq!(scheduler::scan(&empty), 0);
}
