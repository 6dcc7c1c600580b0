mod common;

use chrono::NaiveTime;
use common::*;
use portfolio::errors::AppError;
use portfolio::models::committee::{
    self, AddItemRequest, CommitteeType, CompleteRequest, Decision, DecisionRequest, NewSession, SessionFilter,
    SessionStatus,
};
use portfolio::models::project::{HealthStatus, ProjectStatus};
use portfolio::models::workflow::WorkflowStatus;
use portfolio::store::Store;

fn schedule(store: &mut Store) -> String {
    let input = NewSession {
        committee: CommitteeType::Codir,
        date: date(2024, 4, 15),
        time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        location: "  Salle du Conseil ".to_string(),
        acting_user: PMO.to_string(),
    };
    committee::create(store, input, t0()).unwrap().id
}

fn add(store: &mut Store, session_id: &str, document_id: &str) -> Result<committee::CommitteeSession, AppError> {
    let request = AddItemRequest {
        document_id: document_id.to_string(),
        acting_user: PMO.to_string(),
    };
    committee::add_item(store, session_id, request, t0())
}

fn decide(store: &mut Store, session_id: &str, document_id: &str, decision: Decision) -> Result<committee::CommitteeSession, AppError> {
    let request = DecisionRequest {
        document_id: document_id.to_string(),
        decision,
        recommendation: Some("  Lancement autorisé ".to_string()),
        acting_user: CODIR.to_string(),
    };
    committee::record_decision(store, session_id, request, t0())
}

/// A document sitting in committee review.
fn reviewed_fi(store: &mut Store, title: &str) -> String {
    let doc = create_fi(store, title);
    drive(
        store,
        &doc.id,
        &[WorkflowStatus::PendingN1, WorkflowStatus::PmoReview, WorkflowStatus::CommitteeReview],
    );
    doc.id
}

#[test]
fn test_create_session() {
    let mut store = setup_store();
    let id = schedule(&mut store);

    let session = committee::find_by_id(&store, &id).unwrap();
    assert_eq!(session.status, SessionStatus::Scheduled);
    assert_eq!(session.location, "Salle du Conseil");
    assert!(session.items.is_empty());
}

#[test]
fn test_agenda_only_accepts_committee_review_documents() {
    let mut store = setup_store();
    let session = schedule(&mut store);
    let draft = create_fi(&mut store, "Parc véhicules");

    let err = add(&mut store, &session, &draft.id).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = add(&mut store, &session, "doc-missing").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let ready = reviewed_fi(&mut store, "Optimisation des tournées");
    let updated = add(&mut store, &session, &ready).unwrap();
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].decision, Decision::Pending);
    assert_eq!(updated.items[0].title, "Optimisation des tournées");

    assert!(add(&mut store, &session, &ready).is_err(), "no duplicates on the agenda");
}

#[test]
fn test_decision_leaves_workflow_untouched() {
    let mut store = setup_store();
    let session = schedule(&mut store);
    let doc = reviewed_fi(&mut store, "Optimisation des tournées");
    add(&mut store, &session, &doc).unwrap();

    let updated = decide(&mut store, &session, &doc, Decision::Approved).unwrap();
    assert_eq!(updated.status, SessionStatus::InProgress);
    assert_eq!(updated.items[0].decision, Decision::Approved);
    assert_eq!(updated.items[0].recommendation.as_deref(), Some("Lancement autorisé"));

    let stored = portfolio::models::document::find_by_id(&store, &doc).unwrap();
    assert_eq!(stored.status, WorkflowStatus::CommitteeReview);
}

#[test]
fn test_decision_requires_agenda_item() {
    let mut store = setup_store();
    let session = schedule(&mut store);
    let doc = reviewed_fi(&mut store, "Optimisation des tournées");

    let err = decide(&mut store, &session, &doc, Decision::Rejected).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = decide(&mut store, "cs-missing", &doc, Decision::Rejected).unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[test]
fn test_completed_session_is_closed() {
    let mut store = setup_store();
    let session = schedule(&mut store);
    let doc = reviewed_fi(&mut store, "Optimisation des tournées");
    add(&mut store, &session, &doc).unwrap();

    let request = CompleteRequest {
        notes: Some("Séance ordinaire".to_string()),
        acting_user: PMO.to_string(),
    };
    let closed = committee::complete(&mut store, &session, request, t0()).unwrap();
    assert_eq!(closed.status, SessionStatus::Completed);
    assert_eq!(closed.notes.as_deref(), Some("Séance ordinaire"));

    assert!(decide(&mut store, &session, &doc, Decision::Approved).is_err());
    let other = reviewed_fi(&mut store, "Tri sélectif");
    assert!(add(&mut store, &session, &other).is_err());

    let request = CompleteRequest {
        notes: None,
        acting_user: PMO.to_string(),
    };
    assert!(committee::complete(&mut store, &session, request, t0()).is_err());
}

#[test]
fn test_seeded_summary_and_filters() {
    let store = setup_store_seeded();

    let summary = committee::summary(&store);
    assert_eq!(summary.total_sessions, 2);
    assert_eq!(summary.scheduled, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.pending_items, 1);
    assert_eq!(summary.approved_items, 1);
    assert_eq!(summary.rejected_items, 0);

    let all = committee::find_all(&store, &SessionFilter::default());
    assert_eq!(all[0].id, "cs-codir-2024-03", "most recent first");

    let completed = committee::find_all(
        &store,
        &SessionFilter {
            status: Some(SessionStatus::Completed),
            ..Default::default()
        },
    );
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].items[0].project_id.as_deref(), Some("prj-rh"));

    let comex = committee::find_all(
        &store,
        &SessionFilter {
            committee: Some(CommitteeType::ComexProprete),
            ..Default::default()
        },
    );
    assert!(comex.is_empty());
}

#[test]
fn test_portfolio_groups_projects_by_committee() {
    let mut store = setup_store_seeded();
    let overview = committee::portfolio(&store, None);
    assert_eq!(overview.len(), 5);
    assert_eq!(overview[0].committee, CommitteeType::Codir);

    let codir = &overview[0];
    assert_eq!(codir.project_count, 1);
    assert_eq!((codir.green, codir.orange, codir.red), (0, 1, 0));
    assert_eq!(codir.projects[0].id, "prj-rh");

    let collectes = overview.iter().find(|c| c.committee == CommitteeType::ComexCollectes).unwrap();
    assert_eq!(collectes.projects[0].id, "prj-tournees");
    let filiales = overview.iter().find(|c| c.committee == CommitteeType::ComexFiliales).unwrap();
    assert_eq!(filiales.project_count, 0);
    assert!(filiales.projects.is_empty());

    let p = store.projects.get_mut("prj-rh").unwrap();
    p.monitoring.health_status = HealthStatus::Red;
    p.status = ProjectStatus::OnHold;
    let codir = committee::portfolio(&store, None).remove(0);
    assert_eq!((codir.green, codir.orange, codir.red), (0, 0, 1));

    let in_progress = committee::portfolio(&store, Some(ProjectStatus::InProgress));
    assert_eq!(in_progress[0].project_count, 0);
    assert_eq!(in_progress.iter().map(|c| c.project_count).sum::<usize>(), 1);
}
