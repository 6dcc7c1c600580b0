//! Shared test infrastructure.
//!
//! - `setup_store()` - reference value lists only, empty portfolio
//! - `setup_store_seeded()` - reference lists plus the demo portfolio
//! - document and project builders that go through the public operations
#![allow(dead_code)]

use actix_web::web;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use portfolio::config::AppConfig;
use portfolio::models::document::{self, Document, DocumentType, NewDocument, Timeline, TransitionRequest};
use portfolio::models::project::{self, NewProject, Project};
use portfolio::models::workflow::WorkflowStatus;
use portfolio::store::{self, AppState, Store};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const INITIATOR: &str = "Pierre Dupont";
pub const N1: &str = "Marie Martin";
pub const PMO: &str = "Jean PMO";
pub const CODIR: &str = "Directeur Général";
pub const SERVICE: &str = "Direction Collectes";

/// Fixed clock used by model-level tests.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// STORE SETUP
// ============================================================================

pub fn setup_store() -> Store {
    let mut store = Store::default();
    store::seed_reference(&mut store).expect("Failed to seed value lists");
    store
}

pub fn setup_store_seeded() -> Store {
    let mut store = setup_store();
    store::seed_portfolio(&mut store).expect("Failed to seed portfolio");
    store
}

pub fn test_state(store: Store) -> web::Data<AppState> {
    web::Data::new(AppState::new(store, AppConfig::default()))
}

// ============================================================================
// BUILDERS
// ============================================================================

pub fn new_fi(title: &str) -> NewDocument {
    NewDocument {
        document_type: DocumentType::Fi,
        title: title.to_string(),
        description: "Nouveau système d'optimisation des tournées".to_string(),
        objectives: "Réduire de 15% les coûts de collecte".to_string(),
        scope: "Région Bruxelles-Capitale".to_string(),
        budget_estimated: Some(250_000.0),
        budget_min: Some(200_000.0),
        budget_max: Some(300_000.0),
        timeline: Timeline {
            start_date: Some(date(2024, 4, 1)),
            end_date: Some(date(2024, 12, 31)),
        },
        initiating_service: SERVICE.to_string(),
        initiator: INITIATOR.to_string(),
        n1_validator: Some(N1.to_string()),
        project_manager: None,
        sponsor: None,
        fi_id: None,
        created_by: INITIATOR.to_string(),
    }
}

pub fn new_fp(title: &str) -> NewDocument {
    NewDocument {
        document_type: DocumentType::Fp,
        project_manager: Some(INITIATOR.to_string()),
        sponsor: Some(N1.to_string()),
        ..new_fi(title)
    }
}

pub fn create_fi(store: &mut Store, title: &str) -> Document {
    document::create(store, new_fi(title), t0()).expect("create FI")
}

pub fn transition_request(target: WorkflowStatus, comment: &str, user: &str, role: &str) -> TransitionRequest {
    TransitionRequest {
        target_status: target,
        comment: comment.to_string(),
        acting_user: user.to_string(),
        acting_role: role.to_string(),
        expected_version: None,
    }
}

/// Apply each status of `path` in turn with a generic comment.
pub fn drive(store: &mut Store, id: &str, path: &[WorkflowStatus]) -> Document {
    let mut doc = document::find_by_id(store, id).cloned().expect("document");
    for target in path {
        let request = transition_request(*target, &format!("Passage en {target}"), PMO, "pmo");
        doc = document::transition(store, id, &request, t0()).expect("transition");
    }
    doc
}

/// The happy path from draft to approved.
pub const TO_APPROVED: [WorkflowStatus; 4] = [
    WorkflowStatus::PendingN1,
    WorkflowStatus::PmoReview,
    WorkflowStatus::CommitteeReview,
    WorkflowStatus::Approved,
];

/// Create an FP, approve it and open its project.
pub fn approved_project(store: &mut Store, title: &str) -> Project {
    let fp = document::create(store, new_fp(title), t0()).expect("create FP");
    drive(store, &fp.id, &TO_APPROVED);
    let input = NewProject {
        document_id: fp.id.clone(),
        initial_start_date: date(2024, 4, 1),
        initial_end_date: date(2024, 12, 31),
        budget_code: "PRJ-TEST-001".to_string(),
        committee: None,
        acting_user: PMO.to_string(),
    };
    project::create_from_charter(store, input, t0()).expect("create project")
}
