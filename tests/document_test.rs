//! Document lifecycle: creation, field validation, editing rules and
//! project charter creation from an approved initiative.

mod common;

use common::*;
use portfolio::errors::AppError;
use portfolio::models::document::{
    self, CharterRequest, DocumentFilter, DocumentPatch, DocumentResponse, DocumentType, Timeline,
};
use portfolio::models::workflow::WorkflowStatus;

fn field_names(err: &AppError) -> Vec<String> {
    match err {
        AppError::Validation(errors) => errors.iter().map(|e| e.field.clone()).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn charter_request() -> CharterRequest {
    CharterRequest {
        acting_user: INITIATOR.to_string(),
        project_manager: Some(INITIATOR.to_string()),
        sponsor: Some(N1.to_string()),
    }
}

#[test]
fn test_create_starts_in_draft() {
    let mut store = setup_store();
    let doc = create_fi(&mut store, "  Optimisation des tournées  ");

    assert_eq!(doc.status, WorkflowStatus::Draft);
    assert_eq!(doc.title, "Optimisation des tournées");
    assert!(doc.workflow_comments.is_empty());
    assert_eq!(doc.created_at, t0());
    assert_eq!(doc.updated_at, t0());
    assert_eq!(doc.version, 1);
    assert!(document::find_by_id(&store, &doc.id).is_some());
}

#[test]
fn test_create_reports_every_invalid_field() {
    let mut store = setup_store();
    let mut input = new_fi("");
    input.description = "   ".to_string();
    input.budget_min = Some(500.0);
    input.budget_max = Some(100.0);
    input.budget_estimated = Some(-1.0);
    input.timeline = Timeline {
        start_date: Some(date(2024, 6, 1)),
        end_date: Some(date(2024, 6, 1)),
    };

    let err = document::create(&mut store, input, t0()).unwrap_err();
    let fields = field_names(&err);
    for expected in ["title", "description", "budgetEstimated", "budgetMin", "timeline"] {
        assert!(fields.contains(&expected.to_string()), "missing error for {expected}: {fields:?}");
    }
    assert!(store.documents.is_empty());
}

#[test]
fn test_fp_requires_manager_and_sponsor() {
    let mut store = setup_store();
    let mut input = new_fp("Digitalisation RH");
    input.project_manager = None;
    input.sponsor = Some(" ".to_string());

    let err = document::create(&mut store, input, t0()).unwrap_err();
    let fields = field_names(&err);
    assert!(fields.contains(&"projectManager".to_string()));
    assert!(fields.contains(&"sponsor".to_string()));
}

#[test]
fn test_initiating_service_must_be_known() {
    let mut store = setup_store();
    let mut input = new_fi("Parc véhicules");
    input.initiating_service = "Direction Inconnue".to_string();

    let err = document::create(&mut store, input, t0()).unwrap_err();
    assert_eq!(field_names(&err), vec!["initiatingService".to_string()]);
}

#[test]
fn test_edit_allowed_in_draft_and_corrections() {
    let mut store = setup_store();
    let doc = create_fi(&mut store, "Géolocalisation");

    let patch = DocumentPatch {
        scope: Some("Flotte complète (120 véhicules)".to_string()),
        expected_version: Some(1),
        ..Default::default()
    };
    let edited = document::update_fields(&mut store, &doc.id, patch, INITIATOR, t0()).unwrap();
    assert_eq!(edited.scope, "Flotte complète (120 véhicules)");
    assert_eq!(edited.version, 2);
    assert_eq!(edited.title, "Géolocalisation");

    drive(&mut store, &doc.id, &[WorkflowStatus::PendingN1, WorkflowStatus::PmoReview, WorkflowStatus::PmoCorrections]);
    let patch = DocumentPatch {
        objectives: Some("Inclure l'analyse RGPD".to_string()),
        ..Default::default()
    };
    let edited = document::update_fields(&mut store, &doc.id, patch, INITIATOR, t0()).unwrap();
    assert_eq!(edited.objectives, "Inclure l'analyse RGPD");
}

#[test]
fn test_edit_rejected_outside_editable_states() {
    let mut store = setup_store();
    let doc = create_fi(&mut store, "Tri sélectif");
    drive(&mut store, &doc.id, &[WorkflowStatus::PendingN1]);

    let patch = DocumentPatch {
        title: Some("Nouveau titre".to_string()),
        ..Default::default()
    };
    let err = document::update_fields(&mut store, &doc.id, patch, INITIATOR, t0()).unwrap_err();
    assert!(matches!(err, AppError::NotEditable(WorkflowStatus::PendingN1)));
    assert_eq!(document::find_by_id(&store, &doc.id).unwrap().title, "Tri sélectif");
}

#[test]
fn test_edit_invalid_merge_leaves_document_unchanged() {
    let mut store = setup_store();
    let doc = create_fi(&mut store, "Propreté urbaine");

    let patch = DocumentPatch {
        budget_min: Some(900_000.0),
        ..Default::default()
    };
    let err = document::update_fields(&mut store, &doc.id, patch, INITIATOR, t0()).unwrap_err();
    assert_eq!(field_names(&err), vec!["budgetMin".to_string()]);
    assert_eq!(document::find_by_id(&store, &doc.id).unwrap(), &doc);
}

#[test]
fn test_edit_version_mismatch() {
    let mut store = setup_store();
    let doc = create_fi(&mut store, "Propreté urbaine");
    let patch = DocumentPatch {
        title: Some("Autre".to_string()),
        expected_version: Some(3),
        ..Default::default()
    };
    let err = document::update_fields(&mut store, &doc.id, patch, INITIATOR, t0()).unwrap_err();
    assert!(matches!(err, AppError::Conflict { expected: 3, actual: 1 }));
}

#[test]
fn test_charter_from_approved_fi() {
    let mut store = setup_store();
    let fi = create_fi(&mut store, "Optimisation des tournées");
    drive(&mut store, &fi.id, &TO_APPROVED);

    let fp = document::create_project_charter(&mut store, &fi.id, &charter_request(), t0()).unwrap();
    assert_eq!(fp.document_type, DocumentType::Fp);
    assert_eq!(fp.status, WorkflowStatus::Draft);
    assert_eq!(fp.fi_id.as_deref(), Some(fi.id.as_str()));
    assert_eq!(fp.title, fi.title);
    assert_eq!(fp.budget_estimated, fi.budget_estimated);
    assert_eq!(fp.timeline, fi.timeline);
    assert!(fp.workflow_comments.is_empty());

    // The FI itself stays approved.
    let fi_after = document::find_by_id(&store, &fi.id).unwrap();
    assert_eq!(fi_after.status, WorkflowStatus::Approved);
}

#[test]
fn test_charter_only_once_per_fi() {
    let mut store = setup_store();
    let fi = create_fi(&mut store, "Optimisation des tournées");
    drive(&mut store, &fi.id, &TO_APPROVED);

    document::create_project_charter(&mut store, &fi.id, &charter_request(), t0()).unwrap();
    let err = document::create_project_charter(&mut store, &fi.id, &charter_request(), t0()).unwrap_err();
    assert_eq!(field_names(&err), vec!["fiId".to_string()]);
}

#[test]
fn test_charter_rejected_for_unapproved_fi() {
    let mut store = setup_store();
    let fi = create_fi(&mut store, "Optimisation des tournées");
    drive(&mut store, &fi.id, &[WorkflowStatus::PendingN1, WorkflowStatus::PmoReview]);

    let err = document::create_project_charter(&mut store, &fi.id, &charter_request(), t0()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.documents.len(), 1);
}

#[test]
fn test_fp_origin_must_be_an_approved_fi_without_charter() {
    let mut store = setup_store();
    let draft_fi = create_fi(&mut store, "Parc véhicules");
    let approved_fi = create_fi(&mut store, "Optimisation des tournées");
    drive(&mut store, &approved_fi.id, &TO_APPROVED);

    let mut input = new_fp("Parc véhicules");
    input.fi_id = Some(draft_fi.id.clone());
    let err = document::create(&mut store, input, t0()).unwrap_err();
    assert_eq!(field_names(&err), vec!["fiId".to_string()]);

    let mut input = new_fp("Tournées");
    input.fi_id = Some("doc-missing".to_string());
    assert!(document::create(&mut store, input, t0()).is_err());

    let mut input = new_fp("Tournées");
    input.fi_id = Some(approved_fi.id.clone());
    let fp = document::create(&mut store, input, t0()).unwrap();

    // Neither a second FP nor an FP pointing at an FP.
    let mut input = new_fp("Tournées bis");
    input.fi_id = Some(approved_fi.id.clone());
    assert_eq!(field_names(&document::create(&mut store, input, t0()).unwrap_err()), vec!["fiId".to_string()]);
    let mut input = new_fp("Tournées ter");
    input.fi_id = Some(fp.id.clone());
    assert!(document::create(&mut store, input, t0()).is_err());

    let err = document::create_project_charter(&mut store, &approved_fi.id, &charter_request(), t0()).unwrap_err();
    assert_eq!(field_names(&err), vec!["fiId".to_string()]);
    assert_eq!(store.documents.len(), 3);
}

#[test]
fn test_fi_cannot_reference_an_origin() {
    let mut store = setup_store();
    let approved_fi = create_fi(&mut store, "Optimisation des tournées");
    drive(&mut store, &approved_fi.id, &TO_APPROVED);

    let mut input = new_fi("Géolocalisation");
    input.fi_id = Some(approved_fi.id.clone());
    let err = document::create(&mut store, input, t0()).unwrap_err();
    assert_eq!(field_names(&err), vec!["fiId".to_string()]);
}

#[test]
fn test_find_all_filters_and_orders() {
    let store = setup_store_seeded();

    let all = document::find_all(&store, &DocumentFilter::default());
    assert_eq!(all.len(), store.documents.len());
    assert!(all.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));

    let approved = document::find_all(
        &store,
        &DocumentFilter {
            status: Some(WorkflowStatus::Approved),
            ..Default::default()
        },
    );
    assert!(!approved.is_empty());
    assert!(approved.iter().all(|d| d.status == WorkflowStatus::Approved));

    let fps = document::find_all(
        &store,
        &DocumentFilter {
            document_type: Some(DocumentType::Fp),
            ..Default::default()
        },
    );
    assert!(fps.iter().all(|d| d.document_type == DocumentType::Fp));

    let search = document::find_all(
        &store,
        &DocumentFilter {
            search: Some("MARC ROUSSEAU".to_string()),
            ..Default::default()
        },
    );
    assert!(!search.is_empty());
    assert!(search.iter().all(|d| d.initiator == "Marc Rousseau"));
}

#[test]
fn test_response_carries_derived_fields() {
    let store = setup_store_seeded();
    let doc = document::find_by_id(&store, "doc-fi-geoloc").expect("seeded document");
    let response = DocumentResponse::from(doc);

    assert_eq!(response.correction_requests.len(), 1);
    assert_eq!(response.available_actions.len(), 1);
    assert_eq!(response.available_actions[0].target_status, Some(WorkflowStatus::PmoReview));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "pmo_corrections");
    assert_eq!(json["documentType"], "FI");
    assert!(json["correctionRequests"].is_array());
}
