//! Project tracking: opening from an approved FP, status reports, spend and
//! derived budget/planning figures.

mod common;

use chrono::Duration;
use common::*;
use portfolio::errors::AppError;
use portfolio::models::project::{
    self, Evolution, HealthStatus, NewProject, Performance, PerformanceStatus, ProjectFilter, ProjectResponse,
    ProjectStatus, ProjectUpdate, SpendRequest, overall_health,
};
use portfolio::models::committee::CommitteeType;
use portfolio::models::workflow::WorkflowStatus;

fn perf(status: PerformanceStatus) -> Performance {
    Performance {
        status,
        evolution: Evolution::Stable,
    }
}

fn report(budget: PerformanceStatus, planning: PerformanceStatus, scope: PerformanceStatus) -> ProjectUpdate {
    ProjectUpdate {
        acting_user: INITIATOR.to_string(),
        period_start: Some(date(2024, 3, 1)),
        period_end: Some(date(2024, 3, 31)),
        budget: perf(budget),
        planning: perf(planning),
        scope: perf(scope),
        achievements: "Analyse des besoins terminée".to_string(),
        next_plans: "Sélection du fournisseur".to_string(),
        blockers: vec!["  ".to_string(), "Validation sécurité IT en attente".to_string()],
        attention_points: Vec::new(),
        completion_percentage: 25,
        schedule_status: None,
        next_major_milestone: Some("Signature du contrat".to_string()),
        status: Some(ProjectStatus::InProgress),
    }
}

#[test]
fn test_open_project_from_approved_fp() {
    let mut store = setup_store();
    let project = approved_project(&mut store, "Optimisation des tournées");

    assert_eq!(project.status, ProjectStatus::Planning);
    assert_eq!(project.governance.project_manager, INITIATOR);
    assert_eq!(project.governance.sponsor, N1);
    assert_eq!(project.budget.initial_estimate, 250_000.0);
    assert_eq!(project.budget.current_budget, 250_000.0);
    assert_eq!(project.last_updated, t0());
    assert_eq!(project.next_update_due, t0() + Duration::days(30));
}

#[test]
fn test_project_requires_approved_fp() {
    let mut store = setup_store();
    let fi = create_fi(&mut store, "Tri sélectif");
    drive(&mut store, &fi.id, &TO_APPROVED);

    let input = NewProject {
        document_id: fi.id.clone(),
        initial_start_date: date(2024, 4, 1),
        initial_end_date: date(2024, 12, 31),
        budget_code: String::new(),
        committee: None,
        acting_user: PMO.to_string(),
    };
    let err = project::create_from_charter(&mut store, input, t0()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.projects.is_empty());
}

#[test]
fn test_one_project_per_charter() {
    let mut store = setup_store();
    let first = approved_project(&mut store, "Digitalisation RH");

    let input = NewProject {
        document_id: first.document_id.clone(),
        initial_start_date: date(2024, 4, 1),
        initial_end_date: date(2024, 12, 31),
        budget_code: String::new(),
        committee: None,
        acting_user: PMO.to_string(),
    };
    assert!(project::create_from_charter(&mut store, input, t0()).is_err());
    assert_eq!(store.projects.len(), 1);
}

#[test]
fn test_health_rules() {
    use PerformanceStatus::*;
    assert_eq!(overall_health(&[perf(Conforme), perf(Conforme), perf(Conforme)]), HealthStatus::Green);
    assert_eq!(overall_health(&[perf(Conforme), perf(MiseEnGarde), perf(Conforme)]), HealthStatus::Orange);
    assert_eq!(overall_health(&[perf(MiseEnGarde), perf(ARisque), perf(Conforme)]), HealthStatus::Red);
    assert_eq!(overall_health(&[perf(Conforme), perf(Conforme), perf(EnDerive)]), HealthStatus::Red);
}

#[test]
fn test_status_report_resets_clock() {
    let mut store = setup_store();
    let created = approved_project(&mut store, "Optimisation des tournées");
    let later = t0() + Duration::days(18);

    let updated = project::record_update(
        &mut store,
        &created.id,
        report(
            PerformanceStatus::Conforme,
            PerformanceStatus::MiseEnGarde,
            PerformanceStatus::Conforme,
        ),
        later,
    )
    .unwrap();

    assert_eq!(updated.last_updated, later);
    assert_eq!(updated.next_update_due, later + Duration::days(30));
    assert_eq!(updated.monitoring.health_status, HealthStatus::Orange);
    assert_eq!(updated.monitoring.completion_percentage, 25);
    assert_eq!(updated.monitoring.blockers, vec!["Validation sécurité IT en attente".to_string()]);
    assert_eq!(updated.status, ProjectStatus::InProgress);
    assert_eq!(updated.planning.actual_start_date, Some(later.date_naive()));
    assert_eq!(updated.reports.len(), 1);
}

#[test]
fn test_status_report_validation() {
    let mut store = setup_store();
    let created = approved_project(&mut store, "Optimisation des tournées");

    let mut bad = report(
        PerformanceStatus::Conforme,
        PerformanceStatus::Conforme,
        PerformanceStatus::Conforme,
    );
    bad.achievements = String::new();
    bad.completion_percentage = 140;

    let err = project::record_update(&mut store, &created.id, bad, t0() + Duration::days(1)).unwrap_err();
    match err {
        AppError::Validation(errors) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert!(fields.contains(&"achievements"));
            assert!(fields.contains(&"completionPercentage"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(project::find_by_id(&store, &created.id).unwrap().last_updated, t0());
}

#[test]
fn test_spend_updates_budget() {
    let mut store = setup_store();
    let created = approved_project(&mut store, "Optimisation des tournées");

    let spend = |amount: f64, external: bool| SpendRequest {
        amount,
        acting_user: PMO.to_string(),
        external,
    };
    project::record_spend(&mut store, &created.id, spend(40_000.0, true), t0()).unwrap();
    let updated = project::record_spend(&mut store, &created.id, spend(10_000.0, false), t0()).unwrap();

    assert_eq!(updated.budget.spent, 50_000.0);
    assert_eq!(updated.budget.external_costs, 40_000.0);
    assert_eq!(updated.budget.internal_costs, 10_000.0);
    assert_eq!(updated.budget.remaining(), 200_000.0);

    for amount in [0.0, -5.0, f64::NAN] {
        assert!(project::record_spend(&mut store, &created.id, spend(amount, true), t0()).is_err());
    }
}

#[test]
fn test_derived_summaries() {
    let store = setup_store_seeded();
    let rh = project::find_by_id(&store, "prj-rh").expect("seeded project");
    let response = ProjectResponse::from(rh);

    assert_eq!(response.budget_summary.remaining, 60_000.0);
    assert!((response.budget_summary.variance_pct - 3.333).abs() < 0.01);
    assert_eq!(response.planning_summary.variance_days, 15);
    assert_eq!(response.planning_summary.total_duration_days, 259);
}

#[test]
fn test_find_all_filters() {
    let store = setup_store_seeded();
    let all = project::find_all(&store, &ProjectFilter::default());
    assert_eq!(all.len(), 2);

    let planning = project::find_all(
        &store,
        &ProjectFilter {
            status: Some(ProjectStatus::Planning),
            ..Default::default()
        },
    );
    assert!(planning.is_empty());

    let orange = project::find_all(
        &store,
        &ProjectFilter {
            health: Some(HealthStatus::Orange),
            ..Default::default()
        },
    );
    assert_eq!(orange.len(), 2);

    let codir = project::find_all(
        &store,
        &ProjectFilter {
            committee: Some(CommitteeType::Codir),
            ..Default::default()
        },
    );
    assert_eq!(codir.len(), 1);
    assert_eq!(codir[0].id, "prj-rh");
}

#[test]
fn test_seeded_projects_reference_approved_charters() {
    let store = setup_store_seeded();
    for p in store.projects.values() {
        let fp = store.documents.get(&p.document_id).expect("charter exists");
        assert_eq!(fp.status, WorkflowStatus::Approved);
    }
}
