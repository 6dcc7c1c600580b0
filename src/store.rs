use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::Rng;
use serde::Deserialize;

use crate::audit::AuditEntry;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::committee::CommitteeSession;
use crate::models::document::Document;
use crate::models::project::Project;
use crate::models::value_list::{ValueList, ValueListAuditEntry};
use crate::notifications::{Delivery, NotificationRule, default_rules};

/// Reference value lists (services, committees, risk categories, ...). Always loaded.
const REFERENCE_SEED: &str = include_str!("../data/seed/value_lists.json");
/// Demo portfolio (documents, projects, committee sessions).
const PORTFOLIO_SEED: &str = include_str!("../data/seed/portfolio.json");

/// The in-memory datastore. Every collection is owned here; handlers go
/// through [`AppState`] to read or mutate it.
#[derive(Debug)]
pub struct Store {
    pub documents: HashMap<String, Document>,
    pub projects: HashMap<String, Project>,
    pub committee_sessions: HashMap<String, CommitteeSession>,
    pub value_lists: Vec<ValueList>,
    pub value_list_audit: Vec<ValueListAuditEntry>,
    pub notification_rules: Vec<NotificationRule>,
    pub deliveries: Vec<Delivery>,
    pub acknowledged: HashSet<String>,
    pub audit: Vec<AuditEntry>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            documents: HashMap::new(),
            projects: HashMap::new(),
            committee_sessions: HashMap::new(),
            value_lists: Vec::new(),
            value_list_audit: Vec::new(),
            notification_rules: default_rules(),
            deliveries: Vec::new(),
            acknowledged: HashSet::new(),
            audit: Vec::new(),
        }
    }
}

/// Shared application state. The single lock makes every operation atomic:
/// handlers hold the write guard for the whole validate-then-apply sequence.
pub struct AppState {
    store: RwLock<Store>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self {
            store: RwLock::new(store),
            config,
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Opaque identifier: `<prefix>-<16 hex chars>`.
pub fn new_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();
    format!("{prefix}-{}", hex::encode(bytes))
}

#[derive(Deserialize)]
struct ReferenceSeed {
    value_lists: Vec<ValueList>,
}

#[derive(Deserialize)]
struct PortfolioSeed {
    documents: Vec<Document>,
    projects: Vec<Project>,
    committee_sessions: Vec<CommitteeSession>,
}

/// Load the reference value lists. Skipped when lists are already present.
pub fn seed_reference(store: &mut Store) -> Result<(), AppError> {
    if !store.value_lists.is_empty() {
        log::info!("Value lists already present ({}), skipping reference seed", store.value_lists.len());
        return Ok(());
    }
    let seed: ReferenceSeed = serde_json::from_str(REFERENCE_SEED)?;
    store.value_lists = seed.value_lists;
    log::info!("Seed reference: value_lists={}", store.value_lists.len());
    Ok(())
}

/// Load the demo portfolio. Existing ids are kept, seed entries with the same id are skipped.
pub fn seed_portfolio(store: &mut Store) -> Result<(), AppError> {
    let seed: PortfolioSeed = serde_json::from_str(PORTFOLIO_SEED)?;
    let mut created = 0;
    let mut skipped = 0;

    for doc in seed.documents {
        if store.documents.contains_key(&doc.id) {
            skipped += 1;
            continue;
        }
        store.documents.insert(doc.id.clone(), doc);
        created += 1;
    }
    for project in seed.projects {
        if store.projects.contains_key(&project.id) {
            skipped += 1;
            continue;
        }
        store.projects.insert(project.id.clone(), project);
        created += 1;
    }
    for session in seed.committee_sessions {
        if store.committee_sessions.contains_key(&session.id) {
            skipped += 1;
            continue;
        }
        store.committee_sessions.insert(session.id.clone(), session);
        created += 1;
    }

    log::info!("Seed portfolio: created={created}, skipped={skipped}");
    Ok(())
}

/// Build the application state according to `config`.
pub fn init_state(config: &AppConfig) -> Result<AppState, AppError> {
    let mut store = Store::default();
    seed_reference(&mut store)?;
    if config.seed_demo_data {
        seed_portfolio(&mut store)?;
    } else {
        log::info!("SEED_DEMO_DATA disabled, starting with an empty portfolio");
    }
    Ok(AppState::new(store, config.clone()))
}
