use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};

use crate::triage::domain::{
    Commute, JobCategory, JobId, JobPosting, LanguageLevel, PayPeriod, TriageDecision, Wage,
};
use crate::triage::store::{LedgerStore, MemoryLedgerStore, StoreError};
use crate::triage::{JobCatalog, TriageSession, TriageSettings};

pub(super) fn id(raw: &str) -> JobId {
    JobId::new(raw)
}

pub(super) fn posted(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).expect("valid date")
}

pub(super) fn posting(raw_id: &str, category: JobCategory, hourly: u32) -> JobPosting {
    JobPosting {
        id: id(raw_id),
        title: format!("{} shift", category.label()),
        category,
        location: "Shinjuku".to_string(),
        wage: Wage::scalar(hourly, PayPeriod::Hourly),
        language_level: LanguageLevel::N3,
        commute: Commute {
            home_minutes: 30,
            school_minutes: 20,
        },
        work_days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
        posted_on: posted(1),
        highlights: vec!["Weekly pay".to_string()],
    }
}

/// J1 retail 1000, J2 office 1500, J3 retail 1200.
pub(super) fn scenario_jobs() -> Vec<JobPosting> {
    vec![
        posting("J1", JobCategory::Retail, 1000),
        posting("J2", JobCategory::Office, 1500),
        posting("J3", JobCategory::Retail, 1200),
    ]
}

pub(super) fn scenario_catalog() -> JobCatalog {
    JobCatalog::new(scenario_jobs()).expect("unique ids")
}

pub(super) fn ids(jobs: &[&JobPosting]) -> Vec<String> {
    jobs.iter().map(|job| job.id.0.clone()).collect()
}

pub(super) fn build_session() -> (TriageSession<MemoryLedgerStore>, MemoryLedgerStore) {
    let store = MemoryLedgerStore::default();
    let session = TriageSession::new(scenario_catalog(), store.clone(), &TriageSettings::default())
        .expect("memory store loads");
    (session, store)
}

/// Store whose saves fail until `heal` is called.
#[derive(Default, Clone)]
pub(super) struct FlakyStore {
    pub(super) inner: MemoryLedgerStore,
    healthy: Arc<AtomicBool>,
}

impl FlakyStore {
    pub(super) fn heal(&self) {
        self.healthy.store(true, Ordering::SeqCst);
    }
}

impl LedgerStore for FlakyStore {
    fn load(&self) -> Result<Vec<TriageDecision>, StoreError> {
        self.inner.load()
    }

    fn save(&self, decisions: &[TriageDecision]) -> Result<(), StoreError> {
        if !self.healthy.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("disk offline".to_string()));
        }
        self.inner.save(decisions)
    }
}

pub(super) struct UnavailableStore;

impl LedgerStore for UnavailableStore {
    fn load(&self) -> Result<Vec<TriageDecision>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _decisions: &[TriageDecision]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}
