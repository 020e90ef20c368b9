use job_swipe::triage::{
    CatalogError, JobCatalog, JsonFileLedgerStore, LedgerStore, MemoryLedgerStore, StoreError,
    TriageDecision, TriageSession,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Ledger backend selected from configuration.
#[derive(Debug, Clone)]
pub(crate) enum ConfiguredStore {
    Memory(MemoryLedgerStore),
    File(JsonFileLedgerStore),
}

impl ConfiguredStore {
    pub(crate) fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::File(JsonFileLedgerStore::new(path)),
            None => Self::Memory(MemoryLedgerStore::default()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "in-memory".to_string(),
            Self::File(store) => store.path().display().to_string(),
        }
    }
}

impl LedgerStore for ConfiguredStore {
    fn load(&self) -> Result<Vec<TriageDecision>, StoreError> {
        match self {
            Self::Memory(store) => store.load(),
            Self::File(store) => store.load(),
        }
    }

    fn save(&self, decisions: &[TriageDecision]) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.save(decisions),
            Self::File(store) => store.save(decisions),
        }
    }
}

/// Session shared by HTTP handlers; the mutex serializes every triage event.
#[derive(Clone)]
pub(crate) struct SharedSession(Arc<Mutex<TriageSession<ConfiguredStore>>>);

impl SharedSession {
    pub(crate) fn new(session: TriageSession<ConfiguredStore>) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, TriageSession<ConfiguredStore>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

const SAMPLE_CATALOG_CSV: &str = "\
id,title,category,location,wage_min,wage_max,pay_period,language_level,commute_home_minutes,commute_school_minutes,work_days,posted_on,highlights
job-001,Convenience store staff,retail,Shinjuku,1100,1250,hourly,N4,15,25,Mon|Wed|Fri,2025-06-10,Night shift allowance|Staff discount
job-002,Izakaya kitchen assistant,cooking,Shibuya,1200,,hourly,N3,25,20,Thu|Fri|Sat,2025-06-12,Free meals|Beginners welcome
job-003,Parcel sorting,warehouse,Kawasaki,10000,,daily,N5,45,50,Sat|Sun,2025-06-08,No conversation required|Daily pay
job-004,Office cleaning,cleaning,Marunouchi,1150,,hourly,N5,30,35,Mon|Tue|Wed|Thu|Fri,2025-06-11,Early morning|Short shifts
job-005,Hotel front desk,office,Asakusa,230000,260000,monthly,N2,40,20,Mon|Tue|Sat,2025-06-13,English welcome|Visa support
job-006,Bicycle courier,delivery,Shibuya,1300,1600,hourly,N4,10,15,Fri|Sat|Sun,2025-06-09,Flexible hours|Bike provided
job-007,Cafe floor staff,restaurant,Kichijoji,1150,,hourly,N3,20,30,Sat|Sun,2025-06-12,Free drinks
job-008,Construction site helper,construction,Yokohama,12000,,daily,N4,55,60,Mon|Tue|Wed,2025-06-07,Transport paid
";

/// Catalog from `path`, or the bundled sample when no path is configured.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<JobCatalog, CatalogError> {
    match path {
        Some(path) => JobCatalog::from_path(path),
        None => JobCatalog::from_csv_reader(Cursor::new(SAMPLE_CATALOG_CSV)),
    }
}
