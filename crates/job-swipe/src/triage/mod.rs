//! Swipe-based job triage: queue projection, gesture classification, decision ledger,
//! and stack presentation, composed by [`TriageSession`].

pub mod catalog;
pub mod domain;
pub mod gesture;
pub mod ledger;
pub mod presenter;
pub mod projector;
pub mod session;
pub mod settings;
pub mod store;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, JobCatalog};
pub use domain::{
    Commute, FilterConfiguration, JobCategory, JobId, JobPosting, LanguageLevel, PayPeriod,
    SortKey, TriageDecision, TriageOutcome, Wage, WageRange,
};
pub use gesture::{
    preview_decision, CardTransform, DecisionPreview, DragFeedback, DragSample,
    GestureClassifier, GestureThresholds, ReleaseOutcome,
};
pub use ledger::{DecideResult, TriageLedger};
pub use presenter::{StackCard, StackPresenter, StackView};
pub use projector::{project, DecidedJobs};
pub use session::{SwipeResult, TriageError, TriageProgress, TriageSession};
pub use settings::TriageSettings;
pub use store::{JsonFileLedgerStore, LedgerStore, MemoryLedgerStore, StoreError};
