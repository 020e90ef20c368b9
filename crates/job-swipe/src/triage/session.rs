use serde::Serialize;
use tracing::{debug, info, warn};

use super::catalog::JobCatalog;
use super::domain::{FilterConfiguration, JobId, JobPosting, SortKey, TriageOutcome};
use super::gesture::{
    CardTransform, DragFeedback, DragSample, GestureClassifier, GestureThresholds, ReleaseOutcome,
};
use super::ledger::{DecideResult, TriageLedger};
use super::presenter::{StackPresenter, StackView};
use super::projector::project;
use super::settings::TriageSettings;
use super::store::{LedgerStore, StoreError};

/// Service composing the projector, ledger, gesture classifier, and stack presenter.
///
/// Every mutation recomputes the pending queue before returning, so callers never observe
/// a queue that disagrees with the ledger.
pub struct TriageSession<S> {
    catalog: JobCatalog,
    filters: FilterConfiguration,
    sort: SortKey,
    ledger: TriageLedger,
    store: S,
    classifier: GestureClassifier,
    presenter: StackPresenter,
    queue: Vec<JobId>,
    dirty: bool,
}

/// What a drag release did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeResult {
    /// No drag was active.
    Ignored,
    /// Below both thresholds; the card returns to center.
    SnapBack { job_id: JobId },
    Committed(DecideResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriageProgress {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub pending: usize,
    pub advanced: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("job '{0}' is not in the catalog")]
    UnknownJob(JobId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<S> TriageSession<S>
where
    S: LedgerStore,
{
    /// Load the persisted ledger from `store` and project the initial queue.
    pub fn new(
        catalog: JobCatalog,
        store: S,
        settings: &TriageSettings,
    ) -> Result<Self, TriageError> {
        let ledger = TriageLedger::from_decisions(store.load()?);

        let mut session = Self {
            catalog,
            filters: FilterConfiguration::default(),
            sort: SortKey::default(),
            ledger,
            store,
            classifier: GestureClassifier::new(settings.thresholds),
            presenter: StackPresenter::new(settings.stack_depth),
            queue: Vec::new(),
            dirty: false,
        };
        session.refresh();

        info!(
            jobs = session.catalog.len(),
            decided = session.ledger.len(),
            pending = session.queue.len(),
            "triage session ready"
        );
        Ok(session)
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterConfiguration {
        &self.filters
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn ledger(&self) -> &TriageLedger {
        &self.ledger
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        self.classifier.thresholds()
    }

    pub fn set_filters(&mut self, filters: FilterConfiguration) {
        self.filters = filters;
        self.refresh();
    }

    pub fn set_sort_key(&mut self, sort: SortKey) {
        self.sort = sort;
        self.refresh();
    }

    /// Apply filters and sort together with a single recomputation.
    pub fn configure(&mut self, filters: FilterConfiguration, sort: SortKey) {
        self.filters = filters;
        self.sort = sort;
        self.refresh();
    }

    /// Swap in a fresh catalog snapshot. Decisions for jobs no longer listed are kept.
    pub fn replace_catalog(&mut self, catalog: JobCatalog) {
        self.catalog = catalog;
        self.refresh();
    }

    /// Pending jobs in display order.
    pub fn queue(&self) -> Vec<&JobPosting> {
        self.queue
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn front(&self) -> Option<&JobPosting> {
        self.queue.first().and_then(|id| self.catalog.get(id))
    }

    pub fn stack(&self) -> StackView<'_> {
        self.presenter.present(&self.queue())
    }

    pub fn card_transform(&self) -> CardTransform {
        self.classifier.transform()
    }

    pub fn is_dragging(&self) -> bool {
        self.classifier.is_dragging()
    }

    /// Start dragging the front card. Returns the job the drag is bound to.
    pub fn begin_drag(&mut self) -> Option<JobId> {
        let job_id = self.queue.first()?.clone();
        self.classifier.begin(job_id.clone());
        Some(job_id)
    }

    pub fn drag(&mut self, sample: DragSample) -> Option<DragFeedback> {
        self.classifier.update(sample)
    }

    pub fn release(&mut self, sample: DragSample) -> SwipeResult {
        match self.classifier.release(sample) {
            ReleaseOutcome::Ignored => SwipeResult::Ignored,
            ReleaseOutcome::SnapBack { job_id } => SwipeResult::SnapBack { job_id },
            ReleaseOutcome::Commit { job_id, outcome } => {
                SwipeResult::Committed(self.commit(job_id, outcome))
            }
        }
    }

    /// Abort the active drag without recording anything.
    pub fn cancel_drag(&mut self) -> bool {
        match self.classifier.cancel() {
            Some(job_id) => {
                debug!(%job_id, "drag cancelled");
                true
            }
            None => false,
        }
    }

    /// Button entry point: decide the front card without a gesture.
    pub fn decide_front(&mut self, outcome: TriageOutcome) -> Option<DecideResult> {
        let job_id = self.queue.first()?.clone();
        Some(self.commit(job_id, outcome))
    }

    pub fn accept_front(&mut self) -> Option<DecideResult> {
        self.decide_front(TriageOutcome::Accepted)
    }

    pub fn reject_front(&mut self) -> Option<DecideResult> {
        self.decide_front(TriageOutcome::Rejected)
    }

    /// Decide any catalog job by id, whether or not it is currently at the front.
    pub fn decide(
        &mut self,
        job_id: &JobId,
        outcome: TriageOutcome,
    ) -> Result<DecideResult, TriageError> {
        if !self.catalog.contains(job_id) {
            return Err(TriageError::UnknownJob(job_id.clone()));
        }
        Ok(self.commit(job_id.clone(), outcome))
    }

    pub fn accepted(&self) -> Vec<&JobPosting> {
        self.ledger.accepted(self.catalog.jobs())
    }

    pub fn rejected(&self) -> Vec<&JobPosting> {
        self.ledger.rejected(self.catalog.jobs())
    }

    pub fn progress(&self) -> TriageProgress {
        TriageProgress {
            total: self.catalog.len(),
            accepted: self.ledger.count(TriageOutcome::Accepted),
            rejected: self.ledger.count(TriageOutcome::Rejected),
            pending: self.queue.len(),
            advanced: self.presenter.advanced(),
        }
    }

    /// True when the last save failed and the store is behind the in-memory ledger.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Retry persisting the ledger.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.store.save(self.ledger.decisions())?;
        self.dirty = false;
        Ok(())
    }

    fn commit(&mut self, job_id: JobId, outcome: TriageOutcome) -> DecideResult {
        let result = self.ledger.decide(job_id, outcome);
        if result.is_applied() {
            self.presenter.advance();
            self.persist();
            self.refresh();
        }
        result
    }

    fn persist(&mut self) {
        match self.store.save(self.ledger.decisions()) {
            Ok(()) => self.dirty = false,
            Err(err) => {
                warn!(error = %err, "failed to persist triage ledger; in-memory ledger kept");
                self.dirty = true;
            }
        }
    }

    fn refresh(&mut self) {
        let projected = project(self.catalog.jobs(), &self.filters, &self.ledger, self.sort);
        self.queue = projected.into_iter().map(|job| job.id.clone()).collect();

        let stale_drag = self
            .classifier
            .active_job()
            .is_some_and(|active| self.queue.first() != Some(active));
        if stale_drag {
            if let Some(job_id) = self.classifier.cancel() {
                debug!(%job_id, "drag cancelled; card left the front of the queue");
            }
        }
    }
}
