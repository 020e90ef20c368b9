use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{JobId, JobPosting, TriageDecision, TriageOutcome};

/// Result of asking the ledger to record a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "decision", rename_all = "snake_case")]
pub enum DecideResult {
    /// The decision was recorded.
    Applied(TriageDecision),
    /// A decision already existed; it is returned untouched.
    AlreadyDecided(TriageDecision),
}

impl DecideResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The decision that is now authoritative for the job.
    pub fn decision(&self) -> &TriageDecision {
        match self {
            Self::Applied(decision) | Self::AlreadyDecided(decision) => decision,
        }
    }
}

/// Authoritative job → decision mapping with at-most-one decision per job.
///
/// Decisions are kept in the order they were made; history views list oldest first.
#[derive(Debug, Clone, Default)]
pub struct TriageLedger {
    decisions: Vec<TriageDecision>,
    index: HashMap<JobId, usize>,
}

impl TriageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted decisions. Later duplicates of a job are discarded.
    pub fn from_decisions(decisions: impl IntoIterator<Item = TriageDecision>) -> Self {
        let mut ledger = Self::new();
        for decision in decisions {
            if ledger.index.contains_key(&decision.job_id) {
                debug!(job_id = %decision.job_id, "dropping duplicate persisted decision");
                continue;
            }
            ledger.push(decision);
        }
        ledger
    }

    pub fn decide(&mut self, job_id: JobId, outcome: TriageOutcome) -> DecideResult {
        self.decide_at(job_id, outcome, Utc::now())
    }

    pub fn decide_at(
        &mut self,
        job_id: JobId,
        outcome: TriageOutcome,
        decided_at: DateTime<Utc>,
    ) -> DecideResult {
        if let Some(existing) = self.get(&job_id) {
            debug!(
                %job_id,
                requested = outcome.label(),
                recorded = existing.outcome.label(),
                "decision ignored; job already decided"
            );
            return DecideResult::AlreadyDecided(existing.clone());
        }

        let decision = TriageDecision {
            job_id,
            outcome,
            decided_at,
        };
        info!(job_id = %decision.job_id, outcome = outcome.label(), "triage decision recorded");
        self.push(decision.clone());
        DecideResult::Applied(decision)
    }

    pub fn is_decided(&self, job_id: &JobId) -> bool {
        self.index.contains_key(job_id)
    }

    pub fn get(&self, job_id: &JobId) -> Option<&TriageDecision> {
        self.index
            .get(job_id)
            .and_then(|position| self.decisions.get(*position))
    }

    pub fn outcome_of(&self, job_id: &JobId) -> Option<TriageOutcome> {
        self.get(job_id).map(|decision| decision.outcome)
    }

    /// Every decision in the order it was recorded.
    pub fn decisions(&self) -> &[TriageDecision] {
        &self.decisions
    }

    /// Join decisions with `outcome` back to catalog entries, in decision order.
    ///
    /// Decisions whose job has since left the catalog are skipped.
    pub fn list_by_outcome<'a>(
        &self,
        catalog: &'a [JobPosting],
        outcome: TriageOutcome,
    ) -> Vec<&'a JobPosting> {
        let by_id: HashMap<&JobId, &JobPosting> =
            catalog.iter().map(|job| (&job.id, job)).collect();

        self.decisions
            .iter()
            .filter(|decision| decision.outcome == outcome)
            .filter_map(|decision| by_id.get(&decision.job_id).copied())
            .collect()
    }

    pub fn accepted<'a>(&self, catalog: &'a [JobPosting]) -> Vec<&'a JobPosting> {
        self.list_by_outcome(catalog, TriageOutcome::Accepted)
    }

    pub fn rejected<'a>(&self, catalog: &'a [JobPosting]) -> Vec<&'a JobPosting> {
        self.list_by_outcome(catalog, TriageOutcome::Rejected)
    }

    pub fn count(&self, outcome: TriageOutcome) -> usize {
        self.decisions
            .iter()
            .filter(|decision| decision.outcome == outcome)
            .count()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    fn push(&mut self, decision: TriageDecision) {
        self.index.insert(decision.job_id.clone(), self.decisions.len());
        self.decisions.push(decision);
    }
}
