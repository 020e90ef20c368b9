use std::collections::{BTreeSet, HashSet};

use tracing::warn;

use super::domain::{FilterConfiguration, JobId, JobPosting, SortKey};
use super::ledger::TriageLedger;

/// Membership view over jobs that already carry a decision.
pub trait DecidedJobs {
    fn contains_job(&self, id: &JobId) -> bool;
}

impl DecidedJobs for HashSet<JobId> {
    fn contains_job(&self, id: &JobId) -> bool {
        self.contains(id)
    }
}

impl DecidedJobs for BTreeSet<JobId> {
    fn contains_job(&self, id: &JobId) -> bool {
        self.contains(id)
    }
}

impl DecidedJobs for TriageLedger {
    fn contains_job(&self, id: &JobId) -> bool {
        self.is_decided(id)
    }
}

/// Derive the ordered queue of jobs still eligible for triage.
///
/// Filtering drops decided jobs and anything outside `config`; sorting is stable so that
/// postings with equal keys keep their catalog order. An empty result is a valid state.
pub fn project<'a, D>(
    catalog: &'a [JobPosting],
    config: &FilterConfiguration,
    decided: &D,
    sort: SortKey,
) -> Vec<&'a JobPosting>
where
    D: DecidedJobs + ?Sized,
{
    if !config.wage_range.is_valid() {
        warn!(
            min = config.wage_range.min,
            max = config.wage_range.max,
            "wage range is inverted; no jobs will match"
        );
    }

    let mut queue: Vec<&JobPosting> = catalog
        .iter()
        .filter(|job| !decided.contains_job(&job.id))
        .filter(|job| config.matches(job))
        .collect();

    match sort {
        SortKey::Wage => queue.sort_by_key(|job| job.wage.hourly_equivalent()),
        SortKey::CommuteFromHome => queue.sort_by_key(|job| job.commute.home_minutes),
        SortKey::CommuteFromSchool => queue.sort_by_key(|job| job.commute.school_minutes),
        SortKey::PostingDate => queue.sort_by(|a, b| b.posted_on.cmp(&a.posted_on)),
    }

    queue
}
