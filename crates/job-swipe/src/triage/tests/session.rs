use std::collections::BTreeSet;

use super::common::*;
use crate::triage::domain::{FilterConfiguration, JobCategory, SortKey, TriageOutcome};
use crate::triage::gesture::DragSample;
use crate::triage::ledger::DecideResult;
use crate::triage::session::{SwipeResult, TriageError};
use crate::triage::store::LedgerStore;
use crate::triage::{JobCatalog, TriageSession, TriageSettings};

fn retail_by_wage() -> (FilterConfiguration, SortKey) {
    (
        FilterConfiguration {
            categories: BTreeSet::from([JobCategory::Retail]),
            ..FilterConfiguration::default()
        },
        SortKey::Wage,
    )
}

fn swipe(session: &mut TriageSession<impl LedgerStore>, dx: f32) -> SwipeResult {
    session.begin_drag().expect("front card present");
    session.drag(DragSample::horizontal(dx / 2.0, 0.0));
    session.drag(DragSample::horizontal(dx, 0.0));
    session.release(DragSample::horizontal(dx, 0.0))
}

#[test]
fn scenario_swipes_drain_the_retail_queue() {
    let (mut session, store) = build_session();
    let (filters, sort) = retail_by_wage();
    session.configure(filters, sort);
    assert_eq!(ids(&session.queue()), vec!["J1", "J3"]);

    let right = swipe(&mut session, 150.0);
    assert!(matches!(right, SwipeResult::Committed(DecideResult::Applied(_))));
    assert_eq!(ids(&session.accepted()), vec!["J1"]);
    assert_eq!(ids(&session.queue()), vec!["J3"]);

    let left = swipe(&mut session, -150.0);
    assert!(matches!(left, SwipeResult::Committed(DecideResult::Applied(_))));
    assert_eq!(ids(&session.rejected()), vec!["J3"]);
    assert!(session.queue().is_empty());
    assert!(session.stack().is_empty());
    assert!(session.is_exhausted());

    assert_eq!(store.saved().len(), 2);
    let progress = session.progress();
    assert_eq!(progress.accepted, 1);
    assert_eq!(progress.rejected, 1);
    assert_eq!(progress.pending, 0);
    assert_eq!(progress.advanced, 2);
    assert_eq!(progress.total, 3);
}

#[test]
fn snap_back_leaves_ledger_and_queue_untouched() {
    let (mut session, store) = build_session();

    let result = swipe(&mut session, 30.0);

    assert!(matches!(result, SwipeResult::SnapBack { .. }));
    assert!(session.ledger().is_empty());
    assert_eq!(session.pending_count(), 3);
    assert!(store.saved().is_empty());
}

#[test]
fn duplicate_release_commits_once() {
    let (mut session, store) = build_session();
    session.begin_drag();
    session.drag(DragSample::horizontal(200.0, 0.0));

    let first = session.release(DragSample::horizontal(200.0, 0.0));
    let second = session.release(DragSample::horizontal(200.0, 0.0));

    assert!(matches!(first, SwipeResult::Committed(_)));
    assert_eq!(second, SwipeResult::Ignored);
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(store.saved().len(), 1);
    assert_eq!(session.progress().advanced, 1);
}

#[test]
fn drag_is_bound_to_the_job_it_started_on() {
    let (mut session, _) = build_session();
    let (filters, _) = retail_by_wage();
    session.configure(filters, SortKey::Wage);
    let dragged = session.begin_drag().expect("front card");
    assert_eq!(dragged, id("J1"));

    // resorting keeps J1 at the front, so the drag survives
    session.set_sort_key(SortKey::CommuteFromHome);
    assert!(session.is_dragging());

    let result = session.release(DragSample::horizontal(0.0, 1200.0));
    match result {
        SwipeResult::Committed(DecideResult::Applied(decision)) => {
            assert_eq!(decision.job_id, id("J1"));
            assert_eq!(decision.outcome, TriageOutcome::Accepted);
        }
        other => panic!("expected commit, got {other:?}"),
    }
}

#[test]
fn filter_change_that_moves_front_card_aborts_the_drag() {
    let (mut session, store) = build_session();
    session.set_sort_key(SortKey::Wage);
    assert_eq!(session.begin_drag(), Some(id("J1")));
    session.drag(DragSample::horizontal(250.0, 0.0));

    session.set_filters(FilterConfiguration {
        categories: BTreeSet::from([JobCategory::Office]),
        ..FilterConfiguration::default()
    });

    assert!(!session.is_dragging());
    assert_eq!(
        session.release(DragSample::horizontal(250.0, 0.0)),
        SwipeResult::Ignored
    );
    assert!(session.ledger().is_empty());
    assert!(store.saved().is_empty());
    assert_eq!(ids(&session.queue()), vec!["J2"]);
}

#[test]
fn cancelled_drag_has_no_side_effects() {
    let (mut session, store) = build_session();
    session.begin_drag();
    session.drag(DragSample::horizontal(-300.0, -2000.0));

    assert!(session.cancel_drag());
    assert!(!session.cancel_drag());
    assert_eq!(session.release(DragSample::horizontal(-300.0, 0.0)), SwipeResult::Ignored);
    assert!(session.ledger().is_empty());
    assert!(store.saved().is_empty());
    assert_eq!(session.pending_count(), 3);
}

#[test]
fn button_decisions_share_the_idempotent_commit_path() {
    let (mut session, _) = build_session();
    session.set_sort_key(SortKey::Wage);

    let accepted = session.accept_front().expect("front card");
    assert!(accepted.is_applied());
    assert_eq!(accepted.decision().job_id, id("J1"));

    let again = session
        .decide(&id("J1"), TriageOutcome::Rejected)
        .expect("job is in catalog");
    assert!(!again.is_applied());
    assert_eq!(again.decision().outcome, TriageOutcome::Accepted);

    let rejected = session.reject_front().expect("front card");
    assert_eq!(rejected.decision().job_id, id("J3"));
    assert_eq!(session.progress().advanced, 2);
}

#[test]
fn deciding_unknown_job_is_an_error() {
    let (mut session, _) = build_session();

    match session.decide(&id("nope"), TriageOutcome::Accepted) {
        Err(TriageError::UnknownJob(job_id)) => assert_eq!(job_id, id("nope")),
        other => panic!("expected unknown job, got {other:?}"),
    }
}

#[test]
fn empty_queue_has_no_front_and_no_drag() {
    let (mut session, _) = build_session();
    session.set_filters(FilterConfiguration {
        categories: BTreeSet::from([JobCategory::Construction]),
        ..FilterConfiguration::default()
    });

    assert!(session.front().is_none());
    assert!(session.begin_drag().is_none());
    assert!(session.accept_front().is_none());
    assert!(session.stack().is_empty());
}

#[test]
fn persisted_ledger_is_loaded_at_start() {
    let store = crate::triage::MemoryLedgerStore::default();
    {
        let mut first =
            TriageSession::new(scenario_catalog(), store.clone(), &TriageSettings::default())
                .expect("session");
        first
            .decide(&id("J2"), TriageOutcome::Rejected)
            .expect("known job");
    }

    let resumed = TriageSession::new(scenario_catalog(), store, &TriageSettings::default())
        .expect("session");

    assert_eq!(resumed.ledger().outcome_of(&id("J2")), Some(TriageOutcome::Rejected));
    assert_eq!(resumed.pending_count(), 2);
    assert_eq!(resumed.progress().advanced, 0);
}

#[test]
fn failed_save_keeps_decision_and_marks_dirty() {
    let store = FlakyStore::default();
    let mut session =
        TriageSession::new(scenario_catalog(), store.clone(), &TriageSettings::default())
            .expect("session");

    let result = session
        .decide(&id("J1"), TriageOutcome::Accepted)
        .expect("known job");

    assert!(result.is_applied());
    assert!(session.is_dirty());
    assert!(!session.queue().iter().any(|job| job.id == id("J1")));
    assert!(session.flush().is_err());

    store.heal();
    session.flush().expect("store recovered");
    assert!(!session.is_dirty());
    assert_eq!(store.inner.saved().len(), 1);
}

#[test]
fn unavailable_store_fails_session_start() {
    let result = TriageSession::new(
        scenario_catalog(),
        UnavailableStore,
        &TriageSettings::default(),
    );

    assert!(matches!(result, Err(TriageError::Store(_))));
}

#[test]
fn replacing_catalog_keeps_history_for_removed_jobs() {
    let (mut session, _) = build_session();
    session
        .decide(&id("J1"), TriageOutcome::Accepted)
        .expect("known job");

    let remaining: Vec<_> = scenario_jobs().into_iter().skip(1).collect();
    session.replace_catalog(JobCatalog::new(remaining).expect("unique ids"));

    assert!(session.accepted().is_empty());
    assert!(session.ledger().is_decided(&id("J1")));
    assert_eq!(session.pending_count(), 2);
}

#[test]
fn stack_front_matches_session_front() {
    let (mut session, _) = build_session();
    session.set_sort_key(SortKey::Wage);

    let stack = session.stack();
    let front = stack.front().expect("cards");

    assert_eq!(front.job.id, id("J1"));
    assert_eq!(stack.cards().len(), 3);
    assert_eq!(session.front().map(|job| job.id.clone()), Some(id("J1")));
}
