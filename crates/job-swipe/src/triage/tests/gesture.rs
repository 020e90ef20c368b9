use super::common::*;
use crate::triage::domain::TriageOutcome;
use crate::triage::gesture::{
    card_transform, classify_release, preview_decision, CardTransform, DecisionPreview,
    DragSample, GestureClassifier, GestureThresholds, ReleaseOutcome, MAX_ROTATION_DEGREES,
};

fn thresholds() -> GestureThresholds {
    GestureThresholds::default()
}

#[test]
fn default_thresholds_are_a_quarter_card_and_800_points_per_second() {
    let thresholds = thresholds();
    assert_eq!(thresholds.distance(), 90.0);
    assert_eq!(thresholds.velocity, 800.0);
}

#[test]
fn short_slow_release_snaps_back() {
    let mut classifier = GestureClassifier::default();
    classifier.begin(id("J1"));
    classifier.update(DragSample::horizontal(40.0, 200.0));

    let outcome = classifier.release(DragSample::horizontal(40.0, 200.0));

    assert_eq!(outcome, ReleaseOutcome::SnapBack { job_id: id("J1") });
    assert!(!classifier.is_dragging());
    assert_eq!(classifier.transform(), CardTransform::CENTERED);
}

#[test]
fn long_drag_commits_accept_exactly_once() {
    let mut classifier = GestureClassifier::default();
    classifier.begin(id("J1"));
    classifier.update(DragSample::horizontal(120.0, 0.0));

    let first = classifier.release(DragSample::horizontal(120.0, 0.0));
    let duplicate = classifier.release(DragSample::horizontal(120.0, 0.0));

    assert_eq!(
        first,
        ReleaseOutcome::Commit {
            job_id: id("J1"),
            outcome: TriageOutcome::Accepted,
        }
    );
    assert_eq!(duplicate, ReleaseOutcome::Ignored);
}

#[test]
fn fast_flick_commits_without_distance() {
    assert_eq!(
        classify_release(10.0, 950.0, &thresholds()),
        Some(TriageOutcome::Accepted)
    );
    assert_eq!(
        classify_release(-10.0, -950.0, &thresholds()),
        Some(TriageOutcome::Rejected)
    );
}

#[test]
fn mirrored_drag_commits_reject() {
    assert_eq!(
        classify_release(-91.0, 0.0, &thresholds()),
        Some(TriageOutcome::Rejected)
    );
}

#[test]
fn thresholds_are_strict() {
    assert_eq!(classify_release(90.0, 0.0, &thresholds()), None);
    assert_eq!(classify_release(0.0, 800.0, &thresholds()), None);
    assert_eq!(classify_release(-90.0, -800.0, &thresholds()), None);
}

#[test]
fn preview_leans_with_displacement_outside_dead_zone() {
    let thresholds = thresholds();
    assert_eq!(preview_decision(5.0, 0.0, &thresholds), DecisionPreview::None);
    assert_eq!(
        preview_decision(30.0, 0.0, &thresholds),
        DecisionPreview::LeaningAccept
    );
    assert_eq!(
        preview_decision(-30.0, 0.0, &thresholds),
        DecisionPreview::LeaningReject
    );
    assert_eq!(
        preview_decision(0.0, -900.0, &thresholds),
        DecisionPreview::LeaningReject
    );
}

#[test]
fn preview_names_the_outcome_release_would_commit() {
    let thresholds = thresholds();

    // short drag right, fast flick left: the flick wins on release
    assert_eq!(
        classify_release(30.0, -900.0, &thresholds),
        Some(TriageOutcome::Rejected)
    );
    assert_eq!(
        preview_decision(30.0, -900.0, &thresholds),
        DecisionPreview::LeaningReject
    );

    assert_eq!(
        classify_release(-30.0, 900.0, &thresholds),
        Some(TriageOutcome::Accepted)
    );
    assert_eq!(
        preview_decision(-30.0, 900.0, &thresholds),
        DecisionPreview::LeaningAccept
    );
}

#[test]
fn velocity_at_threshold_shows_no_lean() {
    let thresholds = thresholds();

    assert_eq!(classify_release(0.0, 800.0, &thresholds), None);
    assert_eq!(preview_decision(0.0, 800.0, &thresholds), DecisionPreview::None);
    assert_eq!(preview_decision(0.0, -800.0, &thresholds), DecisionPreview::None);
}

#[test]
fn transform_rotates_and_fades_indicator_with_displacement() {
    let thresholds = thresholds();

    let halfway = card_transform(&DragSample::horizontal(45.0, 0.0), &thresholds);
    assert_eq!(halfway.accept_opacity, 0.5);
    assert_eq!(halfway.reject_opacity, 0.0);
    assert!(halfway.rotation_degrees > 0.0);

    let far_left = card_transform(&DragSample::horizontal(-720.0, 0.0), &thresholds);
    assert_eq!(far_left.reject_opacity, 1.0);
    assert_eq!(far_left.rotation_degrees, -MAX_ROTATION_DEGREES);
}

#[test]
fn update_without_drag_is_ignored() {
    let mut classifier = GestureClassifier::default();

    assert!(classifier.update(DragSample::horizontal(200.0, 0.0)).is_none());
    assert_eq!(
        classifier.release(DragSample::horizontal(200.0, 0.0)),
        ReleaseOutcome::Ignored
    );
}

#[test]
fn cancel_returns_to_idle_without_commit() {
    let mut classifier = GestureClassifier::default();
    classifier.begin(id("J2"));
    let feedback = classifier
        .update(DragSample::horizontal(-150.0, -1200.0))
        .expect("dragging");
    assert_eq!(feedback.preview, DecisionPreview::LeaningReject);

    assert_eq!(classifier.cancel(), Some(id("J2")));
    assert_eq!(
        classifier.release(DragSample::horizontal(-150.0, -1200.0)),
        ReleaseOutcome::Ignored
    );
}

#[test]
fn custom_card_width_scales_distance_threshold() {
    let thresholds = GestureThresholds {
        card_width: 200.0,
        ..GestureThresholds::default()
    };

    assert_eq!(
        classify_release(60.0, 0.0, &thresholds),
        Some(TriageOutcome::Accepted)
    );
}
