//! Drag gesture classification for the front card of the stack.
//!
//! A gesture moves `Idle -> Dragging -> Idle`. While dragging, [`preview_decision`] and
//! [`card_transform`] drive the visual feedback and have no side effects. Only
//! [`GestureClassifier::release`] can yield a commit, and it does so at most once per
//! gesture: the release consumes the drag, so a re-fired release event finds the
//! classifier idle and is ignored.

use serde::{Deserialize, Serialize};

use super::domain::{JobId, TriageOutcome};

/// Width of the card the thresholds are derived from, in points.
pub const DEFAULT_CARD_WIDTH: f32 = 360.0;
/// Fraction of the card width a drag must travel to commit.
pub const DEFAULT_DISTANCE_RATIO: f32 = 0.25;
/// Release speed, in points per second, that commits regardless of distance.
pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 800.0;
/// Fraction of the distance threshold below which no lean is previewed.
pub const PREVIEW_DEAD_ZONE_RATIO: f32 = 0.1;
/// Card rotation, in degrees, at one full card width of displacement.
pub const MAX_ROTATION_DEGREES: f32 = 15.0;

/// Commit thresholds. Displacement and velocity are independent alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    pub card_width: f32,
    pub distance_ratio: f32,
    pub velocity: f32,
}

impl GestureThresholds {
    pub fn distance(&self) -> f32 {
        self.card_width * self.distance_ratio
    }
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            card_width: DEFAULT_CARD_WIDTH,
            distance_ratio: DEFAULT_DISTANCE_RATIO,
            velocity: DEFAULT_VELOCITY_THRESHOLD,
        }
    }
}

/// One movement sample reported by the host's gesture recognizer.
///
/// Translation is relative to the drag origin; velocity is in points per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragSample {
    pub translation_x: f32,
    pub translation_y: f32,
    #[serde(default)]
    pub velocity_x: f32,
}

impl DragSample {
    pub const fn horizontal(translation_x: f32, velocity_x: f32) -> Self {
        Self {
            translation_x,
            translation_y: 0.0,
            velocity_x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPreview {
    None,
    LeaningAccept,
    LeaningReject,
}

/// Visual state of the dragged card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CardTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotation_degrees: f32,
    pub accept_opacity: f32,
    pub reject_opacity: f32,
}

impl CardTransform {
    pub const CENTERED: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        rotation_degrees: 0.0,
        accept_opacity: 0.0,
        reject_opacity: 0.0,
    };
}

/// Side-effect free lean indicator, safe to evaluate on every frame.
///
/// Whenever releasing now would commit, the preview names that outcome; below both
/// thresholds it follows displacement outside the dead zone.
pub fn preview_decision(
    displacement: f32,
    velocity: f32,
    thresholds: &GestureThresholds,
) -> DecisionPreview {
    match classify_release(displacement, velocity, thresholds) {
        Some(TriageOutcome::Accepted) => return DecisionPreview::LeaningAccept,
        Some(TriageOutcome::Rejected) => return DecisionPreview::LeaningReject,
        None => {}
    }

    let dead_zone = thresholds.distance() * PREVIEW_DEAD_ZONE_RATIO;
    if displacement > dead_zone {
        DecisionPreview::LeaningAccept
    } else if displacement < -dead_zone {
        DecisionPreview::LeaningReject
    } else {
        DecisionPreview::None
    }
}

/// Dual-threshold release rule: distance OR speed in one direction commits.
pub fn classify_release(
    displacement: f32,
    velocity: f32,
    thresholds: &GestureThresholds,
) -> Option<TriageOutcome> {
    let distance = thresholds.distance();
    if displacement > distance || velocity > thresholds.velocity {
        Some(TriageOutcome::Accepted)
    } else if displacement < -distance || velocity < -thresholds.velocity {
        Some(TriageOutcome::Rejected)
    } else {
        None
    }
}

pub fn card_transform(sample: &DragSample, thresholds: &GestureThresholds) -> CardTransform {
    let dx = sample.translation_x;
    let width = thresholds.card_width.max(f32::EPSILON);
    let rotation = (dx / width * MAX_ROTATION_DEGREES)
        .clamp(-MAX_ROTATION_DEGREES, MAX_ROTATION_DEGREES);
    let progress = (dx.abs() / thresholds.distance().max(f32::EPSILON)).clamp(0.0, 1.0);

    CardTransform {
        translate_x: dx,
        translate_y: sample.translation_y,
        rotation_degrees: rotation,
        accept_opacity: if dx > 0.0 { progress } else { 0.0 },
        reject_opacity: if dx < 0.0 { progress } else { 0.0 },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging { job_id: JobId, last: DragSample },
}

/// Per-frame feedback while a drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragFeedback {
    pub preview: DecisionPreview,
    pub transform: CardTransform,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No drag was active; a duplicate or stray release.
    Ignored,
    /// Neither threshold was crossed; the card animates back to center.
    SnapBack { job_id: JobId },
    /// The gesture committed a decision for the job it started on.
    Commit { job_id: JobId, outcome: TriageOutcome },
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    phase: GesturePhase,
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            phase: GesturePhase::Idle,
        }
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    /// Job the active drag is bound to, if any.
    pub fn active_job(&self) -> Option<&JobId> {
        match &self.phase {
            GesturePhase::Dragging { job_id, .. } => Some(job_id),
            GesturePhase::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Start a drag bound to `job_id`. A drag already in progress is replaced.
    pub fn begin(&mut self, job_id: JobId) {
        self.phase = GesturePhase::Dragging {
            job_id,
            last: DragSample::default(),
        };
    }

    /// Record a movement sample. Returns `None` when no drag is active.
    pub fn update(&mut self, sample: DragSample) -> Option<DragFeedback> {
        match &mut self.phase {
            GesturePhase::Dragging { last, .. } => {
                *last = sample;
                Some(self.feedback(&sample))
            }
            GesturePhase::Idle => None,
        }
    }

    /// End the drag and classify it. The classifier is idle afterwards.
    pub fn release(&mut self, sample: DragSample) -> ReleaseOutcome {
        let job_id = match std::mem::replace(&mut self.phase, GesturePhase::Idle) {
            GesturePhase::Dragging { job_id, .. } => job_id,
            GesturePhase::Idle => return ReleaseOutcome::Ignored,
        };

        match classify_release(sample.translation_x, sample.velocity_x, &self.thresholds) {
            Some(outcome) => ReleaseOutcome::Commit { job_id, outcome },
            None => ReleaseOutcome::SnapBack { job_id },
        }
    }

    /// Abort the drag with no decision. Returns the job it was bound to.
    pub fn cancel(&mut self) -> Option<JobId> {
        match std::mem::replace(&mut self.phase, GesturePhase::Idle) {
            GesturePhase::Dragging { job_id, .. } => Some(job_id),
            GesturePhase::Idle => None,
        }
    }

    /// Current visual state of the front card.
    pub fn transform(&self) -> CardTransform {
        match &self.phase {
            GesturePhase::Dragging { last, .. } => card_transform(last, &self.thresholds),
            GesturePhase::Idle => CardTransform::CENTERED,
        }
    }

    fn feedback(&self, sample: &DragSample) -> DragFeedback {
        DragFeedback {
            preview: preview_decision(sample.translation_x, sample.velocity_x, &self.thresholds),
            transform: card_transform(sample, &self.thresholds),
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}
