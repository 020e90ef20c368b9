use crate::infra::{AppState, SharedSession};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use job_swipe::error::AppError;
use job_swipe::triage::{
    DecideResult, FilterConfiguration, JobId, JobPosting, SortKey, StackView, TriageDecision,
    TriageOutcome, TriageProgress,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CardView {
    pub(crate) job: JobPosting,
    pub(crate) depth: usize,
    pub(crate) scale: f32,
    pub(crate) offset_y: f32,
    pub(crate) z_index: usize,
    pub(crate) interactive: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct StackResponse {
    pub(crate) empty: bool,
    pub(crate) cards: Vec<CardView>,
    pub(crate) progress: TriageProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FiltersPayload {
    #[serde(default)]
    pub(crate) filters: FilterConfiguration,
    #[serde(default)]
    pub(crate) sort: SortKey,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionRequest {
    pub(crate) job_id: JobId,
    pub(crate) outcome: TriageOutcome,
}

#[derive(Debug, Serialize)]
pub(crate) struct DecisionResponse {
    pub(crate) status: &'static str,
    pub(crate) decision: TriageDecision,
    pub(crate) progress: TriageProgress,
}

impl DecisionResponse {
    fn new(result: DecideResult, progress: TriageProgress) -> Self {
        let status = if result.is_applied() {
            "applied"
        } else {
            "already_decided"
        };
        let decision = match result {
            DecideResult::Applied(decision) | DecideResult::AlreadyDecided(decision) => decision,
        };
        Self {
            status,
            decision,
            progress,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JobListResponse {
    pub(crate) outcome: TriageOutcome,
    pub(crate) jobs: Vec<JobPosting>,
}

/// Triage endpoints bound to the shared session.
pub(crate) fn triage_router(session: SharedSession) -> Router {
    Router::new()
        .route("/api/v1/triage/stack", get(stack_endpoint))
        .route(
            "/api/v1/triage/filters",
            get(filters_endpoint).put(update_filters_endpoint),
        )
        .route("/api/v1/triage/decisions", post(decision_endpoint))
        .route("/api/v1/triage/accepted", get(accepted_endpoint))
        .route("/api/v1/triage/rejected", get(rejected_endpoint))
        .route("/api/v1/triage/progress", get(progress_endpoint))
        .with_state(session)
}

pub(crate) fn with_service_routes(session: SharedSession) -> Router {
    triage_router(session)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn stack_endpoint(State(session): State<SharedSession>) -> Json<StackResponse> {
    let session = session.lock();
    let stack = session.stack();
    let cards = match &stack {
        StackView::Empty => Vec::new(),
        StackView::Cards(cards) => cards
            .iter()
            .map(|card| CardView {
                job: card.job.clone(),
                depth: card.depth,
                scale: card.scale,
                offset_y: card.offset_y,
                z_index: card.z_index,
                interactive: card.interactive,
            })
            .collect(),
    };

    Json(StackResponse {
        empty: stack.is_empty(),
        cards,
        progress: session.progress(),
    })
}

pub(crate) async fn filters_endpoint(State(session): State<SharedSession>) -> Json<FiltersPayload> {
    let session = session.lock();
    Json(FiltersPayload {
        filters: session.filters().clone(),
        sort: session.sort_key(),
    })
}

pub(crate) async fn update_filters_endpoint(
    State(session): State<SharedSession>,
    Json(payload): Json<FiltersPayload>,
) -> Json<FiltersPayload> {
    let mut session = session.lock();
    session.configure(payload.filters, payload.sort);
    Json(FiltersPayload {
        filters: session.filters().clone(),
        sort: session.sort_key(),
    })
}

pub(crate) async fn decision_endpoint(
    State(session): State<SharedSession>,
    Json(request): Json<DecisionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = session.lock();
    let result = session.decide(&request.job_id, request.outcome)?;
    let status = if result.is_applied() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let progress = session.progress();
    Ok((status, Json(DecisionResponse::new(result, progress))))
}

pub(crate) async fn accepted_endpoint(
    State(session): State<SharedSession>,
) -> Json<JobListResponse> {
    let session = session.lock();
    Json(JobListResponse {
        outcome: TriageOutcome::Accepted,
        jobs: session.accepted().into_iter().cloned().collect(),
    })
}

pub(crate) async fn rejected_endpoint(
    State(session): State<SharedSession>,
) -> Json<JobListResponse> {
    let session = session.lock();
    Json(JobListResponse {
        outcome: TriageOutcome::Rejected,
        jobs: session.rejected().into_iter().cloned().collect(),
    })
}

pub(crate) async fn progress_endpoint(
    State(session): State<SharedSession>,
) -> Json<TriageProgress> {
    Json(session.lock().progress())
}
