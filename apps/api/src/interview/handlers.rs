//! Axum route handlers for the Interview API.
//!
//! Every handler locks the candidate's session for the whole request, so a
//! session never sees two concurrent generator calls.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::controller::InterviewController;
use crate::interview::summary::InterviewSummary;
use crate::interview::GREETING;
use crate::models::interview::{InterviewSession, Phase, Progress, QuestionOrigin};
use crate::models::profile::ProfileForm;
use crate::session::SessionHandle;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CurrentQuestion {
    /// 1-based position among answered questions.
    pub number: usize,
    pub text: String,
    pub origin: QuestionOrigin,
}

/// Everything the presentation layer needs to render one screen.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: Phase,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<&'static str>,
    pub current_question: Option<CurrentQuestion>,
    pub progress: Progress,
    pub summary: Option<InterviewSummary>,
}

impl SessionView {
    fn build(controller: &InterviewController, session: &InterviewSession) -> Self {
        Self {
            session_id: session.id,
            phase: session.phase,
            started_at: session.created_at,
            greeting: (session.phase == Phase::Start).then_some(GREETING),
            current_question: controller.current_question(session).map(|q| CurrentQuestion {
                number: session.answers.len() + 1,
                text: q.text.clone(),
                origin: q.origin,
            }),
            progress: controller.progress(session),
            summary: controller.summary(session),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub follow_up_inserted: bool,
    pub sentiment: f32,
    pub session: SessionView,
}

fn find_session(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let (_, handle) = state.sessions.create();
    let session = handle.lock().await;
    Ok((
        StatusCode::CREATED,
        Json(SessionView::build(&state.controller, &session)),
    ))
}

/// GET /api/v1/sessions/:id
///
/// Re-entering an interview whose queue is still empty seeds it; otherwise read-only.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find_session(&state, id)?;
    let mut session = handle.lock().await;
    state.controller.enter_interview(&mut session).await;
    Ok(Json(SessionView::build(&state.controller, &session)))
}

/// POST /api/v1/sessions/:id/begin
pub async fn handle_begin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find_session(&state, id)?;
    let mut session = handle.lock().await;
    state.controller.begin(&mut session)?;
    Ok(Json(SessionView::build(&state.controller, &session)))
}

/// POST /api/v1/sessions/:id/profile
///
/// Validates the form, moves to `interviewing`, and seeds the question queue.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find_session(&state, id)?;
    let mut session = handle.lock().await;
    state.controller.submit_profile(&mut session, &form).await?;
    Ok(Json(SessionView::build(&state.controller, &session)))
}

/// POST /api/v1/sessions/:id/answers
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let handle = find_session(&state, id)?;
    let mut session = handle.lock().await;
    let outcome = state
        .controller
        .submit_answer(&mut session, &request.answer)
        .await?;
    Ok(Json(AnswerResponse {
        follow_up_inserted: outcome.follow_up_inserted,
        sentiment: outcome.analysis.sentiment,
        session: SessionView::build(&state.controller, &session),
    }))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    if !state.sessions.reset(&id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    let handle = find_session(&state, id)?;
    let session = handle.lock().await;
    Ok(Json(SessionView::build(&state.controller, &session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}
