//! Axum route handlers for the Interview API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::interview::analyzer::analyze_profile;
use crate::interview::models::{AnswerFeedback, AnswerLetter, CandidateProfile, ScoredResult};
use crate::interview::questions::generate_questions;
use crate::interview::session::Phase;
use crate::interview::summary::summarize;
use crate::state::{AppState, InterviewRecord};

/// Multipart field carrying the resume.
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub selected_option: String,
}

/// The question on screen. Never carries the answer key.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    /// 1-based.
    pub number: usize,
    pub text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InterviewView {
    pub id: Uuid,
    pub phase: Phase,
    pub current_question_index: usize,
    pub total_questions: usize,
    pub ready_for_next: bool,
    pub answers: Vec<AnswerLetter>,
    pub profile: Option<CandidateProfile>,
    pub current_question: Option<QuestionView>,
    pub created_at: DateTime<Utc>,
}

impl InterviewView {
    fn new(id: Uuid, record: &InterviewRecord) -> Self {
        let session = &record.session;
        Self {
            id,
            phase: session.phase(),
            current_question_index: session.current_question_index(),
            total_questions: session.questions().len(),
            ready_for_next: session.ready_for_next(),
            answers: session.answers().to_vec(),
            profile: record.profile.clone(),
            current_question: session.current_question().map(|q| QuestionView {
                number: session.current_question_index() + 1,
                text: q.question.clone(),
                options: q.options.to_vec(),
            }),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub feedback: AnswerFeedback,
    pub interview: InterviewView,
}

async fn find(state: &AppState, id: Uuid) -> Result<Arc<Mutex<InterviewRecord>>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Starts a new session in the Upload phase.
pub async fn handle_create(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<InterviewView>), AppError> {
    let (id, record) = state.sessions.create().await;
    info!(
        "Interview {id} created ({} active)",
        state.sessions.active_count().await
    );
    let record = record.lock().await;
    Ok((StatusCode::CREATED, Json(InterviewView::new(id, &record))))
}

/// GET /api/v1/interviews/:id
///
/// Never waits on another action: while one is in flight the read is refused
/// with 409 and the client polls again.
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let record = find(&state, id).await?;
    let record = record.try_lock().map_err(|_| {
        AppError::InvalidState(format!("Interview {id} is busy processing another action"))
    })?;
    Ok(Json(InterviewView::new(id, &record)))
}

/// POST /api/v1/interviews/:id/resume
///
/// Upload pipeline: extract text → analyze profile → generate questions → open interview.
/// Any failure leaves the session in Upload so the candidate can upload again.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<InterviewView>, AppError> {
    let record = find(&state, id).await?;
    let mut record = record.lock().await;
    if record.session.phase() != Phase::Upload {
        return Err(AppError::InvalidState(format!(
            "Resume already processed; interview is in {:?}",
            record.session.phase()
        )));
    }

    let document = read_resume_field(&mut multipart).await?;
    info!("Interview {id}: received resume ({} bytes)", document.len());

    let resume_text = extract_text(state.extractor.clone(), document).await;
    if resume_text.trim().is_empty() {
        return Err(AppError::Extraction(
            "No text could be extracted from the uploaded document".to_string(),
        ));
    }

    let profile = analyze_profile(state.completion.as_ref(), &resume_text).await?;
    let questions = generate_questions(state.completion.as_ref(), &resume_text, &profile).await?;

    record.session.load_questions(questions)?;
    record.profile = Some(profile);
    info!("Interview {id}: questions loaded, interview started");

    Ok(Json(InterviewView::new(id, &record)))
}

/// POST /api/v1/interviews/:id/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let record = find(&state, id).await?;
    let mut record = record.lock().await;

    let feedback = record.session.submit_answer(&request.selected_option)?;
    info!(
        "Interview {id}: question {} answered {} (correct: {})",
        record.session.current_question_index() + 1,
        feedback.selected,
        feedback.is_correct
    );

    Ok(Json(AnswerResponse {
        feedback,
        interview: InterviewView::new(id, &record),
    }))
}

/// POST /api/v1/interviews/:id/advance
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let record = find(&state, id).await?;
    let mut record = record.lock().await;

    if record.session.advance()? == Phase::Summary {
        info!("Interview {id}: all questions answered");
    }
    Ok(Json(InterviewView::new(id, &record)))
}

/// GET /api/v1/interviews/:id/summary
///
/// Scores the interview and asks for the summary once; later calls return the cached result.
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScoredResult>, AppError> {
    let record = find(&state, id).await?;
    let mut record = record.lock().await;

    if let Some(result) = &record.result {
        return Ok(Json(result.clone()));
    }

    let profile = record
        .profile
        .clone()
        .ok_or_else(|| AppError::InvalidState("No candidate profile for this interview".into()))?;
    let result = summarize(state.completion.as_ref(), &record.session, &profile).await?;
    record.result = Some(result.clone());

    Ok(Json(result))
}

/// POST /api/v1/interviews/:id/restart
pub async fn handle_restart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let record = find(&state, id).await?;
    let mut record = record.lock().await;
    record.restart();
    info!("Interview {id}: restarted");
    Ok(Json(InterviewView::new(id, &record)))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Interview {id} not found")));
    }
    info!("Interview {id}: discarded");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Upload helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_resume_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some(RESUME_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read resume upload: {e}")));
        }
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{RESUME_FIELD}'"
    )))
}

/// Runs the extractor on the blocking pool. Failures count as "no text".
async fn extract_text(extractor: Arc<dyn TextExtractor>, document: Bytes) -> String {
    match tokio::task::spawn_blocking(move || extractor.extract(&document)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Text extraction failed: {e}");
            String::new()
        }
        Err(e) => {
            warn!("Text extraction task aborted: {e}");
            String::new()
        }
    }
}
