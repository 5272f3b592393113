//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Study session planning (model first, local plan otherwise) and encoding
//!     each session into its event description
//!   - Quiz and summary generation
//!   - Answer checking

use chrono::{DateTime, NaiveDate};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::codec;
use crate::domain::{Quiz, StudyDocument, StudySuggestion, StudySummary};
use crate::error::AppError;
use crate::protocol::{CheckAnswerOut, Feedback, Origin, PlannedSession};
use crate::seeds::{fallback_material_summary, fallback_suggestion};
use crate::state::AppState;

/// Accept RFC 3339 timestamps or plain `YYYY-MM-DD`; render as "May 2, 2025".
pub fn parse_event_date(raw: &str) -> Result<String, AppError> {
  let raw = raw.trim();
  let date = DateTime::parse_from_rfc3339(raw)
    .map(|dt| dt.date_naive())
    .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
    .map_err(|_| AppError::bad_request(format!("Invalid eventDate: {raw}")))?;
  Ok(date.format("%B %-d, %Y").to_string())
}

fn require_documents(documents: Option<Vec<StudyDocument>>) -> Result<Vec<StudyDocument>, AppError> {
  documents.ok_or_else(|| AppError::bad_request("Invalid request body"))
}

fn to_session(suggestion: StudySuggestion, origin: Origin) -> PlannedSession {
  let plan = codec::plan_from_suggestion(&suggestion);
  PlannedSession {
    id: Uuid::new_v4().to_string(),
    description: codec::encode(&plan),
    title: suggestion.title,
    suggested_duration: suggestion.suggested_duration,
    plan,
    study_methods: suggestion.study_methods,
    origin,
  }
}

/// Plan study sessions for the documents attached to an event.
#[instrument(level = "info", skip(state, documents, event_date))]
pub async fn plan_study_sessions(
  state: &AppState,
  documents: Option<Vec<StudyDocument>>,
  event_date: Option<String>,
) -> Result<Vec<PlannedSession>, AppError> {
  let documents = require_documents(documents)?;
  let event_date = event_date.ok_or_else(|| AppError::bad_request("Invalid request body"))?;
  let date_label = parse_event_date(&event_date)?;

  if let Some(oa) = &state.openai {
    match oa.generate_study_suggestions(&state.prompts, &date_label, &documents).await {
      Ok(suggestions) if !suggestions.is_empty() => {
        let sessions: Vec<PlannedSession> =
          suggestions.into_iter().map(|s| to_session(s, Origin::Openai)).collect();
        info!(target: "studyplan", count = sessions.len(), docs = documents.len(), "Planned sessions via OpenAI");
        return Ok(sessions);
      }
      Ok(_) => warn!(target: "studyplan", "OpenAI returned no suggestions; using local plan."),
      Err(e) => error!(target: "studyplan", error = %e, "OpenAI study plan failed; using local plan."),
    }
  }

  let session = to_session(fallback_suggestion(&documents, &date_label), Origin::Local);
  info!(target: "studyplan", docs = documents.len(), minutes = session.suggested_duration, "Planned local review session");
  Ok(vec![session])
}

#[instrument(level = "info", skip(state, documents))]
pub async fn generate_quiz(state: &AppState, documents: Option<Vec<StudyDocument>>) -> Result<Quiz, AppError> {
  let documents = require_documents(documents)?;
  let oa = state
    .openai
    .as_ref()
    .ok_or_else(|| AppError::unavailable("Quiz generation requires OPENAI_API_KEY"))?;

  let questions = oa.generate_quiz(&state.prompts, &documents).await.map_err(|e| {
    error!(target: "studyplan", error = %e, "OpenAI quiz generation failed");
    AppError::upstream(e)
  })?;
  Ok(Quiz { id: Uuid::new_v4().to_string(), questions })
}

/// Markdown summary of the documents' extracted text.
#[instrument(level = "info", skip(state, event_id, documents), fields(event_id = event_id.as_deref().unwrap_or("")))]
pub async fn summarize_materials(
  state: &AppState,
  event_id: Option<String>,
  documents: Option<Vec<StudyDocument>>,
) -> Result<(String, Origin), AppError> {
  let (Some(_), Some(documents)) = (event_id.as_ref(), documents) else {
    return Err(AppError::bad_request("Missing required fields"));
  };
  if documents.is_empty() {
    return Err(AppError::bad_request("No documents provided for summarization"));
  }
  let valid: Vec<&str> = documents
    .iter()
    .filter(|d| d.has_content())
    .filter_map(|d| d.content.as_deref())
    .collect();
  if valid.is_empty() {
    return Err(AppError::bad_request("No valid document content found"));
  }

  if let Some(oa) = &state.openai {
    match oa.summarize_materials(&state.prompts, &valid).await {
      Ok(summary) => return Ok((summary, Origin::Openai)),
      Err(e) => error!(target: "studyplan", error = %e, "OpenAI summary failed; using local outline."),
    }
  }
  Ok((fallback_material_summary(&documents), Origin::Local))
}

#[instrument(level = "info", skip(state, documents))]
pub async fn summarize_documents(
  state: &AppState,
  documents: Option<Vec<StudyDocument>>,
) -> Result<StudySummary, AppError> {
  let documents = require_documents(documents)?;
  if documents.is_empty() {
    return Err(AppError::bad_request("No documents provided for summarization"));
  }
  let oa = state
    .openai
    .as_ref()
    .ok_or_else(|| AppError::unavailable("Study summaries require OPENAI_API_KEY"))?;
  oa.summarize_documents(&state.prompts, &documents).await.map_err(|e| {
    error!(target: "studyplan", error = %e, "OpenAI study summary failed");
    AppError::upstream(e)
  })
}

/// Exact comparison; the explanation is only revealed on a correct answer.
pub fn check_answer(selected: &str, correct: &str, explanation: &str) -> CheckAnswerOut {
  let is_correct = selected == correct;
  let feedback = if is_correct {
    Feedback { message: "Correct!".into(), explanation: Some(explanation.to_string()) }
  } else {
    Feedback { message: "Try again".into(), explanation: None }
  };
  CheckAnswerOut { is_correct, feedback }
}
