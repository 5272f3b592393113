//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs sizes and counts, not contents.

use std::sync::Arc;
use axum::{extract::State, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::codec;
use crate::domain::StudyPlan;
use crate::error::AppError;
use crate::logic;
use crate::protocol::*;
use crate::recommend::{self, EventContent};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, openai: state.openai.is_some() })
}

#[instrument(level = "info", skip(plan), fields(objectives = plan.learning_objectives.len(), methods = plan.study_methods.len()))]
pub async fn http_post_encode(Json(plan): Json<StudyPlan>) -> impl IntoResponse {
  Json(DescriptionOut { description: codec::encode(&plan) })
}

#[instrument(level = "info", skip(body), fields(description_len = body.description.len()))]
pub async fn http_post_decode(Json(body): Json<DescriptionIn>) -> impl IntoResponse {
  Json(codec::from_storage(&body.description))
}

#[instrument(level = "info", skip(plan), fields(methods = plan.study_methods.len()))]
pub async fn http_post_storage(Json(plan): Json<StudyPlan>) -> impl IntoResponse {
  Json(StorageOut { stored: codec::to_storage(&plan) })
}

#[instrument(level = "info")]
pub async fn http_get_catalog() -> impl IntoResponse {
  let method_materials = recommend::method_materials()
    .iter()
    .map(|(method, materials)| MethodMaterialsOut { method: *method, materials: *materials })
    .collect();
  Json(CatalogOut { materials: recommend::catalog(), method_materials })
}

#[instrument(level = "info", skip(event), fields(title_len = event.title.len()))]
pub async fn http_post_recommend(Json(event): Json<EventContent>) -> impl IntoResponse {
  let scored = recommend::recommend_for_event(&event);
  let recommended = scored.iter().filter(|m| m.is_recommended).count();
  info!(target: "studyplan", %recommended, "Materials ranked");
  Json(scored)
}

#[instrument(level = "info", skip(state, body), fields(docs = body.documents.as_ref().map_or(0, Vec::len)))]
pub async fn http_post_study_suggestions(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SuggestionsIn>,
) -> Result<Json<SuggestionsOut>, AppError> {
  let suggestions = logic::plan_study_sessions(&state, body.documents, body.event_date).await?;
  info!(target: "studyplan", count = suggestions.len(), "Study suggestions served");
  Ok(Json(SuggestionsOut { suggestions }))
}

#[instrument(level = "info", skip(state, body), fields(docs = body.documents.as_ref().map_or(0, Vec::len)))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<DocumentsIn>,
) -> Result<Json<QuizOut>, AppError> {
  let quiz = logic::generate_quiz(&state, body.documents).await?;
  info!(target: "studyplan", id = %quiz.id, questions = quiz.questions.len(), "Quiz served");
  Ok(Json(QuizOut { quiz }))
}

#[instrument(level = "info", skip(state, body), fields(docs = body.documents.as_ref().map_or(0, Vec::len)))]
pub async fn http_post_study_materials(
  State(state): State<Arc<AppState>>,
  Json(body): Json<MaterialsIn>,
) -> Result<Json<MaterialsOut>, AppError> {
  let (summary, origin) = logic::summarize_materials(&state, body.event_id, body.documents).await?;
  Ok(Json(MaterialsOut { success: true, summary, origin }))
}

#[instrument(level = "info", skip(state, body), fields(docs = body.documents.as_ref().map_or(0, Vec::len)))]
pub async fn http_post_study_summaries(
  State(state): State<Arc<AppState>>,
  Json(body): Json<DocumentsIn>,
) -> Result<Json<SummaryOut>, AppError> {
  let summary = logic::summarize_documents(&state, body.documents).await?;
  Ok(Json(SummaryOut { summary }))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_check_answer(Json(body): Json<CheckAnswerIn>) -> impl IntoResponse {
  let out = logic::check_answer(&body.selected_answer, &body.correct_answer, &body.explanation);
  info!(target: "studyplan", correct = out.is_correct, "Answer checked");
  Json(out)
}
