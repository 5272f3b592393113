//! Public HTTP request/response structs (serde ready).
//! Field names are camelCase to match the study planner frontend.

use serde::{Deserialize, Serialize};

use crate::domain::{Quiz, StudyDocument, StudyPlan, StudySummary, SuggestedMethod};
use crate::recommend::{MaterialOption, MaterialType};

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub openai: bool,
}

//
// Study plan codec
//

#[derive(Serialize)]
pub struct DescriptionOut {
    pub description: String,
}

#[derive(Deserialize)]
pub struct DescriptionIn {
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize)]
pub struct StorageOut {
    pub stored: String,
}

//
// Material recommendation
//

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMaterialsOut {
    pub method: &'static str,
    pub materials: [MaterialType; 2],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOut {
    pub materials: &'static [MaterialOption],
    pub method_materials: Vec<MethodMaterialsOut>,
}

//
// Generation
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsIn {
    #[serde(default)]
    pub documents: Option<Vec<StudyDocument>>,
    #[serde(default)]
    pub event_date: Option<String>,
}

/// Where a generated artefact came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Openai,
    Local,
}

/// A suggested study session, ready to be stored against a calendar event:
/// `description` is the encoded plan text, `plan` its structured form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedSession {
    pub id: String,
    pub title: String,
    pub suggested_duration: u32,
    pub description: String,
    pub plan: StudyPlan,
    pub study_methods: Vec<SuggestedMethod>,
    pub origin: Origin,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsOut {
    pub suggestions: Vec<PlannedSession>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentsIn {
    #[serde(default)]
    pub documents: Option<Vec<StudyDocument>>,
}

#[derive(Serialize)]
pub struct QuizOut {
    pub quiz: Quiz,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsIn {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub documents: Option<Vec<StudyDocument>>,
}

#[derive(Serialize)]
pub struct MaterialsOut {
    pub success: bool,
    pub summary: String,
    pub origin: Origin,
}

#[derive(Serialize)]
pub struct SummaryOut {
    pub summary: StudySummary,
}

//
// Answer checking
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerIn {
    pub selected_answer: String,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub message: String,
    pub explanation: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerOut {
    pub is_correct: bool,
    pub feedback: Feedback,
}
