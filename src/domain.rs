//! Domain models: study plans, study methods, generated suggestions, quizzes and documents.

use serde::{Deserialize, Serialize};

/// Structured study plan. The persisted form is the flattened description text
/// produced by [`crate::codec::encode`]; the title is stored separately.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
  #[serde(default)] pub title: String,
  #[serde(default)] pub learning_objectives: Vec<String>,
  #[serde(default)] pub overview: String,
  #[serde(default)] pub study_methods: Vec<StudyMethod>,
}

impl StudyPlan {
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyMethod {
  pub name: String,
  #[serde(default)] pub steps: Vec<String>,
  #[serde(default)] pub rationale: String,
}

/// Study method as the plan generator returns it: `application` is a numbered
/// sentence string ("1. Do X. 2. Do Y.") rather than a list of steps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SuggestedMethod {
  #[serde(default)] pub method: String,
  #[serde(default)] pub application: String,
  #[serde(default)] pub rationale: String,
}

/// One study session proposed by the plan generator.
/// `description` starts with the "Learning objectives:" block followed by the overview.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySuggestion {
  #[serde(default)] pub title: String,
  #[serde(default)] pub description: String,
  #[serde(default)] pub suggested_duration: u32, // minutes
  #[serde(default)] pub study_methods: Vec<SuggestedMethod>,
}

/// A document the student attached to an event.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDocument {
  #[serde(default)] pub id: Option<String>,
  pub name: String,
  #[serde(default)] pub importance: Option<u8>, // 1..=5
  #[serde(default)] pub notes: Option<String>,
  /// Extracted text, when the document has been analysed.
  #[serde(default, alias = "content_text", alias = "contentText")] pub content: Option<String>,
}

impl StudyDocument {
  pub fn has_content(&self) -> bool {
    self.content.as_deref().is_some_and(|c| !c.trim().is_empty())
  }
}

/// Quiz types are built from model output by `openai::RawQuestion::normalize`.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizChoice {
  pub text: String,
  pub is_correct: bool,
  pub explanation: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub text: String,
  pub choices: Vec<QuizChoice>,
  pub topic: String,
  pub difficulty: String, // "easy" | "medium" | "hard"
  pub learning_objective: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Quiz {
  pub id: String,
  pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PracticeQuestion {
  #[serde(default)] pub question: String,
  #[serde(default)] pub answer: String,
}

/// Structured study summary combining several documents.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySummary {
  #[serde(default)] pub title: String,
  #[serde(default, alias = "summary_content")] pub summary_content: String,
  #[serde(default, alias = "key_concepts")] pub key_concepts: Vec<String>,
  #[serde(default, alias = "learning_objectives")] pub learning_objectives: Vec<String>,
  #[serde(default, alias = "practice_questions")] pub practice_questions: Vec<PracticeQuestion>,
}
