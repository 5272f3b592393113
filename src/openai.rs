//! Minimal OpenAI client for our use-cases.
//!
//! We only call chat.completions and request either plain text or a strict JSON object.
//! Calls are instrumented and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key, and document text is never logged.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::domain::{QuizChoice, QuizQuestion, StudyDocument, StudySuggestion, StudySummary, SuggestedMethod};
use crate::error::LlmError;
use crate::util::{documents_context, fill_template, trunc_for_log};

const DEFAULT_SESSION_MINUTES: u32 = 30;
const DEFAULT_DIFFICULTY: &str = "medium";

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub fast_model: String,
  pub strong_model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let fast_model =
      std::env::var("OPENAI_FAST_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let strong_model =
      std::env::var("OPENAI_STRONG_MODEL").unwrap_or_else(|_| "gpt-4o".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, fast_model, strong_model })
  }

  async fn chat(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
    json: bool,
  ) -> Result<String, LlmError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: json.then(|| ResponseFormat { r#type: "json_object".into() }),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "studyplan-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      error!(%status, %message, "OpenAI request rejected");
      return Err(LlmError::Status { status, message });
    }

    let body: ChatCompletionResponse = res.json().await?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default();
    if text.trim().is_empty() {
      return Err(LlmError::EmptyResponse);
    }
    Ok(text)
  }

  /// Plain-text chat completion.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_plain(&self, model: &str, system: &str, user: &str, temperature: f32) -> Result<String, LlmError> {
    Ok(self.chat(model, system, user, temperature, false).await?.trim().to_string())
  }

  /// JSON-object chat completion. Generic over the target type T.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_json<T: for<'a> Deserialize<'a>>(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<T, LlmError> {
    let text = self.chat(model, system, user, temperature, true).await?;
    Ok(serde_json::from_str::<T>(&text)?)
  }

  // --- High-level helpers (domain-specialized) ---

  /// Ask the model for study sessions covering `documents` before `event_date`.
  #[instrument(level = "info", skip(self, prompts, event_date, documents), fields(%event_date, docs = documents.len(), model = %self.strong_model))]
  pub async fn generate_study_suggestions(
    &self,
    prompts: &Prompts,
    event_date: &str,
    documents: &[StudyDocument],
  ) -> Result<Vec<StudySuggestion>, LlmError> {
    let context = documents_context(documents);
    let user = fill_template(
      &prompts.study_plan_user_template,
      &[("event_date", event_date), ("documents", context.as_str())],
    );
    let start = Instant::now();
    let result = self.chat_json::<SuggestionsEnvelope>(&self.strong_model, &prompts.study_plan_system, &user, 0.7).await;
    let elapsed = start.elapsed();

    let envelope = match result {
      Ok(env) => env,
      Err(e) => {
        error!(?elapsed, error = %e, "Model call failed during study plan generation");
        return Err(e);
      }
    };
    let suggestions: Vec<StudySuggestion> = envelope
      .suggestions
      .ok_or(LlmError::MissingField("suggestions"))?
      .into_iter()
      .map(RawSuggestion::normalize)
      .collect();
    info!(?elapsed, count = suggestions.len(), "Study suggestions generated");
    Ok(suggestions)
  }

  #[instrument(level = "info", skip(self, prompts, documents), fields(docs = documents.len(), model = %self.strong_model))]
  pub async fn generate_quiz(
    &self,
    prompts: &Prompts,
    documents: &[StudyDocument],
  ) -> Result<Vec<QuizQuestion>, LlmError> {
    let context = documents_context(documents);
    let user = fill_template(&prompts.quiz_user_template, &[("documents", context.as_str())]);
    let env: QuizEnvelope = self.chat_json(&self.strong_model, &prompts.quiz_system, &user, 0.7).await?;
    let questions: Vec<QuizQuestion> = env
      .questions
      .ok_or(LlmError::MissingField("questions"))?
      .into_iter()
      .map(RawQuestion::normalize)
      .collect();
    info!(count = questions.len(), "Quiz generated");
    Ok(questions)
  }

  /// Markdown study summary of raw document contents.
  #[instrument(level = "info", skip(self, prompts, contents), fields(parts = contents.len(), model = %self.fast_model))]
  pub async fn summarize_materials(&self, prompts: &Prompts, contents: &[&str]) -> Result<String, LlmError> {
    let content = contents.join("\n\n");
    let user = fill_template(&prompts.material_summary_user_template, &[("content", content.as_str())]);
    self.chat_plain(&self.fast_model, &prompts.material_summary_system, &user, 0.3).await
  }

  /// Structured summary combining several analysed documents.
  #[instrument(level = "info", skip(self, prompts, documents), fields(docs = documents.len(), model = %self.strong_model))]
  pub async fn summarize_documents(
    &self,
    prompts: &Prompts,
    documents: &[StudyDocument],
  ) -> Result<StudySummary, LlmError> {
    let context = documents
      .iter()
      .map(|doc| {
        let content = doc.content.as_deref().filter(|c| !c.trim().is_empty()).unwrap_or("No content analysis available");
        format!("Document: {}\nContent: {}\n---", doc.name, content)
      })
      .collect::<Vec<_>>()
      .join("\n\n");
    let user = fill_template(&prompts.study_summary_user_template, &[("documents", context.as_str())]);
    self.chat_json(&self.strong_model, &prompts.study_summary_system, &user, 0.5).await
  }
}

// --- Model output DTOs ---
//
// Everything the model returns is read loosely: a missing, null or mistyped
// field becomes its default instead of failing the whole response.

#[derive(Deserialize)]
struct SuggestionsEnvelope {
  #[serde(default)]
  suggestions: Option<Vec<RawSuggestion>>,
}

#[derive(Deserialize)]
struct QuizEnvelope {
  #[serde(default)]
  questions: Option<Vec<RawQuestion>>,
}

/// Suggestion exactly as the model returns it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSuggestion {
  #[serde(default)] title: Option<serde_json::Value>,
  #[serde(default)] description: Option<serde_json::Value>,
  #[serde(default)] suggested_duration: Option<serde_json::Value>,
  #[serde(default)] study_methods: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawQuestion {
  #[serde(default)] text: Option<serde_json::Value>,
  #[serde(default)] choices: Option<serde_json::Value>,
  #[serde(default)] topic: Option<serde_json::Value>,
  #[serde(default)] difficulty: Option<serde_json::Value>,
  #[serde(default)] learning_objective: Option<serde_json::Value>,
}

fn value_string(v: Option<serde_json::Value>) -> String {
  match v {
    Some(serde_json::Value::String(s)) => s,
    Some(serde_json::Value::Null) | None => String::new(),
    Some(other) => other.to_string(),
  }
}

/// Array elements, or nothing when the value is not an array.
fn value_items(v: Option<serde_json::Value>) -> Vec<serde_json::Value> {
  match v {
    Some(serde_json::Value::Array(items)) => items,
    _ => Vec::new(),
  }
}

/// Named field of an object element; `None` for anything else.
fn field(item: &mut serde_json::Value, key: &str) -> Option<serde_json::Value> {
  item.as_object_mut().and_then(|o| o.remove(key))
}

fn value_bool(v: Option<serde_json::Value>) -> bool {
  match v {
    Some(serde_json::Value::Bool(b)) => b,
    Some(serde_json::Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
    _ => false,
  }
}

fn value_minutes(v: Option<&serde_json::Value>) -> u32 {
  let minutes = match v {
    Some(serde_json::Value::Number(n)) => n.as_f64(),
    Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  match minutes {
    Some(m) if m.is_finite() && m >= 1.0 => m.round().min(f64::from(u32::MAX)) as u32,
    _ => DEFAULT_SESSION_MINUTES,
  }
}

impl RawSuggestion {
  pub(crate) fn normalize(self) -> StudySuggestion {
    StudySuggestion {
      suggested_duration: value_minutes(self.suggested_duration.as_ref()),
      title: value_string(self.title),
      description: value_string(self.description),
      study_methods: value_items(self.study_methods)
        .into_iter()
        .map(|mut m| SuggestedMethod {
          method: value_string(field(&mut m, "method")),
          application: value_string(field(&mut m, "application")),
          rationale: value_string(field(&mut m, "rationale")),
        })
        .collect(),
    }
  }
}

impl RawQuestion {
  pub(crate) fn normalize(self) -> QuizQuestion {
    let difficulty = value_string(self.difficulty);
    QuizQuestion {
      text: value_string(self.text),
      choices: value_items(self.choices)
        .into_iter()
        .map(|mut c| QuizChoice {
          text: value_string(field(&mut c, "text")),
          is_correct: value_bool(field(&mut c, "isCorrect")),
          explanation: value_string(field(&mut c, "explanation")),
        })
        .collect(),
      topic: value_string(self.topic),
      difficulty: if difficulty.trim().is_empty() { DEFAULT_DIFFICULTY.to_string() } else { difficulty },
      learning_objective: value_string(self.learning_objective),
    }
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
