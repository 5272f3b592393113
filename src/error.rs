//! Error types: model-call failures and the JSON error response returned by handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

/// Failures talking to the chat-completions API.
#[derive(Debug, Error)]
pub enum LlmError {
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("OpenAI HTTP {status}: {message}")]
  Status { status: reqwest::StatusCode, message: String },

  #[error("JSON parse error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("model returned no content")]
  EmptyResponse,

  #[error("model response missing `{0}` array")]
  MissingField(&'static str),
}

/// Handler error rendered as `{ "error": message }` with the given status.
#[derive(Debug)]
pub struct AppError {
  pub status: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn bad_request(msg: impl Into<String>) -> Self {
    Self { status: StatusCode::BAD_REQUEST, message: msg.into() }
  }

  /// No language model is configured for an operation that has no local fallback.
  pub fn unavailable(msg: impl Into<String>) -> Self {
    Self { status: StatusCode::SERVICE_UNAVAILABLE, message: msg.into() }
  }

  pub fn upstream(err: LlmError) -> Self {
    Self { status: StatusCode::BAD_GATEWAY, message: err.to_string() }
  }
}

impl From<LlmError> for AppError {
  fn from(err: LlmError) -> Self {
    Self::upstream(err)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> axum::response::Response {
    let body = serde_json::json!({ "error": self.message });
    (self.status, Json(body)).into_response()
  }
}
