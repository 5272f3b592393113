//! Application state: prompts and the optional OpenAI client.
//!
//! Built once at startup and shared with every handler through Axum `State`.
//! Nothing here is mutable; the codec and scorer are pure and all persistence
//! lives with the calendar backend.

use tracing::{info, instrument};

use crate::config::{load_study_config_from_env, Prompts};
use crate::openai::OpenAI;

#[derive(Clone)]
pub struct AppState {
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load prompt config, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_study_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "studyplan_backend", base_url = %oa.base_url, fast_model = %oa.fast_model, strong_model = %oa.strong_model, "OpenAI enabled.");
        } else {
            info!(target: "studyplan_backend", "OpenAI disabled (no OPENAI_API_KEY). Using local fallbacks where available.");
        }

        Self::with_parts(prompts, openai)
    }

    pub fn with_parts(prompts: Prompts, openai: Option<OpenAI>) -> Self {
        Self { openai, prompts }
    }

    /// State with default prompts and no model client.
    pub fn offline() -> Self {
        Self::with_parts(Prompts::default(), None)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
