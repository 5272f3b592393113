//! Loading prompt configuration from TOML.
//!
//! `STUDY_CONFIG_PATH` may point at a file with a `[prompts]` table; any prompt
//! left out keeps its default.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct StudyConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts sent to the chat-completions API.
/// Templates use `{key}` placeholders filled by `util::fill_template`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  // Study plan generation ({event_date}, {documents})
  pub study_plan_system: String,
  pub study_plan_user_template: String,
  // Quiz generation ({documents})
  pub quiz_system: String,
  pub quiz_user_template: String,
  // Markdown study material ({content})
  pub material_summary_system: String,
  pub material_summary_user_template: String,
  // Structured multi-document summary ({documents})
  pub study_summary_system: String,
  pub study_summary_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      study_plan_system: DEFAULT_STUDY_PLAN_SYSTEM.into(),
      study_plan_user_template: DEFAULT_STUDY_PLAN_USER.into(),
      quiz_system: DEFAULT_QUIZ_SYSTEM.into(),
      quiz_user_template: DEFAULT_QUIZ_USER.into(),
      material_summary_system: "You are an expert study material generator. Create a comprehensive and well-structured study summary.".into(),
      material_summary_user_template: "Create a comprehensive study summary that includes:\n1. Main concepts and key points\n2. Important definitions and terminology\n3. Examples and applications\n4. Key takeaways\n\nFormat the summary in markdown with clear headings and bullet points.\n\nContent to summarize:\n{content}".into(),
      study_summary_system: "You are an expert study guide creator, skilled at combining and summarizing educational materials into clear, comprehensive study guides.".into(),
      study_summary_user_template: DEFAULT_STUDY_SUMMARY_USER.into(),
    }
  }
}

const DEFAULT_STUDY_PLAN_SYSTEM: &str = r#"You are a study planning assistant that creates efficient and comprehensive study events based on cognitive science research.
Break the materials into logical chunks, but combine related concepts that can be studied together.
Respond ONLY with a JSON object with a 'suggestions' array. Each suggestion has exactly these fields:
- title: string (specific and actionable)
- description: string that MUST start with:
  Learning objectives:
  (1) [first measurable objective]
  (2) [second measurable objective]
  followed by a blank line and an overview of key topics, connections to prior knowledge, importance and expected outcomes.
- suggestedDuration: number (minutes)
- studyMethods: array of { method: string, application: string (numbered steps "1. ... 2. ..."), rationale: string }

Prefer these evidence-based methods: Retrieval Practice, Spaced Practice, Interleaved Practice, Elaboration, Dual Coding, Concrete Examples, Self-Testing, Summary Creation.
Do not use the lines "Study Methods:" or "---" inside any description."#;

const DEFAULT_STUDY_PLAN_USER: &str = r#"Create an efficient study plan for an event on {event_date}.
Cover all materials while incorporating evidence-based learning strategies.

Available study materials:
{documents}

Allocate time by content volume, complexity and importance:
- 15-30 minutes for smaller/simpler content
- 30-50 minutes for larger/complex content
Each session needs clear learning objectives, the topics to cover, study methods tailored to the content, and self-testing opportunities."#;

const DEFAULT_QUIZ_SYSTEM: &str = r#"You are a quiz generation assistant that creates high-quality practice questions based on study materials.
Respond ONLY with a JSON object with a 'questions' array. Each question has exactly these fields:
- text: string
- choices: array of { text: string, isCorrect: boolean, explanation: string }
- topic: string
- difficulty: "easy" | "medium" | "hard"
- learningObjective: string
Mix recall, application and analysis questions. Make every choice plausible and explain both correct and incorrect answers."#;

const DEFAULT_QUIZ_USER: &str = r#"Create a practice quiz based on these study materials:

{documents}

Requirements:
1. Generate 5-10 questions covering the key concepts
2. Include a mix of difficulties
3. Focus on the most important concepts (based on importance ratings)
4. Include detailed explanations for all answer choices"#;

const DEFAULT_STUDY_SUMMARY_USER: &str = r#"Create a comprehensive study summary by analyzing and combining the following documents:

{documents}

Respond with a JSON object:
{"title": string, "summary_content": string, "key_concepts": [string], "learning_objectives": [string], "practice_questions": [{"question": string, "answer": string}]}"#;

/// Attempt to load `StudyConfig` from STUDY_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_study_config_from_env() -> Option<StudyConfig> {
  let path = std::env::var("STUDY_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_study_config(&s) {
      Ok(cfg) => {
        info!(target: "studyplan_backend", %path, "Loaded study config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "studyplan_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "studyplan_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse_study_config(s: &str) -> Result<StudyConfig, toml::de::Error> {
  toml::from_str::<StudyConfig>(s)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_prompts_keep_defaults() {
    let cfg = parse_study_config(
      r#"
[prompts]
quiz_system = "Only three questions."
"#,
    )
    .expect("valid toml");
    assert_eq!(cfg.prompts.quiz_system, "Only three questions.");
    assert_eq!(cfg.prompts.study_plan_system, Prompts::default().study_plan_system);
  }

  #[test]
  fn empty_file_is_all_defaults() {
    let cfg = parse_study_config("").expect("empty toml is valid");
    assert!(cfg.prompts.study_plan_user_template.contains("{documents}"));
    assert!(cfg.prompts.material_summary_user_template.contains("{content}"));
  }

  #[test]
  fn wrong_types_are_rejected() {
    assert!(parse_study_config("[prompts]\nquiz_system = 3\n").is_err());
  }
}
