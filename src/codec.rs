//! Study plan <-> description text.
//!
//! A calendar event stores its study plan in a single free-text `description`
//! column. The text layout is:
//!
//! ```text
//! Learning objectives:
//! (1) Define the Tenth Amendment
//! (2) Compare state vs federal power
//!
//! Key topics include the Tenth Amendment and Commerce Clause.
//!
//! Study Methods:
//! Elaboration
//! Step-by-Step Application:
//! • Draw a comparison chart
//! • Add real-world examples
//!
//! Why This Method Works:
//! Connects new facts to prior knowledge.
//! ---
//! Self-Testing
//! ...
//! ```
//!
//! `decode` is total: text from older writers or hand-edited events degrades to
//! empty lists and a plain overview instead of failing.
//!
//! The marker text cannot carry content that contains the markers themselves,
//! so [`to_storage`] / [`from_storage`] offer a JSON envelope for persistence.
//! `from_storage` still reads plain marker text written before the envelope existed.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{StudyMethod, StudyPlan, StudySuggestion};

pub const OBJECTIVES_MARKER: &str = "Learning objectives:";
pub const METHODS_MARKER: &str = "Study Methods:";
pub const APPLICATION_MARKER: &str = "Step-by-Step Application:";
pub const RATIONALE_MARKER: &str = "Why This Method Works:";
pub const METHOD_SEPARATOR: &str = "---";
pub const BULLET: char = '•';

const STORAGE_FORMAT: &str = "study_plan.v1";

fn objective_index_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\(\d+\)").expect("objective index pattern is valid"))
}

fn step_number_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\d+\.").expect("step number pattern is valid"))
}

// -------- Encoding --------

/// Render a plan as description text. The title is not part of the text.
pub fn encode(plan: &StudyPlan) -> String {
  let mut out = String::new();
  out.push_str(OBJECTIVES_MARKER);
  out.push('\n');
  for (i, objective) in plan.learning_objectives.iter().enumerate() {
    let _ = writeln!(out, "({}) {}", i + 1, objective);
  }
  out.push('\n');
  out.push_str(&plan.overview);

  if !plan.study_methods.is_empty() {
    out.push_str("\n\n");
    out.push_str(METHODS_MARKER);
    out.push('\n');
    let blocks: Vec<String> = plan.study_methods.iter().map(encode_method).collect();
    out.push_str(&blocks.join(&format!("{METHOD_SEPARATOR}\n")));
  }
  out
}

fn encode_method(method: &StudyMethod) -> String {
  let mut block = String::new();
  let _ = writeln!(block, "{}", method.name);
  let _ = writeln!(block, "{APPLICATION_MARKER}");
  for step in &method.steps {
    let _ = writeln!(block, "{BULLET} {step}");
  }
  block.push('\n');
  let _ = writeln!(block, "{RATIONALE_MARKER}");
  let _ = writeln!(block, "{}", method.rationale);
  block
}

// -------- Decoding --------

/// Parse description text back into a plan. Never fails; the title is left empty.
/// CRLF line endings (browser textareas) are read as LF.
pub fn decode(text: &str) -> StudyPlan {
  let text = text.replace("\r\n", "\n");
  let text = text.as_str();
  let (head, methods_part) = match text.split_once(METHODS_MARKER) {
    Some((head, rest)) => (head, Some(rest)),
    None => (text, None),
  };

  let (learning_objectives, overview) = match head.split_once(OBJECTIVES_MARKER) {
    Some((_, after)) => {
      let (block, rest) = after.split_once("\n\n").unwrap_or((after, ""));
      (split_objectives(block), rest.trim().to_string())
    }
    None => (Vec::new(), head.trim().to_string()),
  };

  let study_methods = methods_part.map(decode_methods).unwrap_or_default();

  debug!(
    target: "studyplan",
    objectives = learning_objectives.len(),
    methods = study_methods.len(),
    overview_len = overview.len(),
    "Decoded study plan description"
  );

  StudyPlan { title: String::new(), learning_objectives, overview, study_methods }
}

fn split_objectives(block: &str) -> Vec<String> {
  objective_index_re()
    .split(block)
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}

fn decode_methods(section: &str) -> Vec<StudyMethod> {
  let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
  for line in section.lines() {
    if line.trim() == METHOD_SEPARATOR {
      chunks.push(Vec::new());
    } else if let Some(current) = chunks.last_mut() {
      current.push(line);
    }
  }
  chunks.iter().filter_map(|lines| decode_method(lines)).collect()
}

fn decode_method(lines: &[&str]) -> Option<StudyMethod> {
  // Leading blank lines come from writers that put "\n" before each method name.
  let start = lines.iter().position(|l| !l.trim().is_empty())?;
  let name = lines[start].trim().to_string();
  let details = &lines[start + 1..];

  let application_at = details.iter().position(|l| l.trim() == APPLICATION_MARKER);
  let rationale_at = details.iter().position(|l| l.trim() == RATIONALE_MARKER);

  let steps_from = application_at.map_or(0, |i| i + 1);
  let steps_to = rationale_at.unwrap_or(details.len()).max(steps_from);
  let steps: Vec<String> = details[steps_from..steps_to]
    .iter()
    .filter_map(|l| strip_bullet(l))
    .collect();

  let rationale = rationale_at
    .map(|i| details[i + 1..].join("\n").trim().to_string())
    .unwrap_or_default();

  if name.is_empty() || steps.is_empty() {
    return None;
  }
  Some(StudyMethod { name, steps, rationale })
}

/// Strip the bullet by char prefix; the bullet is multi-byte in UTF-8.
fn strip_bullet(line: &str) -> Option<String> {
  let step = line.trim().strip_prefix(BULLET)?.trim();
  if step.is_empty() { None } else { Some(step.to_string()) }
}

// -------- Generator output --------

/// Split a numbered application string ("1. Draw X. 2. Fill Y.") into steps.
pub fn split_numbered_steps(application: &str) -> Vec<String> {
  step_number_re()
    .split(application)
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}

/// Convert a generated suggestion into a plan. The suggestion description
/// already carries the objectives block and the overview.
pub fn plan_from_suggestion(suggestion: &StudySuggestion) -> StudyPlan {
  let parsed = decode(&suggestion.description);
  let study_methods = suggestion
    .study_methods
    .iter()
    .map(|m| StudyMethod {
      name: m.method.trim().to_string(),
      steps: split_numbered_steps(&m.application),
      rationale: m.rationale.trim().to_string(),
    })
    .collect();

  StudyPlan {
    title: suggestion.title.clone(),
    learning_objectives: parsed.learning_objectives,
    overview: parsed.overview,
    study_methods,
  }
}

// -------- Storage envelope --------

#[derive(Serialize)]
struct StoredPlanRef<'a> {
  format: &'a str,
  plan: &'a StudyPlan,
}

#[derive(Deserialize)]
struct StoredPlan {
  format: String,
  plan: StudyPlan,
}

/// Serialize a plan (title included) into the JSON storage envelope.
pub fn to_storage(plan: &StudyPlan) -> String {
  serde_json::to_string(&StoredPlanRef { format: STORAGE_FORMAT, plan })
    .unwrap_or_else(|_| encode(plan))
}

/// Read a stored description: the JSON envelope when present, marker text otherwise.
pub fn from_storage(text: &str) -> StudyPlan {
  if text.trim_start().starts_with('{') {
    match serde_json::from_str::<StoredPlan>(text) {
      Ok(stored) if stored.format == STORAGE_FORMAT => return stored.plan,
      Ok(stored) => debug!(target: "studyplan", format = %stored.format, "Unknown storage format; decoding as text"),
      Err(e) => debug!(target: "studyplan", error = %e, "Description is not a storage envelope; decoding as text"),
    }
  }
  decode(text)
}
