//! Local content used when no language model is available.

use crate::domain::{StudyDocument, StudySuggestion, SuggestedMethod};

const MINUTES_PER_DOCUMENT: u32 = 15;
const MIN_SESSION_MINUTES: u32 = 15;
const MAX_SESSION_MINUTES: u32 = 50;

/// Most important documents first; unrated documents last, ties keep input order.
fn by_importance(documents: &[StudyDocument]) -> Vec<&StudyDocument> {
  let mut docs: Vec<&StudyDocument> = documents.iter().collect();
  docs.sort_by(|a, b| b.importance.unwrap_or(0).cmp(&a.importance.unwrap_or(0)));
  docs
}

/// One review session covering every document, in the same shape the model returns.
pub fn fallback_suggestion(documents: &[StudyDocument], event_date: &str) -> StudySuggestion {
  let docs = by_importance(documents);
  let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();

  let title = if names.is_empty() {
    "Review session".to_string()
  } else {
    format!("Review: {}", names.join(", "))
  };

  let mut description = String::from("Learning objectives:\n");
  if names.is_empty() {
    description.push_str("(1) Recall the main ideas covered so far\n");
  }
  for (i, name) in names.iter().enumerate() {
    description.push_str(&format!("({}) Recall and explain the key ideas of {}\n", i + 1, name));
  }
  description.push_str(&format!(
    "\nWork through {} document(s) before {}, most important first. Finish by testing yourself without notes.",
    names.len(),
    event_date
  ));

  let first = names.first().copied().unwrap_or("your notes");
  let minutes = (MINUTES_PER_DOCUMENT * names.len() as u32).clamp(MIN_SESSION_MINUTES, MAX_SESSION_MINUTES);

  StudySuggestion {
    title,
    description,
    suggested_duration: minutes,
    study_methods: vec![
      SuggestedMethod {
        method: "Retrieval Practice".into(),
        application: format!(
          "1. Skim {} and mark the key terms. 2. Close the material and write down everything you remember. 3. Check your answers and re-study what you missed.",
          first
        ),
        rationale: "Pulling information from memory strengthens it more than rereading.".into(),
      },
      SuggestedMethod {
        method: "Summary Creation".into(),
        application: "1. Summarize each document in five bullet points. 2. Connect the summaries into one page.".into(),
        rationale: "Condensing material in your own words exposes what you have not understood.".into(),
      },
    ],
  }
}

/// Markdown outline used in place of a generated summary.
pub fn fallback_material_summary(documents: &[StudyDocument]) -> String {
  let mut out = String::from("# Study Summary\n");
  for doc in documents.iter().filter(|d| d.has_content()) {
    out.push_str(&format!("\n## {}\n\n", doc.name));
    let content = doc.content.as_deref().unwrap_or("");
    for para in content.split("\n\n").map(str::trim).filter(|p| !p.is_empty()).take(5) {
      let first_sentence = para.split_inclusive(|c: char| matches!(c, '.' | '!' | '?')).next().unwrap_or(para).trim();
      out.push_str(&format!("- {}\n", first_sentence));
    }
  }
  out
}
