//! Ranking of study-material types for a calendar event.
//!
//! Each of the five material types is scored against the event text and the
//! study methods decoded from its description. Method matches outweigh keyword
//! coincidences: a type is only recommended when it is in the top two and either
//! a study method asked for it or its score is above 5.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::codec;
use crate::domain::StudyMethod;

const METHOD_SCORE: u32 = 5;
const CONTENT_TYPE_SCORE: u32 = 2;
const SUITABLE_FOR_SCORE: u32 = 1;
const BONUS_SCORE: u32 = 3;
const RECOMMEND_TOP: usize = 2;
const CONTENT_ONLY_THRESHOLD: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
  Summary,
  Flashcards,
  Quiz,
  Notes,
  Mindmap,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFor {
  pub content_types: &'static [&'static str],
  pub reason: &'static str,
}

/// Static catalog entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialOption {
  pub material_type: MaterialType,
  pub title: &'static str,
  pub description: &'static str,
  pub suitable_for: &'static [&'static str],
  pub recommended_for: RecommendedFor,
}

static CATALOG: [MaterialOption; 5] = [
  MaterialOption {
    material_type: MaterialType::Summary,
    title: "Study Summary",
    description: "Condensed overview with key points and examples",
    suitable_for: &["Review", "Main Points", "Key Ideas"],
    recommended_for: RecommendedFor {
      content_types: &["overview", "review", "main points", "key ideas"],
      reason: "Excellent for final review and consolidation",
    },
  },
  MaterialOption {
    material_type: MaterialType::Flashcards,
    title: "Flashcards",
    description: "Interactive flashcards for active recall and spaced repetition",
    suitable_for: &["Key Terms", "Definitions", "Concepts", "Facts"],
    recommended_for: RecommendedFor {
      content_types: &["definitions", "concepts", "terms", "facts"],
      reason: "Great for memorizing key terms and concepts",
    },
  },
  MaterialOption {
    material_type: MaterialType::Quiz,
    title: "Practice Quiz",
    description: "Self-assessment questions to test understanding",
    suitable_for: &["Understanding Check", "Application", "Critical Thinking"],
    recommended_for: RecommendedFor {
      content_types: &["analysis", "application", "examples", "case studies"],
      reason: "Ideal for testing deep understanding and application",
    },
  },
  MaterialOption {
    material_type: MaterialType::Notes,
    title: "Smart Notes",
    description: "Structured notes with key concepts and examples",
    suitable_for: &["Complex Topics", "Processes", "Methods", "Steps"],
    recommended_for: RecommendedFor {
      content_types: &["processes", "methods", "steps", "procedures"],
      reason: "Best for organizing complex information and procedures",
    },
  },
  MaterialOption {
    material_type: MaterialType::Mindmap,
    title: "Mind Map",
    description: "Visual representation of concepts and relationships",
    suitable_for: &["Relationships", "Connections", "Big Picture"],
    recommended_for: RecommendedFor {
      content_types: &["relationships", "connections", "systems", "hierarchies"],
      reason: "Perfect for visualizing connections between concepts",
    },
  },
];

use MaterialType::*;

/// Known study-method names and the two materials that best support each.
static METHOD_MATERIALS: [(&str, [MaterialType; 2]); 9] = [
  ("Retrieval Practice", [Flashcards, Quiz]),
  ("Active Recall", [Flashcards, Quiz]),
  ("Spaced Practice", [Flashcards, Quiz]),
  ("Interleaved Practice", [Quiz, Notes]),
  ("Elaboration", [Notes, Mindmap]),
  ("Dual Coding", [Mindmap, Notes]),
  ("Concrete Examples", [Notes, Quiz]),
  ("Self-Testing", [Quiz, Flashcards]),
  ("Summary Creation", [Summary, Mindmap]),
];

/// The five material types in declaration order (ties keep this order).
pub fn catalog() -> &'static [MaterialOption] {
  &CATALOG
}

pub fn method_materials() -> &'static [(&'static str, [MaterialType; 2])] {
  &METHOD_MATERIALS
}

/// Event fields the scorer reads.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContent {
  pub title: String,
  #[serde(default)] pub description: Option<String>,
  #[serde(default)] pub subject_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMaterial {
  pub material_type: MaterialType,
  pub title: String,
  pub description: String,
  pub suitable_for: Vec<String>,
  pub score: u32,
  pub reason: String,
  pub is_recommended: bool,
}

/// Title, description and subject joined with spaces, lower-cased.
pub fn content_text(event: &EventContent) -> String {
  let mut parts: Vec<&str> = vec![event.title.as_str()];
  parts.push(event.description.as_deref().unwrap_or(""));
  if let Some(subject) = event.subject_name.as_deref() {
    parts.push(subject);
  }
  parts.join(" ").to_lowercase()
}

fn method_supports(method: &StudyMethod, material: MaterialType) -> bool {
  let name = method.name.to_lowercase();
  METHOD_MATERIALS
    .iter()
    .any(|(key, materials)| materials.contains(&material) && name.contains(&key.to_lowercase()))
}

/// Score and rank every material type. `content_text` is expected lower-cased.
#[instrument(level = "debug", skip_all, fields(content_len = content_text.len(), methods = methods.len()))]
pub fn score_materials(content_text: &str, methods: &[StudyMethod]) -> Vec<ScoredMaterial> {
  let mut scored: Vec<(ScoredMaterial, bool)> = CATALOG
    .iter()
    .map(|option| score_option(option, content_text, methods))
    .collect();

  // Vec::sort_by is stable: ties keep catalog order.
  scored.sort_by(|(a, _), (b, _)| b.score.cmp(&a.score));

  scored
    .into_iter()
    .enumerate()
    .map(|(rank, (mut material, method_based))| {
      material.is_recommended =
        rank < RECOMMEND_TOP && (method_based || material.score > CONTENT_ONLY_THRESHOLD);
      debug!(target: "studyplan", material = ?material.material_type, score = material.score, rank, recommended = material.is_recommended, "Scored material");
      material
    })
    .collect()
}

fn score_option(option: &MaterialOption, content_text: &str, methods: &[StudyMethod]) -> (ScoredMaterial, bool) {
  let mut score = 0;
  let mut reason: Option<String> = None;

  let relevant: Vec<&str> = methods
    .iter()
    .filter(|m| method_supports(m, option.material_type))
    .map(|m| m.name.as_str())
    .collect();
  let method_based = !relevant.is_empty();
  if method_based {
    score += METHOD_SCORE;
    reason = Some(format!("Recommended for {} study methods", relevant.join(" and ")));
  }

  for keyword in option.recommended_for.content_types {
    if content_text.contains(keyword) {
      score += CONTENT_TYPE_SCORE;
    }
  }
  for label in option.suitable_for {
    if content_text.contains(&label.to_lowercase()) {
      score += SUITABLE_FOR_SCORE;
    }
  }

  if reason.is_none() {
    let bonus = match option.material_type {
      Mindmap if content_text.contains("relationship") =>
        Some("Content involves many relationships between concepts"),
      Quiz if content_text.contains("understand") || content_text.contains("apply") =>
        Some("Content requires deep understanding and application"),
      Flashcards if content_text.contains("define") || content_text.contains("term") =>
        Some("Content contains many key terms and definitions"),
      _ => None,
    };
    if let Some(text) = bonus {
      score += BONUS_SCORE;
      reason = Some(text.to_string());
    }
  }

  let material = ScoredMaterial {
    material_type: option.material_type,
    title: option.title.to_string(),
    description: option.description.to_string(),
    suitable_for: option.suitable_for.iter().map(|s| s.to_string()).collect(),
    score,
    reason: reason.unwrap_or_else(|| option.recommended_for.reason.to_string()),
    is_recommended: false,
  };
  (material, method_based)
}

/// Decode the event description and rank materials for it.
pub fn recommend_for_event(event: &EventContent) -> Vec<ScoredMaterial> {
  let plan = codec::decode(event.description.as_deref().unwrap_or(""));
  score_materials(&content_text(event), &plan.study_methods)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn method(name: &str) -> StudyMethod {
    StudyMethod { name: name.into(), steps: vec!["step".into()], rationale: String::new() }
  }

  fn find(scored: &[ScoredMaterial], t: MaterialType) -> &ScoredMaterial {
    scored.iter().find(|m| m.material_type == t).expect("every type is scored")
  }

  #[test]
  fn key_terms_favour_flashcards() {
    let scored = score_materials("this covers key terms and definitions", &[]);
    let flashcards = find(&scored, Flashcards);
    let mindmap = find(&scored, Mindmap);

    // definitions + terms (2 each), "key terms" + "definitions" labels (1 each), "term" bonus (3)
    assert_eq!(flashcards.score, 9);
    assert!(flashcards.score > mindmap.score);
    assert_eq!(scored[0].material_type, Flashcards);
    assert!(flashcards.is_recommended);
    assert_eq!(flashcards.reason, "Content contains many key terms and definitions");
  }

  #[test]
  fn retrieval_practice_boosts_flashcards_and_quiz() {
    let scored = score_materials("", &[method("Retrieval Practice")]);
    assert_eq!(scored[0].material_type, Flashcards);
    assert_eq!(scored[1].material_type, Quiz);
    for m in &scored[..2] {
      assert_eq!(m.score, 5);
      assert!(m.is_recommended);
      assert_eq!(m.reason, "Recommended for Retrieval Practice study methods");
    }
    assert!(scored[2..].iter().all(|m| m.score == 0 && !m.is_recommended));
  }

  #[test]
  fn method_boost_counts_once_and_names_every_method() {
    let scored = score_materials("", &[method("Retrieval Practice"), method("Self-Testing")]);
    let quiz = find(&scored, Quiz);
    assert_eq!(quiz.score, 5);
    assert_eq!(quiz.reason, "Recommended for Retrieval Practice and Self-Testing study methods");
  }

  #[test]
  fn method_names_match_case_insensitively_as_substrings() {
    let scored = score_materials("", &[method("dual coding + elaboration")]);
    assert_eq!(scored[0].material_type, Notes);
    assert_eq!(scored[1].material_type, Mindmap);
    assert!(scored[0].is_recommended && scored[1].is_recommended);
  }

  #[test]
  fn empty_input_falls_back_to_static_reasons_in_catalog_order() {
    let scored = score_materials("", &[]);
    let order: Vec<MaterialType> = scored.iter().map(|m| m.material_type).collect();
    assert_eq!(order, vec![Summary, Flashcards, Quiz, Notes, Mindmap]);
    assert!(scored.iter().all(|m| m.score == 0 && !m.is_recommended));
    assert_eq!(scored[0].reason, "Excellent for final review and consolidation");
  }

  #[test]
  fn low_content_scores_are_not_recommended() {
    // "review" hits summary twice (keyword + label) = 3, under the threshold.
    let scored = score_materials("chapter review", &[]);
    assert_eq!(scored[0].material_type, Summary);
    assert_eq!(scored[0].score, 3);
    assert!(!scored[0].is_recommended);
  }

  #[test]
  fn method_based_type_outranks_content_only_match() {
    let scored = score_materials("relationship map", &[method("Summary Creation")]);
    let mindmap = find(&scored, Mindmap);
    // Method match suppresses the relationship bonus.
    assert_eq!(mindmap.score, 5);
    assert_eq!(mindmap.reason, "Recommended for Summary Creation study methods");
    assert!(find(&scored, Summary).is_recommended);
  }

  #[test]
  fn content_text_joins_fields_lowercase() {
    let event = EventContent {
      title: "Unit Test".into(),
      description: Some("Define TERMS".into()),
      subject_name: Some("Biology".into()),
    };
    assert_eq!(content_text(&event), "unit test define terms biology");
  }

  #[test]
  fn event_description_methods_drive_recommendation() {
    let description = "Learning objectives:\n(1) Recall the amendments\n\nThe Bill of Rights.\n\nStudy Methods:\n\
Active Recall\nStep-by-Step Application:\n• Cover notes and recite\n\nWhy This Method Works:\nStrengthens memory.\n";
    let event = EventContent {
      title: "Civics test".into(),
      description: Some(description.into()),
      subject_name: None,
    };
    let scored = recommend_for_event(&event);
    let recommended: Vec<MaterialType> =
      scored.iter().filter(|m| m.is_recommended).map(|m| m.material_type).collect();
    // "Step-by-Step Application" also lifts the quiz on content.
    assert_eq!(recommended, vec![Quiz, Flashcards]);
  }
}
