//! Small utility helpers used across modules.

use crate::domain::StudyDocument;

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// One line per document: `- name (Importance: n/5) - Notes: ...`.
/// This is the document context every generation prompt receives.
pub fn documents_context(documents: &[StudyDocument]) -> String {
  documents
    .iter()
    .map(|doc| {
      let importance = doc.importance.map(|i| i.to_string()).unwrap_or_else(|| "?".into());
      match doc.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        Some(notes) => format!("- {} (Importance: {}/5) - Notes: {}", doc.name, importance, notes),
        None => format!("- {} (Importance: {}/5)", doc.name, importance),
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Log-safe truncation for large strings, cut on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) { end -= 1; }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}
