use proptest::prelude::*;
use studyplan_backend::codec::{decode, encode, from_storage, to_storage};
use studyplan_backend::domain::{StudyMethod, StudyPlan};

// Generated text never contains ':', '(', '-' or '•', so no reserved marker can appear.
fn line() -> impl Strategy<Value = String> {
    "[A-Z][a-z ]{0,25}[a-z]"
}

fn paragraph() -> impl Strategy<Value = String> {
    "[A-Z][a-z .]{0,30}[a-z.]"
}

fn method() -> impl Strategy<Value = StudyMethod> {
    (
        "[A-Z][a-z]{1,10}( [A-Z][a-z]{1,10})?",
        prop::collection::vec(line(), 1..=3),
        prop::option::of(paragraph()),
    )
        .prop_map(|(name, steps, rationale)| StudyMethod {
            name,
            steps,
            rationale: rationale.unwrap_or_default(),
        })
}

fn plan() -> impl Strategy<Value = StudyPlan> {
    (
        prop::collection::vec(line(), 0..=4),
        prop::collection::vec(paragraph(), 0..=3),
        prop::collection::vec(method(), 0..=3),
    )
        .prop_map(|(learning_objectives, paragraphs, study_methods)| StudyPlan {
            title: String::new(),
            learning_objectives,
            overview: paragraphs.join("\n\n"),
            study_methods,
        })
}

// Fragments that exercise every marker in arbitrary order.
fn marker_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Learning objectives:",
            "Study Methods:",
            "Step-by-Step Application:",
            "Why This Method Works:",
            "---",
            "• ",
            "(1) ",
            "\n",
            "\r\n",
            "\n\n",
            "text",
            "{",
        ]),
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn marker_free_plans_round_trip(p in plan()) {
        prop_assert_eq!(decode(&encode(&p)), p);
    }

    #[test]
    fn storage_round_trips_titled_plans(p in plan(), title in ".{0,40}") {
        let p = p.with_title(title);
        prop_assert_eq!(from_storage(&to_storage(&p)), p);
    }

    #[test]
    fn decode_accepts_any_text(s in "(?s).{0,200}") {
        let plan = decode(&s);
        prop_assert!(plan.title.is_empty());
        prop_assert!(plan.learning_objectives.iter().all(|o| !o.is_empty() && o.trim() == o));
        prop_assert!(plan.study_methods.iter().all(|m| !m.name.is_empty() && !m.steps.is_empty()));
        let _ = from_storage(&s);
    }

    #[test]
    fn decode_accepts_shuffled_markers(s in marker_soup()) {
        let plan = decode(&s);
        prop_assert!(plan.study_methods.iter().all(|m| !m.steps.is_empty()));
        let _ = from_storage(&s);
    }
}
