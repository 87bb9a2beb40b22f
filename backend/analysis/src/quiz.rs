//! Validation of model-generated quiz items.
//!
//! The quiz pipeline is strict-decode only: unlike the analysis path there
//! is no permissive fallback, and items missing required fields are
//! silently skipped.

use serde_json::Value;

use inkmath_core::QuizItem;

use crate::parse::{non_empty_string, string_list};
use crate::prompt::QUIZ_OPTION_COUNT;

/// Project one decoded element onto the quiz item shape.
///
/// Requires a question, exactly four options, a correct answer, and an
/// explanation; `real_life_usage` stays optional here (the analysis
/// pipeline's embedded quiz items do not carry it).
pub(crate) fn project_quiz_item(value: &Value) -> Option<QuizItem> {
    let map = value.as_object()?;
    let question = non_empty_string(map.get("question"))?;
    let options = string_list(map.get("options"));
    if options.len() != QUIZ_OPTION_COUNT {
        return None;
    }
    let correct_answer = non_empty_string(map.get("correct_answer"))?;
    let explanation = non_empty_string(map.get("explanation"))?;
    let real_life_usage = non_empty_string(map.get("real_life_usage"));

    Some(QuizItem {
        question,
        options,
        correct_answer,
        explanation,
        real_life_usage,
    })
}

/// Keep only items carrying all five required fields, truncated to `count`.
pub fn validate_quiz_items(decoded: &Value, count: usize) -> Vec<QuizItem> {
    let items = match decoded {
        Value::Array(items) => items,
        _ => return Vec::new(),
    };
    items
        .iter()
        .filter_map(project_quiz_item)
        .filter(|item| item.real_life_usage.is_some())
        .take(count)
        .collect()
}

/// The hand-authored item returned when quiz generation fails.
pub fn placeholder_quiz_item() -> QuizItem {
    QuizItem {
        question: "Quiz generation failed. What should you do next?".to_string(),
        options: vec![
            "Try again in a moment".to_string(),
            "Give up on the topic".to_string(),
            "Refresh the page forever".to_string(),
            "Clear your browser cache".to_string(),
        ],
        correct_answer: "Try again in a moment".to_string(),
        explanation: "The quiz service could not produce questions this time. \
Retrying usually resolves a transient generation failure."
            .to_string(),
        real_life_usage: Some(
            "Temporary service hiccups are common; retrying is the standard first step."
                .to_string(),
        ),
    }
}
