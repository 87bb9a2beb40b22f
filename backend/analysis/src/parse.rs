//! Normalization of sanitized model replies into `AnalysisRecord`s.
//!
//! Decode failures never escape this module: a reply that cannot be
//! understood degrades to a single fallback record so the caller always
//! has renderable content.

use serde_json::{Map, Value};
use tracing::warn;

use inkmath_core::AnalysisRecord;

use crate::literal::parse_literal;
use crate::prompt::MIN_PRACTICE_QUESTIONS;
use crate::quiz::project_quiz_item;

pub(crate) const DEFAULT_EXPLANATION: &str =
    "No detailed explanation was returned for this expression.";

pub(crate) const FALLBACK_EXPLANATION: &str =
    "Sorry, the written content could not be interpreted. Please try again with a clearer image.";

pub(crate) const DEFAULT_BASIC_CONCEPTS: &str =
    "Review the order of operations (PEMDAS) and the definitions of the symbols involved \
before attempting similar problems.";

pub(crate) fn default_practice_questions() -> Vec<String> {
    vec![
        "Simplify: 2 + 3 * 4".to_string(),
        "Evaluate: (5 - 2)^2".to_string(),
        "Solve for x: x + 7 = 12".to_string(),
    ]
}

/// Decoded shape of a sanitized model reply.
enum ParsedReply {
    List(Vec<Value>),
    Single(Map<String, Value>),
    Unparseable,
}

fn decode(sanitized: &str) -> ParsedReply {
    let value = match serde_json::from_str::<Value>(sanitized) {
        Ok(value) => value,
        Err(json_err) => match parse_literal(sanitized) {
            Ok(value) => value,
            Err(literal_err) => {
                warn!(%json_err, %literal_err, "Model reply failed both decode stages");
                return ParsedReply::Unparseable;
            }
        },
    };
    match value {
        Value::Array(items) => ParsedReply::List(items),
        Value::Object(map) => ParsedReply::Single(map),
        _ => ParsedReply::Unparseable,
    }
}

/// Normalize a sanitized reply into at least one record.
pub fn parse_records(sanitized: &str) -> Vec<AnalysisRecord> {
    let items = match decode(sanitized) {
        ParsedReply::List(items) => items,
        ParsedReply::Single(map) => vec![Value::Object(map)],
        ParsedReply::Unparseable => return vec![fallback_record()],
    };

    let records: Vec<AnalysisRecord> = items.into_iter().filter_map(project_record).collect();
    if records.is_empty() {
        return vec![fallback_record()];
    }
    records
}

/// The placeholder substituted when the model's reply cannot be used.
pub fn fallback_record() -> AnalysisRecord {
    AnalysisRecord {
        expression: "Error processing input".to_string(),
        result: "Unable to analyze".to_string(),
        explanation: FALLBACK_EXPLANATION.to_string(),
        basic_concepts: DEFAULT_BASIC_CONCEPTS.to_string(),
        practice_questions: default_practice_questions(),
        quiz_questions: Vec::new(),
        assign: false,
    }
}

/// Project one decoded element onto the record shape.
///
/// Non-mapping elements are dropped. Missing or empty fields take their
/// defaults; `assign` is keyed on the presence of an `assign` key, not its
/// value.
fn project_record(value: Value) -> Option<AnalysisRecord> {
    let map = match value {
        Value::Object(map) => map,
        _ => return None,
    };

    let assign = map.contains_key("assign");
    let expression =
        non_empty_string(map.get("expr").or_else(|| map.get("expression"))).unwrap_or_default();
    let result = non_empty_string(map.get("result")).unwrap_or_default();
    let explanation = non_empty_string(map.get("explanation"))
        .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());
    let basic_concepts = non_empty_string(map.get("basic_concepts"))
        .unwrap_or_else(|| DEFAULT_BASIC_CONCEPTS.to_string());

    let mut practice_questions = string_list(map.get("practice_questions"));
    if practice_questions.len() < MIN_PRACTICE_QUESTIONS {
        for question in default_practice_questions() {
            if practice_questions.len() >= MIN_PRACTICE_QUESTIONS {
                break;
            }
            if !practice_questions.contains(&question) {
                practice_questions.push(question);
            }
        }
    }

    let quiz_questions = match map.get("quiz_questions") {
        Some(Value::Array(items)) => items.iter().filter_map(project_quiz_item).collect(),
        _ => Vec::new(),
    };

    Some(AnalysisRecord {
        expression,
        result,
        explanation,
        basic_concepts,
        practice_questions,
        quiz_questions,
        assign,
    })
}

pub(crate) fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(value_as_string)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(value_as_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_yields_exactly_one_fallback_record() {
        let records = parse_records("I am sorry, I could not read that image.");
        assert_eq!(records, vec![fallback_record()]);
        let record = &records[0];
        assert_eq!(record.expression, "Error processing input");
        assert_eq!(record.result, "Unable to analyze");
        assert_eq!(record.practice_questions.len(), 3);
        assert!(!record.assign);
    }

    #[test]
    fn scalar_replies_are_unparseable() {
        assert_eq!(parse_records("42"), vec![fallback_record()]);
        assert_eq!(parse_records("\"just a string\""), vec![fallback_record()]);
    }

    #[test]
    fn strict_json_list_is_projected_with_defaults() {
        let records = parse_records(r#"[{"expr": "2+2", "result": "4"}]"#);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.expression, "2+2");
        assert_eq!(record.result, "4");
        assert_eq!(record.explanation, DEFAULT_EXPLANATION);
        assert_eq!(record.basic_concepts, DEFAULT_BASIC_CONCEPTS);
        assert_eq!(record.practice_questions.len(), 3);
        assert!(record.quiz_questions.is_empty());
        assert!(!record.assign);
    }

    #[test]
    fn python_literal_list_is_accepted() {
        let records =
            parse_records("[{'expr': 'x = 4', 'result': '4', 'assign': True}]");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].expression, "x = 4");
        assert!(records[0].assign);
    }

    #[test]
    fn single_object_is_wrapped_into_a_list() {
        let records = parse_records(r#"{"expr": "3*3", "result": "9"}"#);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].expression, "3*3");
    }

    #[test]
    fn assign_is_presence_based_not_value_based() {
        let records = parse_records(r#"[{"expr": "x = 1", "assign": false}]"#);
        assert!(records[0].assign);

        let records = parse_records(r#"[{"expr": "x = 1", "assign": null}]"#);
        assert!(records[0].assign);

        let records = parse_records(r#"[{"expr": "2+2"}]"#);
        assert!(!records[0].assign);
    }

    #[test]
    fn non_mapping_elements_are_dropped() {
        let records = parse_records(r#"["noise", 42, {"expr": "1+1", "result": "2"}]"#);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].expression, "1+1");
    }

    #[test]
    fn all_non_mapping_elements_yield_the_fallback() {
        let records = parse_records(r#"["a", "b", 3]"#);
        assert_eq!(records, vec![fallback_record()]);
    }

    #[test]
    fn short_practice_lists_are_topped_up() {
        let records = parse_records(
            r#"[{"expr": "e", "result": "r", "practice_questions": ["only one"]}]"#,
        );
        let questions = &records[0].practice_questions;
        assert!(questions.len() >= 3);
        assert_eq!(questions[0], "only one");
    }

    #[test]
    fn empty_string_fields_take_defaults() {
        let records = parse_records(r#"[{"expr": "e", "result": "r", "explanation": "  "}]"#);
        assert_eq!(records[0].explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn numeric_results_are_stringified() {
        let records = parse_records(r#"[{"expr": "2+2", "result": 4}]"#);
        assert_eq!(records[0].result, "4");
    }

    #[test]
    fn embedded_quiz_items_are_validated() {
        let records = parse_records(
            r#"[{"expr": "e", "result": "r", "quiz_questions": [
                {"question": "q1", "options": ["a", "b", "c", "d"],
                 "correct_answer": "a", "explanation": "because"},
                {"question": "bad", "options": ["a", "b"],
                 "correct_answer": "a", "explanation": "too few options"}
            ]}]"#,
        );
        assert_eq!(records[0].quiz_questions.len(), 1);
        assert_eq!(records[0].quiz_questions[0].question, "q1");
    }
}
