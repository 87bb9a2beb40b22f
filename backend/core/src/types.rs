use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound body for `POST /calculate`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    /// Data URL of the uploaded image: `data:<mime>;base64,<payload>`.
    pub image: String,
    /// User-assigned variable bindings, substituted into detected
    /// expressions by the model.
    #[serde(default)]
    pub dict_of_vars: Map<String, Value>,
}

/// One normalized unit of solved content.
///
/// Every field is populated after validation, even when the model omitted
/// it. Serialized with the `expr` key the frontend already consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "expr", alias = "expression")]
    pub expression: String,
    pub result: String,
    pub explanation: String,
    pub basic_concepts: String,
    pub practice_questions: Vec<String>,
    #[serde(default)]
    pub quiz_questions: Vec<QuizItem>,
    /// True iff the source mapping carried an `assign` key, i.e. the
    /// record represents a variable assignment.
    pub assign: bool,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    /// Exactly four choices.
    pub options: Vec<String>,
    /// Upstream is not trusted to pick this from `options`; see DESIGN.md.
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_life_usage: Option<String>,
}

/// Inbound body for `POST /quiz`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    pub concepts: String,
    #[serde(default = "default_question_count")]
    pub number_of_questions: u32,
}

fn default_question_count() -> u32 {
    15
}

/// Response envelope for `POST /calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub message: String,
    pub status: ResponseStatus,
    pub data: Vec<AnalysisRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, data: Vec<AnalysisRecord>) -> Self {
        Self {
            message: message.into(),
            status: ResponseStatus::Success,
            data,
            error: None,
        }
    }

    /// Error envelope with empty data (auth and image-decode failures).
    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            message: message.into(),
            status: ResponseStatus::Error,
            data: Vec::new(),
            error: detail,
        }
    }
}
