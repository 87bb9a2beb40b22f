//! Prompt construction for the analysis and quiz pipelines.
//!
//! The templates encode the solving rules as natural language only; the
//! parser, not the model, is what guarantees the output shape.

use serde_json::{Map, Value};

/// Minimum practice questions per record after validation.
pub const MIN_PRACTICE_QUESTIONS: usize = 3;

/// Required number of choices on every quiz question.
pub const QUIZ_OPTION_COUNT: usize = 4;

const ANALYSIS_RULES: &str = "You have been given an image with some mathematical expressions, equations, or graphical problems, and you need to solve them. \
Note: Use the PEMDAS rule for solving mathematical expressions. PEMDAS stands for the Priority Order: Parentheses, Exponents, Multiplication and Division (from left to right), Addition and Subtraction (from left to right). \
Following are the cases you may encounter: \
1. Simple mathematical expressions like `2 + 2`, `3 * 4`, `5 / 6`: solve the expression and return the answer. \
2. A set of equations like `x^2 + 2x + 1 = 0`, `3y + 4x = 0`: solve for each variable and return one entry per variable with detailed solution steps in the explanation. \
3. Variable assignments like `x = 4`, `y = 5`: record the assignment, include the key 'assign' set to true, and explain the assignment, e.g. 'Assigning value of 4 to x'. \
4. Graphical problems such as cars colliding, trigonometric sketches, or charts: return a descriptive result with a thorough Markdown-formatted explanation. \
5. Abstract concepts shown in drawings: return the detected concept as the result, with a Markdown explanation of the concept. \
Return a list of objects, one per detected expression or concept, where each object has these keys: \
'expr': the detected expression or a description of the drawing; \
'result': the computed answer, solved value, or identified concept; \
'explanation': a detailed step-by-step explanation in Markdown; \
'basic_concepts': a Markdown explanation of the underlying concepts needed to understand the solution — this key is mandatory; \
'practice_questions': a list of at least 3 practice questions on the same concepts — this key is mandatory; \
'quiz_questions': when you return a solved result, exactly 15 multiple-choice questions, each an object with 'question', 'options' (exactly 4 choices), 'correct_answer' (one of the options), and 'explanation'. \
Use extra backslashes for escape characters like \\f -> \\\\f, \\n -> \\\\n, so the output stays valid once decoded. \
Do not wrap the list in Markdown fences or add commentary around it. ";

/// Render the analysis prompt for a variable mapping.
///
/// Deterministic for a given mapping; non-ASCII variable values are
/// embedded as-is, not escaped.
pub fn analysis_prompt(vars: &Map<String, Value>) -> String {
    let vars_json = serde_json::to_string(vars).unwrap_or_else(|_| "{}".to_string());
    format!(
        "{ANALYSIS_RULES}Here is a dictionary of user-assigned variables. \
If the given expression has any of these variables, use its actual value: {vars_json}."
    )
}

/// Render the quiz-generation prompt.
pub fn quiz_prompt(topic: &str, concepts: &str, count: u32) -> String {
    format!(
        "Generate exactly {count} multiple-choice quiz questions about the topic '{topic}', \
covering these concepts: {concepts}. \
Return a JSON array where every element is an object with exactly these keys: \
'question': the question text; \
'options': a list of exactly {QUIZ_OPTION_COUNT} answer choices; \
'correct_answer': the correct choice, repeated verbatim from 'options'; \
'explanation': an explanation that builds the answer up from the basics; \
'real_life_usage': a short example of where this concept appears in real life. \
Reply with the JSON array only. Do not wrap it in Markdown fences or add any commentary."
    )
}
