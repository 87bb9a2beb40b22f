//! Stripping of markdown code-fence decoration from raw model replies.

use once_cell::sync::Lazy;
use regex::Regex;

/// First fenced block, optionally tagged `json`; `(?s)` so the interior
/// spans newlines.
static FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").unwrap());

/// Recover a parseable payload from a model reply.
///
/// Returns the trimmed interior of the first code fence when one exists,
/// otherwise the trimmed input. Total and idempotent; the result may still
/// be unparseable.
pub fn sanitize(raw: &str) -> String {
    match FENCE_PATTERN.captures(raw) {
        Some(caps) => caps[1].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_tagged_fence() {
        let raw = "```json\n[{\"expr\": \"2+2\", \"result\": \"4\"}]\n```";
        assert_eq!(sanitize(raw), "[{\"expr\": \"2+2\", \"result\": \"4\"}]");
    }

    #[test]
    fn extracts_untagged_fence() {
        let raw = "Here you go:\n```\n[1, 2]\n```\nHope that helps!";
        assert_eq!(sanitize(raw), "[1, 2]");
    }

    #[test]
    fn passes_through_unfenced_text() {
        assert_eq!(sanitize("  [1, 2]  \n"), "[1, 2]");
    }

    #[test]
    fn fence_interior_spans_newlines() {
        let raw = "```json\n[\n  {\"expr\": \"x\"},\n  {\"expr\": \"y\"}\n]\n```";
        assert_eq!(sanitize(raw), "[\n  {\"expr\": \"x\"},\n  {\"expr\": \"y\"}\n]");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "```json\n[1]\n```",
            "plain text",
            "  padded  ",
            "```\n{'a': 1}\n```",
            "",
        ];
        for raw in inputs {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "sanitize not idempotent for {raw:?}");
        }
    }
}
