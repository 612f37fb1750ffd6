//! JSON extraction from LLM responses.
//!
//! Backends sometimes wrap the requested JSON object in markdown fences or
//! surrounding prose. Extraction tries fences first, then balanced-brace
//! scanning, and finally hands back the trimmed input for the caller's
//! parser to reject with a useful error.

/// Extract a JSON object from a possibly-wrapped response.
pub fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```json")
        && let Some(end) = trimmed[start + 7..].find("```")
    {
        return trimmed[start + 7..start + 7 + end].trim().to_string();
    }

    if let Some(start) = trimmed.find("```")
        && let Some(end) = trimmed[start + 3..].find("```")
    {
        let inner = trimmed[start + 3..start + 3 + end].trim();
        if inner.starts_with('{') {
            return inner.to_string();
        }
    }

    if let Some(obj) = first_valid_object(trimmed) {
        return obj;
    }

    trimmed.to_string()
}

/// Scan for the first `{`-rooted substring that parses as JSON.
///
/// Brace depth is tracked with string-literal and escape awareness so
/// braces inside string values do not break the scan.
fn first_valid_object(text: &str) -> Option<String> {
    for (start, _) in text.match_indices('{') {
        if let Some(candidate) = balanced_slice(&text[start..])
            && serde_json::from_str::<serde_json::Value>(candidate).is_ok()
        {
            return Some(candidate.to_string());
        }
    }
    None
}

fn balanced_slice(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_fenced_block() {
        let response = "Here you go:\n```json\n{\"subject\": \"fix: bug\"}\n```\nDone.";
        assert_eq!(extract_json(response), r#"{"subject": "fix: bug"}"#);
    }

    #[test]
    fn test_extract_json_bare_fence() {
        let response = "```\n{\"subject\": \"x\"}\n```";
        assert_eq!(extract_json(response), r#"{"subject": "x"}"#);
    }

    #[test]
    fn test_extract_json_surrounded_by_prose() {
        let response = "Sure! {\"subject\": \"feat: thing\", \"body\": null} hope that helps";
        assert_eq!(
            extract_json(response),
            r#"{"subject": "feat: thing", "body": null}"#
        );
    }

    #[test]
    fn test_extract_json_braces_inside_strings() {
        let response = r#"{"subject": "fix: handle { and } in text"}"#;
        assert_eq!(extract_json(response), response);
    }

    #[test]
    fn test_extract_json_plain_object_passthrough() {
        let response = r#"{"subject": "chore: deps"}"#;
        assert_eq!(extract_json(response), response);
    }

    #[test]
    fn test_extract_json_garbage_returns_trimmed_input() {
        assert_eq!(extract_json("  not json at all  "), "not json at all");
    }

    #[test]
    fn test_extract_json_nested_objects() {
        let response = r#"prefix {"a": {"b": 1}, "c": 2} suffix"#;
        assert_eq!(extract_json(response), r#"{"a": {"b": 1}, "c": 2}"#);
    }
}
