//! Locating a JSON object inside free-form model output.
//!
//! Models wrap JSON in markdown fences, prepend chatter, or emit several
//! brace groups. Extraction tries fenced blocks first, then every balanced
//! `{ ... }` group in order, and returns the first one that parses as an
//! object. It never fails loudly: `None` means nothing usable was found.

use serde_json::{Map, Value};
use tracing::debug;

/// Find and parse the first JSON object in `response`.
///
/// # Examples
///
/// ```
/// use storyloom_narrative::extract_object;
///
/// let response = "Sure! Here it is:\n```json\n{\"summary\": \"A fox learns to fly.\"}\n```";
/// let object = extract_object(response).unwrap();
/// assert_eq!(object["summary"], "A fox learns to fly.");
///
/// assert!(extract_object("no json here").is_none());
/// ```
pub fn extract_object(response: &str) -> Option<Map<String, Value>> {
    let fenced = code_blocks(response).into_iter();
    let braced = balanced_groups(response).into_iter();

    let found = fenced.chain(braced).find_map(|candidate| parse_object(&candidate));
    if found.is_none() {
        debug!(
            response_length = response.len(),
            "No JSON object found in response"
        );
    }
    found
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "Candidate is not valid JSON");
            None
        }
    }
}

/// Contents of markdown code fences, in order. A fence left open at the
/// end of a truncated response yields everything after it.
fn code_blocks(response: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut rest = response;

    while let Some(start) = rest.find("```") {
        let after_fence = &rest[start + 3..];
        // Skip the language tag line.
        let body_start = after_fence.find('\n').map(|n| n + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        match body.find("```") {
            Some(end) => {
                blocks.push(body[..end].to_string());
                rest = &body[end + 3..];
            }
            None => {
                blocks.push(body.to_string());
                break;
            }
        }
    }

    blocks
}

/// Every balanced brace group, honouring string literals.
///
/// Scanning restarts at the next `{` whenever a group never closes, so one
/// malformed group (an unbalanced quote or brace) does not hide later ones.
fn balanced_groups(response: &str) -> Vec<String> {
    let mut groups = Vec::new();
    let mut from = 0;

    while let Some(offset) = response[from..].find('{') {
        let start = from + offset;
        match group_len(&response[start..]) {
            Some(len) => {
                groups.push(response[start..start + len].to_string());
                from = start + len;
            }
            None => from = start + 1,
        }
    }

    groups
}

/// Byte length of the group opening at the start of `text`, if it closes.
fn group_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
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
    fn test_extract_from_prose_without_fence() {
        let response = r#"Here you go: {"summary": "Two friends", "nested": {"a": 1}} Enjoy!"#;
        let object = extract_object(response).unwrap();
        assert_eq!(object["summary"], "Two friends");
        assert_eq!(object["nested"]["a"], 1);
    }

    #[test]
    fn test_unbalanced_quote_does_not_hide_later_object() {
        let response = r#"Draft: {"title": "unterminated} and then {"summary": "kept"}"#;
        let object = extract_object(response).unwrap();
        assert_eq!(object["summary"], "kept");
    }

    #[test]
    fn test_unclosed_group_does_not_hide_later_object() {
        let response = r#"{"broken": [1, 2 ... then {"summary": "second"}"#;
        let object = extract_object(response).unwrap();
        assert_eq!(object["summary"], "second");
    }

    #[test]
    fn test_braces_inside_strings_do_not_confuse_balance() {
        let response = r#"{"coverText": "A door shaped like } and {", "summary": "x"}"#;
        let object = extract_object(response).unwrap();
        assert_eq!(object["coverText"], "A door shaped like } and {");
    }

    #[test]
    fn test_escaped_quotes() {
        let response = r#"{"description": "She said \"hello\""}"#;
        let object = extract_object(response).unwrap();
        assert_eq!(object["description"], "She said \"hello\"");
    }

    #[test]
    fn test_skips_unparseable_group_and_uses_next() {
        let response = r#"Template: {storyTitles: [...]} Answer: {"storyTitles": ["Moon"]}"#;
        let object = extract_object(response).unwrap();
        assert_eq!(object["storyTitles"][0], "Moon");
    }

    #[test]
    fn test_truncated_fence() {
        let response = "```json\n{\"summary\": \"cut short\"}";
        let object = extract_object(response).unwrap();
        assert_eq!(object["summary"], "cut short");
    }

    #[test]
    fn test_arrays_and_garbage_yield_none() {
        assert!(extract_object(r#"["a", "b"]"#).is_none());
        assert!(extract_object("{ this is not json").is_none());
        assert!(extract_object("").is_none());
    }
}
