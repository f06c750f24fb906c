//! Act API reply parsing into an [`AgentAction`].
//!
//! The reply is text that should be a JSON object
//! `{"action": ..., "target": ..., "detail": ...}`. Models wrap it in code
//! fences, leave trailing commas, or surround it with prose, so several
//! recovery strategies are tried before giving up:
//!
//! 1. Direct `serde_json` parse
//! 2. The body of a fenced code block
//! 3. Trailing commas stripped (on the raw text, then on the fenced body)
//! 4. The span from the first `{` to the last `}`
//!
//! A reply that yields no JSON object is an error, which the orchestrator
//! turns into its fallback action. An object without a recognizable
//! `action` is a deliberate idle.

use hive_types::{ActionType, AgentAction};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ProviderError;

/// Parse reply text into an action.
///
/// # Errors
///
/// Returns [`ProviderError::Parse`] if no strategy recovers a JSON object.
pub fn parse_reply(raw: &str) -> Result<AgentAction, ProviderError> {
    let object = recover_object(raw.trim())
        .ok_or_else(|| ProviderError::Parse(format!("no JSON object in reply: {raw}")))?;
    Ok(action_from_object(&object))
}

/// Try every recovery strategy in order.
fn recover_object(text: &str) -> Option<Map<String, Value>> {
    let fenced = extract_fenced(text);
    let candidates = [
        Some(text.to_owned()),
        fenced.map(ToOwned::to_owned),
        Some(strip_trailing_commas(text)),
        fenced.map(strip_trailing_commas),
        outer_braces(text).map(strip_trailing_commas),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| match serde_json::from_str::<Value>(&candidate) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
}

/// Normalize a recovered object. Unknown or missing `action` means idle.
fn action_from_object(object: &Map<String, Value>) -> AgentAction {
    let action = object
        .get("action")
        .and_then(Value::as_str)
        .and_then(ActionType::parse)
        .unwrap_or(ActionType::Idle);
    if action == ActionType::Idle {
        debug!(reply = ?object, "reply carries no usable action");
    }

    AgentAction {
        action,
        target: object.get("target").and_then(scalar_text),
        detail: object.get("detail").and_then(scalar_text),
    }
}

/// Strings pass through; numbers and booleans are stringified (a model
/// may answer `"target": 3`).
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The body of the first fenced code block, with or without a language tag.
fn extract_fenced(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = text.get(open.checked_add(3)?..)?;
    // skip the language tag line, if any
    let body_start = after_fence.find('\n').map_or(0, |nl| nl.saturating_add(1));
    let body = after_fence.get(body_start..)?;
    let close = body.find("```")?;
    body.get(..close).map(str::trim)
}

/// The span from the first `{` to the last `}`, inclusive.
fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Drop commas that directly precede `}` or `]` (ignoring whitespace).
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == ',' {
            let rest = chars.clone().find(|n| !n.is_whitespace());
            if matches!(rest, Some('}' | ']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> Option<AgentAction> {
        parse_reply(raw).ok()
    }

    #[test]
    fn clean_json() {
        let action = parsed(r#"{"action": "move", "target": "3"}"#);
        assert_eq!(action, Some(AgentAction::step(3)));
    }

    #[test]
    fn numeric_target_is_stringified() {
        let action = parsed(r#"{"action": "move", "target": 4}"#);
        assert_eq!(action.and_then(|a| a.target), Some(String::from("4")));
    }

    #[test]
    fn fenced_json_with_tag() {
        let raw = "Here you go:\n```json\n{\"action\": \"chat\", \"target\": \"Sol\", \"detail\": \"hi\"}\n```";
        let action = parsed(raw);
        assert_eq!(
            action,
            Some(
                AgentAction::bare(ActionType::Chat)
                    .with_target("Sol")
                    .with_detail("hi")
            )
        );
    }

    #[test]
    fn trailing_commas_recovered() {
        assert_eq!(
            parsed("{\"action\": \"gather\",\n}").map(|a| a.action),
            Some(ActionType::Gather)
        );
        assert_eq!(
            parsed("```\n{\"action\": \"vote\", \"detail\": \"build a wall\",}\n```").map(|a| a.action),
            Some(ActionType::Vote)
        );
    }

    #[test]
    fn prose_around_object() {
        let raw = "I think I'll trade. {\"action\": \"trade\", \"target\": \"Sol\"} Good luck!";
        assert_eq!(parsed(raw).map(|a| a.action), Some(ActionType::Trade));
    }

    #[test]
    fn case_insensitive_action() {
        assert_eq!(parsed(r#"{"action": "ALLY"}"#).map(|a| a.action), Some(ActionType::Ally));
    }

    #[test]
    fn missing_or_unknown_action_is_idle() {
        assert_eq!(parsed(r#"{"target": "2"}"#).map(|a| a.action), Some(ActionType::Idle));
        assert_eq!(parsed(r#"{"action": "dance"}"#).map(|a| a.action), Some(ActionType::Idle));
        assert_eq!(parsed(r#"{"action": 5}"#).map(|a| a.action), Some(ActionType::Idle));
    }

    #[test]
    fn non_object_is_an_error() {
        assert!(matches!(parse_reply("I refuse."), Err(ProviderError::Parse(_))));
        assert!(parse_reply("[1, 2, 3]").is_err());
        assert!(parse_reply("").is_err());
    }

    #[test]
    fn trailing_comma_inside_string_is_kept_when_not_before_brace() {
        let cleaned = strip_trailing_commas(r#"{"detail": "a, b", "x": [1, 2,]}"#);
        assert_eq!(cleaned, r#"{"detail": "a, b", "x": [1, 2]}"#);
    }
}
