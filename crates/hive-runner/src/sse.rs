//! Server-sent event body decoding.
//!
//! The Act API streams its answer as SSE. Each `data:` line carries either
//! a JSON chunk (`choices[0].delta.content` or `content`) or raw text. The
//! chunks concatenate into the full reply; `[DONE]` ends the stream.

use serde_json::Value;

/// Marker line that terminates the stream.
const DONE: &str = "[DONE]";

/// Concatenate the content of every `data:` line in `body`.
///
/// Lines that are not `data:` lines (comments, `event:`, blanks) are
/// skipped. A `data:` payload that is not JSON is appended verbatim.
pub fn decode_sse(body: &str) -> String {
    let mut full = String::new();
    for line in body.lines() {
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data == DONE {
            break;
        }
        match serde_json::from_str::<Value>(data) {
            Ok(chunk) => {
                if let Some(content) = chunk_content(&chunk) {
                    full.push_str(content);
                }
            }
            Err(_) => full.push_str(data),
        }
    }
    full
}

/// The text carried by one JSON chunk, if any.
fn chunk_content(chunk: &Value) -> Option<&str> {
    chunk
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("delta"))
        .and_then(|d| d.get("content"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| chunk.get("content").and_then(Value::as_str))
}
