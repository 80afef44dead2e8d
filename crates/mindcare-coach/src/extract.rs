//! Tolerant parsing of model output into [`WellnessContent`].
//!
//! Models wrap JSON in prose or code fences and occasionally emit doubled or
//! escaped quotes inside strings. The outermost `{ ... }` span is parsed
//! as-is first, then once more after repairing those quote patterns.

use mindcare_core::models::wellness::WellnessContent;

use crate::error::CoachError;

/// Slice from the first `{` to the last `}`, or the whole text if there is
/// no such span.
fn outer_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

fn repair_quotes(text: &str) -> String {
    text.replace("\"\"", "\"").replace("\\\"", "'")
}

pub fn extract_content(text: &str) -> Result<WellnessContent, CoachError> {
    let candidate = outer_object(text);

    match serde_json::from_str(candidate) {
        Ok(content) => Ok(content),
        Err(first) => serde_json::from_str(&repair_quotes(candidate)).map_err(|_| {
            CoachError::ResponseParse(format!(
                "model output is not wellness JSON ({first}): {}",
                truncate(candidate, 200)
            ))
        }),
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
