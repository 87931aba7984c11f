//! Outcome classification and body summarisation for response logging

use serde_json::{json, Value};
use shopfront_common::LogLevel;
use shopfront_domain::constants::{MAX_LOGGED_ARRAY_ITEMS, SAMPLE_ARRAY_ITEMS, TRUNCATION_NOTICE};

/// Log level for a response status: 2xx success, 5xx error, anything else warn.
pub fn classify_status(status: u16) -> LogLevel {
    match status {
        200..=299 => LogLevel::Success,
        500..=599 => LogLevel::Error,
        _ => LogLevel::Warn,
    }
}

/// Replace large array bodies with a count and the first few items.
///
/// Other bodies are returned as-is.
pub fn summarize_body(body: &Value) -> Value {
    match body {
        Value::Array(items) if items.len() > MAX_LOGGED_ARRAY_ITEMS => json!({
            "itemsCount": items.len(),
            "firstItems": items.iter().take(SAMPLE_ARRAY_ITEMS).cloned().collect::<Vec<_>>(),
            "message": TRUNCATION_NOTICE,
        }),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bands() {
        assert_eq!(classify_status(200), LogLevel::Success);
        assert_eq!(classify_status(201), LogLevel::Success);
        assert_eq!(classify_status(204), LogLevel::Success);
        assert_eq!(classify_status(301), LogLevel::Warn);
        assert_eq!(classify_status(404), LogLevel::Warn);
        assert_eq!(classify_status(500), LogLevel::Error);
        assert_eq!(classify_status(503), LogLevel::Error);
        assert_eq!(classify_status(103), LogLevel::Warn);
    }

    #[test]
    fn large_arrays_are_summarized() {
        let body = Value::Array((0..25).map(|i| json!({ "id": i })).collect());

        let summary = summarize_body(&body);

        assert_eq!(summary["itemsCount"], json!(25));
        assert_eq!(summary["firstItems"], json!([{"id": 0}, {"id": 1}, {"id": 2}]));
        assert_eq!(summary["message"], json!("[Truncated - too many items]"));
    }

    #[test]
    fn small_arrays_and_objects_are_kept() {
        let ten = Value::Array((0..10).map(|i| json!(i)).collect());
        assert_eq!(summarize_body(&ten), ten);

        let object = json!({"results": [1, 2, 3]});
        assert_eq!(summarize_body(&object), object);
    }
}
