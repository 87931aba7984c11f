use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::level::LogLevel;

/// Structured data attached to a record.
pub type LogData = Map<String, Value>;

/// One log call, consumed immediately by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Local wall-clock time as `HH:MM:SS.mmm`
    pub timestamp: String,
    pub level: LogLevel,
    pub scope: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LogData>,
}

impl LogRecord {
    /// Build a record stamped with the current local time.
    pub fn now(
        level: LogLevel,
        scope: impl Into<String>,
        message: impl Into<String>,
        data: Option<LogData>,
    ) -> Self {
        Self {
            timestamp: format_timestamp(&Local::now()),
            level,
            scope: scope.into(),
            message: message.into(),
            data,
        }
    }

    /// Attached data, only when it has at least one key.
    pub fn non_empty_data(&self) -> Option<&LogData> {
        self.data.as_ref().filter(|data| !data.is_empty())
    }
}

/// Format `time` as `HH:MM:SS.mmm`.
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%H:%M:%S%.3f").to_string()
}

/// Turn any JSON value into record data.
///
/// Objects are used as-is, `null` means no data and every other value is
/// wrapped under a `value` key.
pub fn log_data(value: Value) -> Option<LogData> {
    match value {
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            Some(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn timestamp_pads_milliseconds() {
        let time = Local.with_ymd_and_hms(2024, 5, 1, 9, 4, 7).unwrap()
            + chrono::Duration::milliseconds(5);
        assert_eq!(format_timestamp(&time), "09:04:07.005");
    }

    #[test]
    fn record_timestamp_has_fixed_shape() {
        let record = LogRecord::now(LogLevel::Info, "shop", "hello", None);
        let bytes = record.timestamp.as_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(bytes[2], b':');
        assert_eq!(bytes[5], b':');
        assert_eq!(bytes[8], b'.');
    }

    #[test]
    fn empty_data_is_treated_as_absent() {
        let record = LogRecord::now(LogLevel::Info, "shop", "hello", Some(LogData::new()));
        assert!(record.non_empty_data().is_none());
    }

    #[test]
    fn log_data_wraps_non_objects() {
        assert_eq!(log_data(json!({"a": 1})).unwrap()["a"], json!(1));
        assert!(log_data(json!(null)).is_none());
        assert_eq!(log_data(json!([1, 2])).unwrap()["value"], json!([1, 2]));
    }
}
