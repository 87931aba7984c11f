use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Success,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] =
        [Self::Debug, Self::Info, Self::Warn, Self::Success, Self::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Upper-case label used in terminal output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
        }
    }

    /// CSS colour used by the styled console renderer.
    pub fn css_color(self) -> &'static str {
        match self {
            Self::Debug => "#6B7280",
            Self::Info => "#3B82F6",
            Self::Warn => "#F59E0B",
            Self::Error => "#EF4444",
            Self::Success => "#10B981",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
