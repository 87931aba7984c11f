//! Payloads of the service endpoints the client core itself consumes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `GET /api/health/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` or `"unhealthy"`
    pub status: String,
    /// Per-service verdicts, e.g. `database => "healthy"`.
    #[serde(default)]
    pub services: BTreeMap<String, String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }

    /// Services whose verdict is not `"healthy"`.
    pub fn failing_services(&self) -> impl Iterator<Item = (&str, &str)> {
        self.services
            .iter()
            .filter(|(_, verdict)| !verdict.eq_ignore_ascii_case("healthy"))
            .map(|(name, verdict)| (name.as_str(), verdict.as_str()))
    }
}

/// Body of `GET /api/logs/`: the tail of the backend log file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsPage {
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub total_lines: u64,
    #[serde(default)]
    pub showing: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn health_reports_failing_services() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "unhealthy",
            "services": {"database": "healthy", "redis": "unhealthy: timeout"}
        }))
        .unwrap();

        assert!(!health.is_healthy());
        let failing: Vec<_> = health.failing_services().collect();
        assert_eq!(failing, vec![("redis", "unhealthy: timeout")]);
    }

    #[test]
    fn logs_page_tolerates_missing_fields() {
        let page: LogsPage =
            serde_json::from_value(json!({"logs": [], "total_lines": 0, "message": "Log file not found."}))
                .unwrap();
        assert_eq!(page.showing, 0);
        assert_eq!(page.message.as_deref(), Some("Log file not found."));
    }
}
