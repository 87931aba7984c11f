use std::fmt;
use std::str::FromStr;

use owo_colors::{AnsiColors, OwoColorize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::level::LogLevel;
use super::record::LogRecord;

const DATA_HEADER_STYLE: &str = "color: #9CA3AF; font-weight: bold;";

/// Output format chosen once by the hosting application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTarget {
    /// Collapsible, CSS-styled groups for a browser devtools console.
    StyledConsole,
    /// One ANSI-coloured block per record for a terminal.
    #[default]
    AnsiTerminal,
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StyledConsole => f.write_str("console"),
            Self::AnsiTerminal => f.write_str("ansi"),
        }
    }
}

impl FromStr for RenderTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "styled_console" | "browser" => Ok(Self::StyledConsole),
            "ansi" | "ansi_terminal" | "terminal" => Ok(Self::AnsiTerminal),
            other => Err(format!("Invalid RenderTarget: {other}")),
        }
    }
}

/// One `console.*` call: a format string followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleCall {
    pub format: String,
    pub args: Vec<String>,
}

/// A `console.group` header followed by the calls inside the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleGroup {
    pub header: ConsoleCall,
    pub entries: Vec<ConsoleCall>,
}

/// A record rendered for its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedRecord {
    Ansi(String),
    Styled(ConsoleGroup),
}

impl RenderedRecord {
    /// Text form written by stream sinks.
    ///
    /// Styled groups become one JSON line so a webview bridge can replay them.
    pub fn to_text(&self) -> String {
        match self {
            Self::Ansi(text) => text.clone(),
            Self::Styled(group) => {
                serde_json::to_string(group).unwrap_or_else(|_| group.header.format.clone())
            }
        }
    }
}

/// Render `record` for `target`.
pub fn render(target: RenderTarget, record: &LogRecord) -> RenderedRecord {
    match target {
        RenderTarget::StyledConsole => RenderedRecord::Styled(render_console(record)),
        RenderTarget::AnsiTerminal => RenderedRecord::Ansi(render_ansi(record)),
    }
}

fn render_console(record: &LogRecord) -> ConsoleGroup {
    let header = ConsoleCall {
        format: format!("%c[{}] [{}] {}", record.timestamp, record.scope, record.message),
        args: vec![format!("color: {}; font-weight: bold;", record.level.css_color())],
    };

    let mut entries = Vec::new();
    if let Some(data) = record.non_empty_data() {
        entries.push(ConsoleCall {
            format: "%cData:".to_string(),
            args: vec![DATA_HEADER_STYLE.to_string()],
        });
        for (key, value) in data {
            entries.push(ConsoleCall { format: format!("  {key}:"), args: vec![value_text(value)] });
        }
    }

    ConsoleGroup { header, entries }
}

fn render_ansi(record: &LogRecord) -> String {
    let color = ansi_color(record.level);
    let header = format!(
        "[{}] [{}] {:<7} {}",
        record.timestamp,
        record.scope,
        record.level.label(),
        record.message
    );

    let mut lines = vec![header.color(color).bold().to_string()];
    if let Some(data) = record.non_empty_data() {
        lines.push(format!("  {}", "Data:".dimmed()));
        for (key, value) in data {
            let text = value_text(value).replace('\n', "\n    ");
            lines.push(format!("    {}: {}", key.bold(), text));
        }
    }
    lines.join("\n")
}

fn ansi_color(level: LogLevel) -> AnsiColors {
    match level {
        LogLevel::Debug => AnsiColors::BrightBlack,
        LogLevel::Info => AnsiColors::Blue,
        LogLevel::Warn => AnsiColors::Yellow,
        LogLevel::Error => AnsiColors::Red,
        LogLevel::Success => AnsiColors::Green,
    }
}

/// Strings print raw, containers print as pretty JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::observability::logger::record::log_data;

    fn record(level: LogLevel, data: Option<serde_json::Value>) -> LogRecord {
        LogRecord {
            timestamp: "12:00:00.007".to_string(),
            level,
            scope: "shop".to_string(),
            message: "API Request: GET /api/cart/".to_string(),
            data: data.and_then(log_data),
        }
    }

    #[test]
    fn ansi_header_uses_level_color() {
        let cases = [
            (LogLevel::Debug, "\u{1b}[90m"),
            (LogLevel::Info, "\u{1b}[34m"),
            (LogLevel::Warn, "\u{1b}[33m"),
            (LogLevel::Error, "\u{1b}[31m"),
            (LogLevel::Success, "\u{1b}[32m"),
        ];
        for (level, code) in cases {
            let RenderedRecord::Ansi(text) = render(RenderTarget::AnsiTerminal, &record(level, None))
            else {
                panic!("expected ansi output");
            };
            assert!(text.contains(code), "{level} should use {code:?}: {text:?}");
            assert!(text.contains("[12:00:00.007] [shop]"));
            assert!(!text.contains("Data:"));
            assert_eq!(text.lines().count(), 1);
        }
    }

    #[test]
    fn ansi_data_lines_are_indented() {
        let rendered = render(
            RenderTarget::AnsiTerminal,
            &record(LogLevel::Info, Some(json!({"status": 200, "body": {"id": 1}}))),
        );
        let text = rendered.to_text();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[1].contains("Data:"));
        assert!(lines[2].starts_with("    ") && lines[2].contains("body") && lines[2].contains('{'));
        assert!(lines.iter().any(|l| l.starts_with("    ") && l.contains("\"id\": 1")));
        assert!(lines.iter().any(|l| l.contains("status") && l.ends_with("200")));
    }

    #[test]
    fn console_group_has_styled_header_and_data_section() {
        let rendered = render(
            RenderTarget::StyledConsole,
            &record(LogLevel::Warn, Some(json!({"headers": {"accept": "*/*"}, "status": 404}))),
        );
        let RenderedRecord::Styled(group) = rendered else {
            panic!("expected styled output");
        };

        assert_eq!(group.header.format, "%c[12:00:00.007] [shop] API Request: GET /api/cart/");
        assert_eq!(group.header.args, vec!["color: #F59E0B; font-weight: bold;".to_string()]);
        assert_eq!(group.entries[0].format, "%cData:");
        assert_eq!(group.entries[1].format, "  headers:");
        assert_eq!(group.entries[1].args[0], "{\n  \"accept\": \"*/*\"\n}");
        assert_eq!(group.entries[2].format, "  status:");
        assert_eq!(group.entries[2].args[0], "404");
    }

    #[test]
    fn console_group_without_data_has_no_entries() {
        let rendered = render(RenderTarget::StyledConsole, &record(LogLevel::Info, Some(json!({}))));
        let RenderedRecord::Styled(group) = rendered else {
            panic!("expected styled output");
        };
        assert!(group.entries.is_empty());
    }

    #[test]
    fn styled_text_is_a_json_line() {
        let text = render(RenderTarget::StyledConsole, &record(LogLevel::Error, None)).to_text();
        let parsed: ConsoleGroup = serde_json::from_str(&text).unwrap();
        assert!(parsed.header.args[0].contains("#EF4444"));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn render_target_parses_aliases() {
        assert_eq!("console".parse::<RenderTarget>().unwrap(), RenderTarget::StyledConsole);
        assert_eq!("Terminal".parse::<RenderTarget>().unwrap(), RenderTarget::AnsiTerminal);
        assert!("html".parse::<RenderTarget>().is_err());
        assert_eq!(RenderTarget::default(), RenderTarget::AnsiTerminal);
    }
}
