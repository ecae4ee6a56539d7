//! 文本格式化：时间戳、彩色大写级别与消息。

use chrono::Local;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::config::TIMESTAMP_FORMAT;
use crate::severity::Severity;

/// Level shown in a text line. Adds TRACE, which has no [`Severity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelLabel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LevelLabel {
    /// 根据事件级别与 `severity` 字段确定显示级别；FATAL 只能通过字段识别。
    pub fn resolve(level: &Level, severity: Option<&str>) -> Self {
        if severity == Some(Severity::Fatal.as_str()) {
            return LevelLabel::Fatal;
        }
        match *level {
            Level::TRACE => LevelLabel::Trace,
            Level::DEBUG => LevelLabel::Debug,
            Level::INFO => LevelLabel::Info,
            Level::WARN => LevelLabel::Warning,
            Level::ERROR => LevelLabel::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LevelLabel::Trace => "TRACE",
            LevelLabel::Debug => "DEBUG",
            LevelLabel::Info => "INFO",
            LevelLabel::Warning => "WARNING",
            LevelLabel::Error => "ERROR",
            LevelLabel::Fatal => "FATAL",
        }
    }

    /// ANSI SGR code for the level.
    pub fn color(self) -> u8 {
        match self {
            LevelLabel::Trace | LevelLabel::Debug => 44,
            LevelLabel::Warning => 33,
            LevelLabel::Error => 31,
            LevelLabel::Fatal => 41,
            LevelLabel::Info => 36,
        }
    }
}

/// Renders `"<timestamp> [<colored LEVEL>] <message>"`, one line per event.
///
/// Colors are always written, whether or not the writer is a terminal.
#[derive(Clone, Debug)]
pub struct TextFormatter {
    timestamp_format: String,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::with_timestamp_format(TIMESTAMP_FORMAT)
    }
}

impl TextFormatter {
    pub fn with_timestamp_format(format: impl Into<String>) -> Self {
        Self {
            timestamp_format: format.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for TextFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let label = LevelLabel::resolve(event.metadata().level(), visitor.severity.as_deref());
        writeln!(
            writer,
            "{} [\x1b[{}m{}\x1b[0m] {}",
            Local::now().format(&self.timestamp_format),
            label.color(),
            label.as_str(),
            visitor.message
        )
    }
}

/// 只收集文本行需要的 `message` 与 `severity` 字段。
#[derive(Default)]
struct LineVisitor {
    message: String,
    severity: Option<String>,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "severity" => self.severity = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "severity" => self.severity = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CapturedOutput;
    use chrono::NaiveDateTime;
    use tracing::{error, info, warn};

    fn render(emit: impl FnOnce()) -> String {
        let output = CapturedOutput::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_writer(output.clone())
            .event_format(TextFormatter::default())
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        output.contents()
    }

    #[test]
    fn colors_match_levels() {
        assert_eq!(LevelLabel::Trace.color(), 44);
        assert_eq!(LevelLabel::Debug.color(), 44);
        assert_eq!(LevelLabel::Info.color(), 36);
        assert_eq!(LevelLabel::Warning.color(), 33);
        assert_eq!(LevelLabel::Error.color(), 31);
        assert_eq!(LevelLabel::Fatal.color(), 41);
    }

    #[test]
    fn fatal_is_recognized_from_severity_field() {
        assert_eq!(LevelLabel::resolve(&Level::ERROR, Some("FATAL")), LevelLabel::Fatal);
        assert_eq!(LevelLabel::resolve(&Level::ERROR, Some("ERROR")), LevelLabel::Error);
        assert_eq!(LevelLabel::resolve(&Level::WARN, None), LevelLabel::Warning);
    }

    #[test]
    fn renders_timestamp_level_and_message() {
        let line = render(|| info!("[startup] server ready"));
        assert!(line.ends_with(" [\x1b[36mINFO\x1b[0m] [startup] server ready\n"), "{line:?}");
        let timestamp = &line[..19];
        assert!(NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok(), "{timestamp}");
    }

    #[test]
    fn warning_label_is_spelled_out() {
        let line = render(|| warn!("low disk"));
        assert!(line.contains("[\x1b[33mWARNING\x1b[0m] low disk"), "{line:?}");
    }

    #[test]
    fn fatal_severity_overrides_error_label() {
        let line = render(|| error!(severity = "FATAL", "going down"));
        assert!(line.contains("[\x1b[41mFATAL\x1b[0m] going down"), "{line:?}");
    }

    #[test]
    fn extra_fields_are_not_rendered_in_text_mode() {
        let line = render(|| info!(tag = "db", body = "up", "[db] up"));
        assert!(line.ends_with("] [db] up\n"), "{line:?}");
        assert!(!line.contains("tag="));
    }
}
