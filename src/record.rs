//! 单次日志记录及其消息文本。

use std::fmt;

use crate::severity::Severity;

/// A log record built per call and discarded after emission.
///
/// The body is kept in its `Display` rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    pub tag: String,
    pub body: String,
    pub location: Option<String>,
}

impl LogRecord {
    pub fn new(severity: Severity, tag: impl Into<String>, body: impl fmt::Display) -> Self {
        Self {
            severity,
            tag: tag.into(),
            body: body.to_string(),
            location: None,
        }
    }

    /// 附加调用位置。仅 DEBUG/ERROR/FATAL 保留位置，空字符串视为缺失。
    pub fn with_location(mut self, location: &str) -> Self {
        let keeps_location = matches!(
            self.severity,
            Severity::Debug | Severity::Error | Severity::Fatal
        );
        self.location = (keeps_location && !location.is_empty()).then(|| location.to_string());
        self
    }

    /// `caller` 字段的值；位置为空时不附加该字段。
    pub fn caller(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// 渲染 `"[tag] body"`，ERROR/FATAL 追加 `" [location]"`。
    pub fn message(&self) -> String {
        let entry = format!("[{}] {}", self.tag, self.body);
        if self.severity.appends_location() {
            format!("{} [{}]", entry, self.caller().unwrap_or_default())
        } else {
            entry
        }
    }
}
