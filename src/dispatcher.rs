//! 日志分发：构造记录、附加字段，并通过每次调用新建的订阅者输出。

use std::fmt::Display;
use std::io;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{FATAL_EXIT_CODE, LogConfig};
use crate::formatter::TextFormatter;
use crate::record::LogRecord;
use crate::severity::Severity;

/// Emits severity-tagged records as colored text or JSON.
///
/// Every emission builds its own subscriber and installs it as the thread's
/// default only while the event is recorded, so dispatchers share no state.
///
/// Bodies are rendered through `Display` before emission: in JSON mode the
/// `body` field is always a string (`17` becomes `"17"`).
#[derive(Clone, Debug)]
pub struct Dispatcher<W = fn() -> io::Stdout> {
    config: LogConfig,
    make_writer: W,
}

impl Dispatcher {
    /// 输出到标准输出。
    pub fn new(config: LogConfig) -> Self {
        Self {
            config,
            make_writer: io::stdout,
        }
    }

    pub fn from_env() -> Self {
        Self::new(LogConfig::from_env())
    }
}

impl<W> Dispatcher<W>
where
    W: for<'a> MakeWriter<'a> + Clone + Send + Sync + 'static,
{
    pub fn with_writer(config: LogConfig, make_writer: W) -> Self {
        Self {
            config,
            make_writer,
        }
    }

    pub fn config(&self) -> LogConfig {
        self.config
    }

    /// 仅在调试模式开启时输出。
    pub fn debug(&self, tag: &str, body: impl Display, location: &str) {
        self.emit(&LogRecord::new(Severity::Debug, tag, body).with_location(location));
    }

    pub fn info(&self, tag: &str, body: impl Display) {
        self.emit(&LogRecord::new(Severity::Info, tag, body));
    }

    pub fn warn(&self, tag: &str, body: impl Display) {
        self.emit(&LogRecord::new(Severity::Warning, tag, body));
    }

    pub fn error(&self, tag: &str, body: impl Display, location: &str) {
        self.emit(&LogRecord::new(Severity::Error, tag, body).with_location(location));
    }

    /// 输出致命记录后以非零状态退出进程。
    pub fn fatal(&self, tag: &str, body: impl Display, location: &str) -> ! {
        self.emit(&LogRecord::new(Severity::Fatal, tag, body).with_location(location));
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Dispatches on a textual severity. Unrecognized names are logged at
    /// INFO with the plain message and no structured fields.
    pub fn log_raw(&self, severity: &str, tag: &str, body: impl Display, location: &str) {
        match severity.parse::<Severity>() {
            Ok(severity) => self.emit(&LogRecord::new(severity, tag, body).with_location(location)),
            Err(_) => {
                let message = format!("[{tag}] {body}");
                self.with_subscriber(|| info!("{message}"));
            }
        }
    }

    /// Formats and writes one record. Never terminates the process, FATAL included.
    pub fn emit(&self, record: &LogRecord) {
        self.with_subscriber(|| emit_event(record));
    }

    fn max_level(&self) -> LevelFilter {
        if self.config.debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }

    fn with_subscriber(&self, emit: impl FnOnce()) {
        let builder = tracing_subscriber::fmt()
            .with_max_level(self.max_level())
            .with_writer(self.make_writer.clone());
        if self.config.json {
            let subscriber = builder.json().flatten_event(true).finish();
            tracing::subscriber::with_default(subscriber, emit);
        } else {
            let subscriber = builder.event_format(TextFormatter::default()).finish();
            tracing::subscriber::with_default(subscriber, emit);
        }
    }
}

fn emit_event(record: &LogRecord) {
    let message = record.message();
    let severity = record.severity.as_str();
    let tag = record.tag.as_str();
    let body = record.body.as_str();
    let caller = record.caller();
    match record.severity {
        Severity::Debug => debug!(severity, tag, body, caller, "{message}"),
        Severity::Info => info!(severity, tag, body, caller, "{message}"),
        Severity::Warning => warn!(severity, tag, body, caller, "{message}"),
        Severity::Error | Severity::Fatal => error!(severity, tag, body, caller, "{message}"),
    }
}
