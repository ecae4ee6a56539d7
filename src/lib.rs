//! Severity-tagged logging over `tracing`.
//!
//! Records are rendered either as a colored console line
//! (`2024-05-01 12:00:00 [INFO] [startup] server ready`) or, when
//! `WLOGRUS_JSON=true`, as one JSON object per line with `severity`, `tag`,
//! `body` and `caller` fields. `WLOGRUS_DEBUG=true` enables DEBUG records.
//!
//! The free functions re-read the environment on every call. Use
//! [`Dispatcher`] to pass an explicit [`LogConfig`] instead.

pub mod caller;
pub mod config;
pub mod dispatcher;
pub mod formatter;
pub mod logging;
pub mod record;
pub mod severity;

#[cfg(test)]
mod test_support;

use std::fmt::Display;

pub use caller::{
    BacktraceResolver, CallSite, CallerResolver, caller_info, caller_info_at, caller_info_default,
};
pub use config::LogConfig;
pub use dispatcher::Dispatcher;
pub use formatter::TextFormatter;
pub use logging::{init_logging, try_init_logging};
pub use record::LogRecord;
pub use severity::Severity;

/// 调试信息，仅在 `WLOGRUS_DEBUG=true` 时输出。
pub fn debug(tag: &str, body: impl Display, location: &str) {
    Dispatcher::from_env().debug(tag, body, location);
}

pub fn info(tag: &str, body: impl Display) {
    Dispatcher::from_env().info(tag, body);
}

pub fn warn(tag: &str, body: impl Display) {
    Dispatcher::from_env().warn(tag, body);
}

/// 错误信息，位置通常来自 [`here!`] 或 [`caller_info`]。
pub fn error(tag: &str, body: impl Display, location: &str) {
    Dispatcher::from_env().error(tag, body, location);
}

/// 输出致命信息后退出进程。
pub fn fatal(tag: &str, body: impl Display, location: &str) -> ! {
    Dispatcher::from_env().fatal(tag, body, location)
}
