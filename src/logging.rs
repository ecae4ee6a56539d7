//! 全局日志初始化：支持 `RUST_LOG` 覆盖，默认级别由调试开关决定。

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;
use crate::formatter::TextFormatter;

/// 安装进程级 tracing 订阅者，使宿主程序的 `tracing` 宏使用相同格式输出到标准输出。
///
/// Panics if a global subscriber is already set; see [`try_init_logging`].
pub fn init_logging(config: &LogConfig) {
    build_subscriber(config).init();
}

pub fn try_init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    build_subscriber(config).try_init()
}

fn build_subscriber(config: &LogConfig) -> impl SubscriberInitExt {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));
    let json_layer = config
        .json
        .then(|| fmt::layer().json().flatten_event(true));
    let text_layer = (!config.json).then(|| fmt::layer().event_format(TextFormatter::default()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported_not_panicking() {
        let config = LogConfig::default();
        let _ = try_init_logging(&config);
        assert!(try_init_logging(&config).is_err());
    }
}
