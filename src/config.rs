//! Output configuration and environment flag names.

pub const JSON_ENV: &str = "WLOGRUS_JSON";
pub const DEBUG_ENV: &str = "WLOGRUS_DEBUG";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const FATAL_EXIT_CODE: i32 = 1;

/// 日志输出配置：JSON 编码与调试级别开关。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub json: bool,
    pub debug: bool,
}

impl LogConfig {
    pub fn new(json: bool, debug: bool) -> Self {
        Self { json, debug }
    }

    /// 从进程环境变量读取配置，仅当取值恰好为 `"true"` 时开启。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数读取配置，便于在不修改进程环境的情况下测试。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = |key: &str| lookup(key).is_some_and(|value| value == "true");
        Self {
            json: enabled(JSON_ENV),
            debug: enabled(DEBUG_ENV),
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Default filter directive when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn flags_default_to_off() {
        assert_eq!(LogConfig::from_lookup(lookup_from(&[])), LogConfig::default());
    }

    #[test]
    fn only_literal_true_enables_flags() {
        let config = LogConfig::from_lookup(lookup_from(&[(JSON_ENV, "true"), (DEBUG_ENV, "1")]));
        assert!(config.json);
        assert!(!config.debug);

        let config = LogConfig::from_lookup(lookup_from(&[(JSON_ENV, "TRUE"), (DEBUG_ENV, "true")]));
        assert!(!config.json);
        assert!(config.debug);
    }

    #[test]
    fn default_directive_follows_debug_flag() {
        assert_eq!(LogConfig::default().default_directive(), "info");
        assert_eq!(LogConfig::default().with_debug(true).default_directive(), "debug");
    }
}
