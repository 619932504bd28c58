use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// 读取可选环境变量，空白值视为未设置
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 解析配置值；未设置时返回默认值，无法解析时报配置错误
pub fn parse_or_default<T: FromStr>(key: &str, value: Option<&str>, default: T) -> AppResult<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{} has invalid value {:?}", key, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back() {
        let key = "BINANCE_FUTURES_BOT_TEST_UNSET_KEY";
        assert_eq!(env_opt(key), None);
        assert_eq!(parse_or_default(key, None, 42u64).unwrap(), 42);
    }

    #[test]
    fn test_unparseable_value_is_config_error() {
        let err = parse_or_default("BINANCE_RECV_WINDOW_MS", Some("abc"), 5000u64).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("BINANCE_RECV_WINDOW_MS"));
        assert!(parse_or_default("BINANCE_HTTP_TIMEOUT_SECS", Some("-1"), 10u64).is_err());
        assert_eq!(parse_or_default("K", Some(" 7 "), 10u64).unwrap(), 7);
    }
}
