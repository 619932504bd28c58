use std::fmt;

use crate::app_config::env::{env_opt, parse_or_default};
use crate::error::{AppError, AppResult};

pub const FUTURES_TESTNET_URL: &str = "https://testnet.binancefuture.com";
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Binance 允许的 recvWindow 上限
pub const MAX_RECV_WINDOW_MS: u64 = 60_000;

/// 交易所连接配置
#[derive(Clone)]
pub struct ExchangeConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub base_url: String,
    pub recv_window_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            base_url: FUTURES_TESTNET_URL.to_string(),
            recv_window_ms: DEFAULT_RECV_WINDOW_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ExchangeConfig {
    /// 从环境变量读取（调用方负责先加载 .env）
    pub fn from_env() -> AppResult<Self> {
        Self::from_vars(env_opt)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let recv_window = var("BINANCE_RECV_WINDOW_MS");
        let timeout = var("BINANCE_HTTP_TIMEOUT_SECS");
        let config = Self {
            api_key: var("BINANCE_API_KEY"),
            api_secret: var("BINANCE_API_SECRET"),
            base_url: var("BINANCE_FUTURES_URL").unwrap_or_else(|| FUTURES_TESTNET_URL.to_string()),
            recv_window_ms: parse_or_default(
                "BINANCE_RECV_WINDOW_MS",
                recv_window.as_deref(),
                DEFAULT_RECV_WINDOW_MS,
            )?,
            timeout_secs: parse_or_default(
                "BINANCE_HTTP_TIMEOUT_SECS",
                timeout.as_deref(),
                DEFAULT_TIMEOUT_SECS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 检查取值范围，密钥在 credentials() 中单独检查
    pub fn validate(&self) -> AppResult<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(AppError::config(format!(
                "BINANCE_FUTURES_URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.recv_window_ms == 0 || self.recv_window_ms > MAX_RECV_WINDOW_MS {
            return Err(AppError::config(format!(
                "BINANCE_RECV_WINDOW_MS must be between 1 and {}, got {}",
                MAX_RECV_WINDOW_MS, self.recv_window_ms
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config(
                "BINANCE_HTTP_TIMEOUT_SECS must be greater than 0",
            ));
        }
        Ok(())
    }

    /// 命令行显式传入的密钥优先于环境变量
    pub fn with_credentials(mut self, api_key: Option<String>, api_secret: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        if let Some(secret) = api_secret {
            self.api_secret = Some(secret);
        }
        self
    }

    pub fn credentials(&self) -> AppResult<Credentials> {
        let api_key = non_blank(self.api_key.as_deref());
        let api_secret = non_blank(self.api_secret.as_deref());
        match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) => Ok(Credentials {
                api_key: api_key.to_string(),
                api_secret: api_secret.to_string(),
            }),
            _ => Err(AppError::config(
                "API credentials not found. Please set BINANCE_API_KEY and BINANCE_API_SECRET \
                 in .env file or pass --api-key/--api-secret",
            )),
        }
    }
}

impl fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("recv_window_ms", &self.recv_window_ms)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// API 密钥对
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .finish()
    }
}
