//! 交易所会话
//!
//! 创建时校验密钥并做一次连通性测试（拉取账户信息），失败则直接返回错误。

use tracing::{debug, error, info, warn};

use crate::app_config::exchange::ExchangeConfig;
use crate::error::{ApiError, AppResult};
use crate::trading::binance::{AccountInfo, BinanceClient, FuturesApi, SymbolInfo};

pub struct ExchangeClient<A: FuturesApi = BinanceClient> {
    api: A,
}

impl ExchangeClient<BinanceClient> {
    /// 连接 Binance 合约测试网
    pub async fn new(config: &ExchangeConfig) -> AppResult<Self> {
        let api = BinanceClient::new(config)?;
        info!("Initializing Binance Futures client for {}...", api.base_url());
        Self::connect(api).await
    }
}

impl<A: FuturesApi> ExchangeClient<A> {
    pub async fn connect(api: A) -> AppResult<Self> {
        let client = ExchangeClient { api };
        if let Err(err) = client.test_connection().await {
            error!("Failed to initialize Binance client: {}", err);
            return Err(err);
        }
        info!("Binance client initialized successfully");
        Ok(client)
    }

    async fn test_connection(&self) -> AppResult<()> {
        match self.api.account().await {
            Ok(account) => {
                info!(
                    "✓ Connection test successful. Account balance: {} USDT",
                    account
                        .total_wallet_balance()
                        .unwrap_or_else(|| "N/A".to_string())
                );
                Ok(())
            }
            Err(err) => {
                log_api_error("during connection test", &err);
                Err(err.into())
            }
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 查找交易对信息，找不到返回 None
    pub async fn get_symbol_info(&self, symbol: &str) -> AppResult<Option<SymbolInfo>> {
        debug!("Fetching symbol info for {}", symbol);
        let exchange_info = match self.api.exchange_info().await {
            Ok(info) => info,
            Err(err) => {
                log_api_error("fetching symbol info", &err);
                return Err(err.into());
            }
        };

        match exchange_info.find_symbol(symbol) {
            Some(info) => {
                debug!("Symbol info retrieved for {}", symbol);
                Ok(Some(info.clone()))
            }
            None => {
                warn!("Symbol {} not found in exchange info", symbol);
                Ok(None)
            }
        }
    }

    pub async fn get_account_balance(&self) -> AppResult<AccountInfo> {
        debug!("Fetching account balance");
        match self.api.account().await {
            Ok(account) => {
                info!(
                    "Account balance: {} USDT",
                    account
                        .total_wallet_balance()
                        .unwrap_or_else(|| "N/A".to_string())
                );
                Ok(account)
            }
            Err(err) => {
                log_api_error("fetching account balance", &err);
                Err(err.into())
            }
        }
    }
}

pub(crate) fn log_api_error(context: &str, err: &ApiError) {
    match err {
        ApiError::Rejected { status, code, msg } => {
            error!(
                "API Error {}: status={} code={} msg={}",
                context, status, code, msg
            );
        }
        ApiError::Http { status, body } => {
            error!("HTTP Error {}: status={} body={}", context, status, body);
        }
        other => error!("Error {}: {}", context, other),
    }
}
