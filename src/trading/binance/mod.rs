use async_trait::async_trait;

pub mod account;
pub mod binance_client;
pub mod public_data;
pub mod trade;

pub use account::AccountInfo;
pub use binance_client::BinanceClient;
pub use public_data::{ExchangeInfo, SymbolInfo};
pub use trade::{NewOrderParams, OrderResponse};

use crate::error::ApiError;

/// 合约接口抽象，服务层只依赖这个 trait
#[async_trait]
pub trait FuturesApi: Send + Sync {
    /// 账户信息（需签名）
    async fn account(&self) -> Result<AccountInfo, ApiError>;

    /// 全部交易对信息
    async fn exchange_info(&self) -> Result<ExchangeInfo, ApiError>;

    /// 下单
    async fn new_order(&self, params: &NewOrderParams) -> Result<OrderResponse, ApiError>;
}

#[async_trait]
impl FuturesApi for BinanceClient {
    async fn account(&self) -> Result<AccountInfo, ApiError> {
        self.futures_account().await
    }

    async fn exchange_info(&self) -> Result<ExchangeInfo, ApiError> {
        self.futures_exchange_info().await
    }

    async fn new_order(&self, params: &NewOrderParams) -> Result<OrderResponse, ApiError> {
        self.futures_create_order(params).await
    }
}
