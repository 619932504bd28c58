use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::trading::binance::binance_client::BinanceClient;
use crate::trading::binance::trade::value_text;

/// 交易规则 GET /fapi/v1/exchangeInfo，只关心 symbols
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    /// 区分大小写的线性查找
    pub fn find_symbol(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }
}

/// 单个交易对信息，其余字段原样保留
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SymbolInfo {
    pub fn field(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(value_text)
    }

    /// TRADING / PENDING_TRADING / ...
    pub fn status(&self) -> Option<String> {
        self.field("status")
    }

    pub fn base_asset(&self) -> Option<String> {
        self.field("baseAsset")
    }

    pub fn quote_asset(&self) -> Option<String> {
        self.field("quoteAsset")
    }

    pub fn price_precision(&self) -> Option<u64> {
        self.fields.get("pricePrecision").and_then(Value::as_u64)
    }

    pub fn quantity_precision(&self) -> Option<u64> {
        self.fields.get("quantityPrecision").and_then(Value::as_u64)
    }
}

impl BinanceClient {
    /**
    获取合约交易规则和交易对信息
    返回全部交易对，不支持按 symbol 过滤
    **/
    pub async fn futures_exchange_info(&self) -> Result<ExchangeInfo, ApiError> {
        self.send_public(Method::GET, "/fapi/v1/exchangeInfo", "").await
    }
}
