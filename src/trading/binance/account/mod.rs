/*获取合约账户信息*/
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::trading::binance::binance_client::BinanceClient;
use crate::trading::binance::trade::value_text;

/// 账户信息 GET /fapi/v2/account，完整保留交易所返回的字段
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct AccountInfo(pub Map<String, Value>);

impl AccountInfo {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(value_text)
    }

    /// 钱包总余额（USDT）
    pub fn total_wallet_balance(&self) -> Option<String> {
        self.text("totalWalletBalance")
    }

    pub fn available_balance(&self) -> Option<String> {
        self.text("availableBalance")
    }

    pub fn total_unrealized_profit(&self) -> Option<String> {
        self.text("totalUnrealizedProfit")
    }
}

/// 只接受 JSON 对象
impl TryFrom<Value> for AccountInfo {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

impl BinanceClient {
    pub async fn futures_account(&self) -> Result<AccountInfo, ApiError> {
        self.send_signed(Method::GET, "/fapi/v2/account", "").await
    }
}
