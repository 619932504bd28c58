use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::trading::binance::binance_client::BinanceClient;
use crate::trading::model::{OrderType, Side, TimeInForce};

/// 下单请求参数 POST /fapi/v1/order
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderParams {
    /// 交易对，如 BTCUSDT
    pub symbol: String,
    /// BUY / SELL
    pub side: Side,
    /// MARKET / LIMIT
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// 仅限价单需要
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl NewOrderParams {
    pub fn market(symbol: &str, side: Side, quantity: Decimal) -> Self {
        NewOrderParams {
            symbol: symbol.to_string(),
            side,
            order_type: OrderType::Market,
            time_in_force: None,
            quantity: quantity.normalize(),
            price: None,
        }
    }

    pub fn limit(symbol: &str, side: Side, quantity: Decimal, price: Decimal) -> Self {
        NewOrderParams {
            symbol: symbol.to_string(),
            side,
            order_type: OrderType::Limit,
            time_in_force: Some(TimeInForce::Gtc),
            quantity: quantity.normalize(),
            price: Some(price.normalize()),
        }
    }

    pub fn to_query(&self) -> Result<String, ApiError> {
        Ok(serde_urlencoded::to_string(self)?)
    }
}

/// 下单响应，原样透传交易所返回的 JSON 对象
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct OrderResponse(pub Map<String, Value>);

impl OrderResponse {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// 字段的展示文本，缺失时为 N/A
    pub fn field(&self, key: &str) -> String {
        self.get(key).map(value_text).unwrap_or_else(|| "N/A".to_string())
    }

    pub fn order_id(&self) -> Option<i64> {
        self.get("orderId").and_then(Value::as_i64)
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    /// avgPrice 为 0 表示尚未成交
    pub fn avg_price(&self) -> Option<String> {
        let avg = self.get("avgPrice").map(value_text)?;
        match avg.parse::<Decimal>() {
            Ok(v) if v.is_zero() => None,
            _ => Some(avg),
        }
    }

    /// updateTime 优先，否则 transactTime
    pub fn timestamp(&self) -> String {
        self.get("updateTime")
            .or_else(|| self.get("transactTime"))
            .map(value_text)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// 只接受 JSON 对象
impl TryFrom<Value> for OrderResponse {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl BinanceClient {
    ///下单
    pub async fn futures_create_order(
        &self,
        params: &NewOrderParams,
    ) -> Result<OrderResponse, ApiError> {
        let path = "/fapi/v1/order";
        let query = params.to_query()?;
        debug!("send place order binance_request params:{}", query);
        self.send_signed(Method::POST, path, &query).await
    }
}
