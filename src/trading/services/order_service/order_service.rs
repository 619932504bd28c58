use rust_decimal::Decimal;
use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::trading::binance::{FuturesApi, NewOrderParams, OrderResponse};
use crate::trading::model::{OrderRequest, OrderType, Side};
use crate::trading::services::exchange_service::{log_api_error, ExchangeClient};

const BANNER: &str = "============================================================";

/// 负责下单，每次调用只提交一笔订单，不重试
pub struct OrderManager<'a, A: FuturesApi> {
    client: &'a ExchangeClient<A>,
}

impl<'a, A: FuturesApi> OrderManager<'a, A> {
    pub fn new(client: &'a ExchangeClient<A>) -> Self {
        info!("OrderManager initialized");
        Self { client }
    }

    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> AppResult<OrderResponse> {
        let params = NewOrderParams::market(symbol, side, quantity);
        log_order_request(&params);
        info!("Placing MARKET {} order for {} {}...", side, quantity, symbol);
        self.submit(&params).await
    }

    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    ) -> AppResult<OrderResponse> {
        let params = NewOrderParams::limit(symbol, side, quantity, price);
        log_order_request(&params);
        info!(
            "Placing LIMIT {} order for {} {} at {}...",
            side, quantity, symbol, price
        );
        self.submit(&params).await
    }

    /// 按订单类型分发
    pub async fn place_order(&self, request: &OrderRequest) -> AppResult<OrderResponse> {
        match request.order_type {
            OrderType::Market => {
                self.place_market_order(&request.symbol, request.side, request.quantity)
                    .await
            }
            OrderType::Limit => {
                let price = request
                    .price
                    .ok_or_else(|| AppError::config("Price is required for LIMIT orders"))?;
                self.place_limit_order(&request.symbol, request.side, request.quantity, price)
                    .await
            }
        }
    }

    async fn submit(&self, params: &NewOrderParams) -> AppResult<OrderResponse> {
        match self.client.api().new_order(params).await {
            Ok(response) => {
                log_order_response(&response);
                info!("{} order placed successfully!", params.order_type);
                Ok(response)
            }
            Err(err) => {
                log_api_error(&format!("placing {} order", params.order_type), &err);
                error!("Full error: {:?}", err);
                Err(err.into())
            }
        }
    }
}

fn log_order_request(params: &NewOrderParams) {
    info!("{}", BANNER);
    info!("ORDER REQUEST SUMMARY");
    info!("{}", BANNER);
    info!("Symbol:       {}", params.symbol);
    info!("Side:         {}", params.side);
    info!("Order Type:   {}", params.order_type);
    info!("Quantity:     {}", params.quantity);
    if let Some(price) = params.price {
        info!("Price:        {}", price);
    }
    info!("{}", BANNER);
}

fn log_order_response(response: &OrderResponse) {
    info!("{}", BANNER);
    info!("ORDER RESPONSE DETAILS");
    info!("{}", BANNER);
    info!("Order ID:     {}", response.field("orderId"));
    info!("Status:       {}", response.field("status"));
    info!("Symbol:       {}", response.field("symbol"));
    info!("Side:         {}", response.field("side"));
    info!("Type:         {}", response.field("type"));
    info!("Quantity:     {}", response.field("origQty"));
    if response.contains("executedQty") {
        info!("Executed Qty: {}", response.field("executedQty"));
    }
    if let Some(avg_price) = response.avg_price() {
        info!("Avg Price:    {}", avg_price);
    } else if response.contains("price") {
        info!("Price:        {}", response.field("price"));
    }
    if response.contains("cumQuote") {
        info!("Cum Quote:    {}", response.field("cumQuote"));
    }
    info!("Time:         {}", response.timestamp());
    info!("{}", BANNER);
}
