use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{Cell, Row, Table};

use crate::error::{AppError, ValidationError};
use crate::trading::binance::{AccountInfo, OrderResponse, SymbolInfo};
use crate::trading::model::OrderRequest;

/// 单元格加边框，模拟面板
pub fn panel(title: &str, body: &[String], style: &str) -> Table {
    let mut content = title.to_string();
    if !body.is_empty() {
        content.push_str("\n\n");
        content.push_str(&body.join("\n"));
    }
    let mut table = Table::new();
    table.set_format(*FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![Cell::new(&content).style_spec(style)]));
    table
}

pub fn order_summary_table(request: &OrderRequest) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("Parameter").style_spec("bFm"),
        Cell::new("Value").style_spec("bFm"),
    ]));
    let mut add = |name: &str, value: String| {
        table.add_row(Row::new(vec![
            Cell::new(name).style_spec("Fc"),
            Cell::new(&value).style_spec("Fy"),
        ]));
    };
    add("Symbol", request.symbol.clone());
    add("Side", request.side.to_string());
    add("Type", request.order_type.to_string());
    add("Quantity", request.quantity.to_string());
    if let Some(price) = request.price {
        add("Price", price.to_string());
    }
    table
}

pub fn order_success_panel(response: &OrderResponse) -> Table {
    panel(
        "✓ Order Placed Successfully!",
        &[
            format!("Order ID: {}", response.field("orderId")),
            format!("Status: {}", response.field("status")),
            format!("Executed Qty: {}", response.field("executedQty")),
        ],
        "bFg",
    )
}

pub fn balance_panel(account: &AccountInfo) -> Table {
    let na = || "N/A".to_string();
    let mut body = vec![format!(
        "{} USDT",
        account.total_wallet_balance().unwrap_or_else(na)
    )];
    if let Some(available) = account.available_balance() {
        body.push(format!("Available: {} USDT", available));
    }
    if let Some(upnl) = account.total_unrealized_profit() {
        body.push(format!("Unrealized PnL: {} USDT", upnl));
    }
    panel("Total Wallet Balance", &body, "bFg")
}

pub fn symbol_panel(symbol: &str, info: Option<&SymbolInfo>) -> Table {
    let Some(info) = info else {
        return panel(
            &format!("Symbol {} not found", symbol),
            &["Symbol lookup is case-sensitive, e.g. BTCUSDT".to_string()],
            "bFy",
        );
    };
    let na = || "N/A".to_string();
    let precision = |p: Option<u64>| p.map(|v| v.to_string()).unwrap_or_else(na);
    panel(
        &info.symbol,
        &[
            format!("Status: {}", info.status().unwrap_or_else(na)),
            format!("Base Asset: {}", info.base_asset().unwrap_or_else(na)),
            format!("Quote Asset: {}", info.quote_asset().unwrap_or_else(na)),
            format!("Price Precision: {}", precision(info.price_precision())),
            format!("Quantity Precision: {}", precision(info.quantity_precision())),
        ],
        "bFc",
    )
}

/// 按错误类别生成提示面板
pub fn error_panel(err: &AppError) -> Table {
    let title = match err {
        AppError::Validation(_) => "✗ Validation Error",
        AppError::Configuration(_) => "✗ Configuration Error",
        AppError::RemoteApi(_) => "✗ Error",
    };
    let mut body = vec![err.to_string()];
    if let AppError::RemoteApi(api_err) = err {
        if let Some(hint) = api_err.code().and_then(|c| c.hint()) {
            body.push(format!("Hint: {}", hint));
        }
    }
    if let AppError::Validation(ValidationError::PriceRequired) = err {
        body.push("Hint: pass --price for LIMIT orders".to_string());
    }
    panel(title, &body, "bFr")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::trading::model::{OrderType, Side};
    use reqwest::StatusCode;
    use rust_decimal::Decimal;

    #[test]
    fn test_summary_skips_absent_price() {
        let request = OrderRequest {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            order_type: OrderType::Market,
            quantity: Decimal::new(1, 3),
            price: None,
        };
        let table = order_summary_table(&request);
        assert_eq!(table.len(), 4);
        assert!(!table.to_string().contains("Price"));
    }

    #[test]
    fn test_error_panel_includes_hint() {
        let err = AppError::RemoteApi(ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            code: -1121,
            msg: "Invalid symbol.".to_string(),
        });
        let rendered = error_panel(&err).to_string();
        assert!(rendered.contains("✗ Error"));
        assert!(rendered.contains("Invalid symbol."));
        assert!(rendered.contains("Hint:"));
    }

    #[test]
    fn test_error_panel_titles() {
        let rendered = error_panel(&AppError::config("missing key")).to_string();
        assert!(rendered.contains("Configuration Error"));
        let rendered = error_panel(&ValidationError::EmptySymbol.into()).to_string();
        assert!(rendered.contains("Validation Error"));
    }
}
