//! 下单参数校验
//!
//! 纯函数，不做任何 I/O；遇到第一个错误立即返回。

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::trading::model::{OrderRequest, OrderType, Side};

const QUOTE_ASSET: &str = "USDT";

pub fn validate_symbol(symbol: &str) -> Result<String, ValidationError> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }

    if !symbol.ends_with(QUOTE_ASSET) {
        warn!(
            "Symbol {} doesn't end with {}. This might fail on Binance Futures.",
            symbol, QUOTE_ASSET
        );
    }

    debug!("Validated symbol: {}", symbol);
    Ok(symbol)
}

pub fn validate_side(side: &str) -> Result<Side, ValidationError> {
    let side = side.trim().to_uppercase();
    let validated = match side.as_str() {
        "BUY" => Side::Buy,
        "SELL" => Side::Sell,
        _ => return Err(ValidationError::InvalidSide(side)),
    };
    debug!("Validated side: {}", validated);
    Ok(validated)
}

pub fn validate_order_type(order_type: &str) -> Result<OrderType, ValidationError> {
    let order_type = order_type.trim().to_uppercase();
    let validated = match order_type.as_str() {
        "MARKET" => OrderType::Market,
        "LIMIT" => OrderType::Limit,
        _ => return Err(ValidationError::InvalidOrderType(order_type)),
    };
    debug!("Validated order type: {}", validated);
    Ok(validated)
}

pub fn validate_quantity(quantity: &str) -> Result<Decimal, ValidationError> {
    let qty = parse_decimal(quantity).map_err(|e| match e {
        NumberError::NotANumber => ValidationError::InvalidQuantity(quantity.to_string()),
        NumberError::OutOfRange => ValidationError::QuantityOutOfRange(quantity.to_string()),
    })?;
    if qty <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity(qty.to_string()));
    }
    debug!("Validated quantity: {}", qty);
    Ok(qty)
}

pub fn validate_price(price: &str) -> Result<Decimal, ValidationError> {
    let prc = parse_decimal(price).map_err(|e| match e {
        NumberError::NotANumber => ValidationError::InvalidPrice(price.to_string()),
        NumberError::OutOfRange => ValidationError::PriceOutOfRange(price.to_string()),
    })?;
    if prc <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice(prc.to_string()));
    }
    debug!("Validated price: {}", prc);
    Ok(prc)
}

/// 校验全部下单参数，返回规范化后的请求
///
/// 限价单必须带价格；市价单忽略传入的价格。
pub fn validate_order_params(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: &str,
    price: Option<&str>,
) -> Result<OrderRequest, ValidationError> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let order_type = validate_order_type(order_type)?;
    let quantity = validate_quantity(quantity)?;

    let price = match order_type {
        OrderType::Limit => match price {
            Some(p) if !p.trim().is_empty() => Some(validate_price(p)?),
            _ => return Err(ValidationError::PriceRequired),
        },
        OrderType::Market => None,
    };

    info!("All parameters validated successfully");
    Ok(OrderRequest {
        symbol,
        side,
        order_type,
        quantity,
        price,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberError {
    NotANumber,
    /// 是数字，但 Decimal 无法精确表示
    OutOfRange,
}

/// 支持普通写法和科学计数法，拒绝 NaN / inf；不做任何舍入
fn parse_decimal(raw: &str) -> Result<Decimal, NumberError> {
    let raw = raw.trim();
    let (base, exponent) = split_number(raw).ok_or(NumberError::NotANumber)?;
    let value = Decimal::from_str_exact(trim_fraction_zeros(base))
        .map_err(|_| NumberError::OutOfRange)?;
    match exponent {
        None => Ok(value),
        Some(exponent) => scale_by_power_of_ten(value, exponent).ok_or(NumberError::OutOfRange),
    }
}

/// [+-]digits[.digits][(e|E)[+-]digits]，返回 (尾数, 指数)
fn split_number(raw: &str) -> Option<(&str, Option<&str>)> {
    let (base, exponent) = match raw.find(['e', 'E']) {
        Some(i) => (&raw[..i], Some(&raw[i + 1..])),
        None => (raw, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let unsigned = base.strip_prefix(['+', '-']).unwrap_or(base);
    let valid_base = match unsigned.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(unsigned),
    };
    let valid_exponent = exponent
        .map(|e| all_digits(e.strip_prefix(['+', '-']).unwrap_or(e)))
        .unwrap_or(true);

    (valid_base && valid_exponent).then_some((base, exponent))
}

fn trim_fraction_zeros(base: &str) -> &str {
    if base.contains('.') {
        base.trim_end_matches('0').trim_end_matches('.')
    } else {
        base
    }
}

fn scale_by_power_of_ten(value: Decimal, exponent: &str) -> Option<Decimal> {
    let exponent: i64 = exponent.parse().ok()?;
    let mut value = value.normalize();
    if value.is_zero() {
        return Some(value);
    }

    if exponent < 0 {
        let scale = i64::from(value.scale()) - exponent;
        if scale > i64::from(Decimal::MAX_SCALE) {
            return None;
        }
        value.set_scale(u32::try_from(scale).ok()?).ok()?;
        return Some(value);
    }

    // 超过 56 次必然溢出
    if exponent > 2 * i64::from(Decimal::MAX_SCALE) {
        return None;
    }
    for _ in 0..exponent {
        value = value.checked_mul(Decimal::TEN)?;
    }
    Some(value)
}
