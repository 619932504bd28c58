use binance_futures_bot::error::ValidationError;
use binance_futures_bot::trading::model::{OrderType, Side};
use binance_futures_bot::trading::validator::{
    validate_order_params, validate_order_type, validate_price, validate_quantity, validate_symbol,
};
use rust_decimal_macros::dec;

#[test]
fn test_market_order_scenario() {
    let request = validate_order_params("btcusdt", "buy", "market", "0.001", None).unwrap();
    assert_eq!(request.symbol, "BTCUSDT");
    assert_eq!(request.side, Side::Buy);
    assert_eq!(request.order_type, OrderType::Market);
    assert_eq!(request.quantity, dec!(0.001));
    assert_eq!(request.price, None);
}

#[test]
fn test_limit_order_scenario() {
    let request = validate_order_params("ethusdt", "sell", "limit", "2", Some("3000")).unwrap();
    assert_eq!(request.symbol, "ETHUSDT");
    assert_eq!(request.side, Side::Sell);
    assert_eq!(request.order_type, OrderType::Limit);
    assert_eq!(request.quantity, dec!(2.0));
    assert_eq!(request.price, Some(dec!(3000.0)));
}

#[test]
fn test_limit_without_price_fails() {
    assert_eq!(
        validate_order_params("BTCUSDT", "BUY", "LIMIT", "1", None),
        Err(ValidationError::PriceRequired)
    );
    assert_eq!(
        validate_order_params("BTCUSDT", "BUY", "LIMIT", "1", Some("")),
        Err(ValidationError::PriceRequired)
    );
    assert_eq!(
        validate_order_params("BTCUSDT", "BUY", "limit", "1", Some("  ")),
        Err(ValidationError::PriceRequired)
    );
}

#[test]
fn test_market_ignores_price() {
    let request = validate_order_params("BTCUSDT", "SELL", "MARKET", "1", Some("not-a-number"));
    assert_eq!(request.unwrap().price, None);
    let request = validate_order_params("BTCUSDT", "SELL", "MARKET", "1", Some("100"));
    assert_eq!(request.unwrap().price, None);
}

#[test]
fn test_first_error_wins() {
    // side 和 quantity 都不合法，只报 side
    assert_eq!(
        validate_order_params("BTCUSDT", "HOLD", "MARKET", "-1", None),
        Err(ValidationError::InvalidSide("HOLD".to_string()))
    );
    assert_eq!(
        validate_order_params(" ", "HOLD", "STOP", "-1", None),
        Err(ValidationError::EmptySymbol)
    );
    // quantity 先于 price 校验
    assert!(matches!(
        validate_order_params("BTCUSDT", "BUY", "LIMIT", "0", None),
        Err(ValidationError::NonPositiveQuantity(_))
    ));
}

#[test]
fn test_quantity_accepts_only_positive_decimals() {
    let accepted = ["1", "0.001", " 2.5 ", "1e-3", "100000"];
    for q in accepted {
        assert!(validate_quantity(q).unwrap() > dec!(0), "{} should be accepted", q);
    }

    assert!(matches!(
        validate_quantity("-5"),
        Err(ValidationError::NonPositiveQuantity(_))
    ));
    for q in ["0", "0.0", "-0.001"] {
        assert!(
            matches!(validate_quantity(q), Err(ValidationError::NonPositiveQuantity(_))),
            "{} should be non-positive",
            q
        );
    }
    for q in ["", "abc", "1,5", "NaN", "inf", "--1"] {
        assert!(
            matches!(validate_quantity(q), Err(ValidationError::InvalidQuantity(_))),
            "{} should be unparseable",
            q
        );
    }
}

#[test]
fn test_price_accepts_only_positive_decimals() {
    assert_eq!(validate_price("45000").unwrap(), dec!(45000));
    assert_eq!(validate_price("0.5").unwrap(), dec!(0.5));
    assert!(matches!(
        validate_price("-1"),
        Err(ValidationError::NonPositivePrice(_))
    ));
    assert!(matches!(
        validate_price("price"),
        Err(ValidationError::InvalidPrice(_))
    ));
}

#[test]
fn test_unsupported_order_types_fail() {
    for t in ["stop", "STOP_MARKET", "take_profit", "", "market order"] {
        assert!(validate_order_type(t).is_err(), "{} should be rejected", t);
    }
    assert_eq!(
        validate_order_type("stop"),
        Err(ValidationError::InvalidOrderType("STOP".to_string()))
    );
    assert_eq!(validate_order_type(" Limit "), Ok(OrderType::Limit));
}

#[test]
fn test_symbol_normalization_is_idempotent() {
    for s in ["btcusdt", " EthUsdt ", "SOLUSDT", "ethbtc"] {
        let once = validate_symbol(s).unwrap();
        assert_eq!(validate_symbol(&once).unwrap(), once);
        assert_eq!(once, once.trim().to_uppercase());
    }
}

#[test]
fn test_unrepresentable_numbers_are_out_of_range() {
    // 29 位小数，不能被四舍五入成 0
    let tiny = "0.00000000000000000000000000001";
    assert_eq!(
        validate_quantity(tiny),
        Err(ValidationError::QuantityOutOfRange(tiny.to_string()))
    );
    assert_eq!(
        validate_quantity("1e30"),
        Err(ValidationError::QuantityOutOfRange("1e30".to_string()))
    );
    assert_eq!(
        validate_quantity("1e-29"),
        Err(ValidationError::QuantityOutOfRange("1e-29".to_string()))
    );
    assert_eq!(
        validate_price("1e30"),
        Err(ValidationError::PriceOutOfRange("1e30".to_string()))
    );
    assert!(matches!(
        validate_order_params("BTCUSDT", "BUY", "LIMIT", "1", Some(tiny)),
        Err(ValidationError::PriceOutOfRange(_))
    ));
}

#[test]
fn test_smallest_representable_quantity_is_accepted() {
    let smallest = "0.0000000000000000000000000001";
    assert_eq!(validate_quantity(smallest).unwrap(), dec!(0.0000000000000000000000000001));
    assert_eq!(validate_quantity("1e-28").unwrap(), dec!(0.0000000000000000000000000001));
}
