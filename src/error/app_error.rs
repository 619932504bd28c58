use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 应用错误
#[derive(Error, Debug)]
pub enum AppError {
    /// 用户输入校验失败
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// 配置错误（缺少密钥、参数组合非法）
    #[error("{0}")]
    Configuration(String),

    /// 交易所拒绝请求或网络失败
    #[error("{0}")]
    RemoteApi(#[from] ApiError),
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}

/// 下单参数校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Symbol cannot be empty")]
    EmptySymbol,

    #[error("Invalid side: {0}. Must be one of [BUY, SELL]")]
    InvalidSide(String),

    #[error("Invalid order type: {0}. Must be one of [MARKET, LIMIT]")]
    InvalidOrderType(String),

    #[error("Invalid quantity: {0}. Must be a number")]
    InvalidQuantity(String),

    #[error("Quantity must be positive. Got: {0}")]
    NonPositiveQuantity(String),

    #[error("Quantity out of range: {0}. At most 28 decimal places and below 7.9e28")]
    QuantityOutOfRange(String),

    #[error("Invalid price: {0}. Must be a number")]
    InvalidPrice(String),

    #[error("Price must be positive. Got: {0}")]
    NonPositivePrice(String),

    #[error("Price out of range: {0}. At most 28 decimal places and below 7.9e28")]
    PriceOutOfRange(String),

    #[error("Price is required for LIMIT orders")]
    PriceRequired,
}

/// Binance REST 调用错误
#[derive(Error, Debug)]
pub enum ApiError {
    /// 交易所返回了 {"code":..,"msg":..}
    #[error("APIError(code={code}): {msg}")]
    Rejected {
        status: StatusCode,
        code: i64,
        msg: String,
    },

    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to encode request params: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::Decode(_) | ApiError::Encode(_) => None,
        }
    }

    pub fn code(&self) -> Option<ApiErrorCode> {
        match self {
            ApiError::Rejected { code, .. } => Some(ApiErrorCode::from_code(*code)),
            _ => None,
        }
    }
}

/// Binance 合约常见错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    TooManyRequests = -1003,
    TimestampOutsideRecvWindow = -1021,
    InvalidSignature = -1022,
    TooManyDecimals = -1111,
    MandatoryParamMissing = -1102,
    InvalidSymbol = -1121,
    InvalidApiKey = -2014,
    RejectedApiKey = -2015,
    MarginInsufficient = -2019,
    PriceFilter = -4014,
    QuantityFilter = -4003,
    MinNotional = -4164,
    Unknown = 0,
}

impl ApiErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            -1003 => Self::TooManyRequests,
            -1021 => Self::TimestampOutsideRecvWindow,
            -1022 => Self::InvalidSignature,
            -1102 => Self::MandatoryParamMissing,
            -1111 => Self::TooManyDecimals,
            -1121 => Self::InvalidSymbol,
            -2014 => Self::InvalidApiKey,
            -2015 => Self::RejectedApiKey,
            -2019 => Self::MarginInsufficient,
            -4003 => Self::QuantityFilter,
            -4014 => Self::PriceFilter,
            -4164 => Self::MinNotional,
            _ => Self::Unknown,
        }
    }

    /// 给终端用户的提示
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::TooManyRequests => Some("Request weight exceeded, wait before retrying"),
            Self::TimestampOutsideRecvWindow => {
                Some("Local clock is out of sync with the exchange, sync system time")
            }
            Self::InvalidSignature => Some("Check BINANCE_API_SECRET"),
            Self::MandatoryParamMissing => Some("A required order parameter was not sent"),
            Self::TooManyDecimals => Some("Quantity or price has more decimals than the symbol allows"),
            Self::InvalidSymbol => Some("Symbol is not listed on the futures testnet"),
            Self::InvalidApiKey | Self::RejectedApiKey => {
                Some("Check BINANCE_API_KEY and that the key was created on the futures testnet")
            }
            Self::MarginInsufficient => Some("Testnet wallet does not have enough margin"),
            Self::QuantityFilter => Some("Quantity is below the symbol minimum"),
            Self::PriceFilter => Some("Price is outside the symbol price filter"),
            Self::MinNotional => Some("Order notional (quantity x price) is below the minimum"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, *self as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_error_carries_code() {
        let err = ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            code: -2019,
            msg: "Margin is insufficient.".to_string(),
        };
        assert_eq!(err.to_string(), "APIError(code=-2019): Margin is insufficient.");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.code(), Some(ApiErrorCode::MarginInsufficient));
        assert!(err.code().and_then(|c| c.hint()).is_some());
    }

    #[test]
    fn test_unknown_code_has_no_hint() {
        let code = ApiErrorCode::from_code(-9999);
        assert_eq!(code, ApiErrorCode::Unknown);
        assert!(code.hint().is_none());
    }

    #[test]
    fn test_app_error_wraps_validation() {
        let err: AppError = ValidationError::PriceRequired.into();
        assert!(matches!(err, AppError::Validation(ValidationError::PriceRequired)));
        assert_eq!(err.to_string(), "Price is required for LIMIT orders");
    }
}
