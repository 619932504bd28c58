//! Binance U本位合约测试网下单工具
//!
//! 校验 -> 连接 -> 下单 -> 输出结果，全程顺序执行。

pub mod app_config;
pub mod cli;
pub mod error;
pub mod trading;

pub use error::{AppError, AppResult};
