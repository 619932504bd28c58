pub mod binance;
pub mod model;
pub mod services;
pub mod validator;
