pub mod exchange_service;
pub mod order_service;

pub use exchange_service::ExchangeClient;
pub use order_service::order_service::OrderManager;
