pub mod order;

pub use order::{OrderRequest, OrderType, Side, TimeInForce};
