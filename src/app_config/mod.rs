pub mod env;
pub mod exchange;
pub mod log;
