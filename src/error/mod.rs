pub mod app_error;

pub use app_error::{ApiError, ApiErrorCode, AppError, AppResult, ValidationError};
