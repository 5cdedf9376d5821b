//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResponse`] - error type and response envelope
//! - [`AppResult`] - handler Result alias
//! - logging and input validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, AppResponse};
pub use result::AppResult;
