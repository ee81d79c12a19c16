//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error handling
//! - [`Paginated`] / [`ListQuery`] - listing envelope
//! - logging and validation helpers

pub mod error;
pub mod logger;
pub mod pagination;
pub mod result;
pub mod validation;

pub use error::{AppError, AppResponse, ok, ok_with_message};
pub use pagination::{ListQuery, Paginated};
pub use result::AppResult;
