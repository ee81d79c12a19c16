//! Repository Module
//!
//! CRUD and query operations over the SQLite tables. Each repository owns
//! a pool clone; multi-entity mutations (reservation + table cascade,
//! order + details) run inside a single transaction and roll back as a
//! unit.

pub mod dining_table;
pub mod order;
pub mod product;
pub mod reservation;
pub mod user;

pub use dining_table::DiningTableRepository;
pub use order::OrderRepository;
pub use product::CatalogRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

use thiserror::Error;

use crate::workflow::WorkflowError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Status workflow rejections surfaced from inside a transaction
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.kind() == sqlx::error::ErrorKind::UniqueViolation
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
