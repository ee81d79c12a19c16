//! Dining Table Model

use serde::{Deserialize, Serialize};

use crate::workflow::TableStatus;

/// Dining table entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DiningTable {
    pub id: i64,
    pub number: i64,
    pub capacity: i64,
    pub status: TableStatus,
}

/// Create dining table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableCreate {
    pub number: i64,
    pub capacity: i64,
    /// Optional initial status (defaults to LIBRE), validated by the handler
    pub status: Option<String>,
}

/// Update dining table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableUpdate {
    pub number: Option<i64>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
}
