//! Status workflow engine
//!
//! Pure logic for the reservation / table / order lifecycle:
//!
//! - [`status`] - the closed status enums and case-insensitive parsing
//! - [`engine`] - transition planning, table cascades and order totals
//!
//! Nothing in this module touches the database. Repositories execute the
//! planned transitions inside a single transaction.

pub mod engine;
pub mod status;

pub use engine::{
    ReservationTransition, compute_order_total, plan_order_transition,
    plan_reservation_transition,
};
pub use status::{OrderStatus, ReservationStatus, TableStatus};

use thiserror::Error;

/// Workflow errors
///
/// `InvalidStatus` means the requested value is not a member of the enum
/// (HTTP 400). `ForbiddenTransition` means the value is a member but the
/// declared transition matrix does not allow moving there (HTTP 422).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Invalid {kind} status '{value}', expected one of: {expected}")]
    InvalidStatus {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Transition {from} -> {to} is not allowed")]
    ForbiddenTransition { from: String, to: String },
}
