//! Transition planning and order totals
//!
//! Maps a current entity status plus a requested target to the new status
//! and any cascaded update on the linked table. Transitions outside the
//! declared matrix are rejected; same-status requests are permitted
//! no-ops (and produce no table side effect).

use super::WorkflowError;
use super::status::{OrderStatus, ReservationStatus, TableStatus};

/// Outcome of planning a reservation status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationTransition {
    pub next: ReservationStatus,
    /// New status for the linked table, if the reservation has one
    pub table: Option<TableStatus>,
}

/// Table status implied by a reservation status
///
/// CONFIRMADA -> RESERVADA, COMPLETADA -> OCUPADA, CANCELADA -> LIBRE,
/// PENDIENTE -> no change.
fn table_cascade(status: ReservationStatus) -> Option<TableStatus> {
    match status {
        ReservationStatus::Confirmada => Some(TableStatus::Reservada),
        ReservationStatus::Completada => Some(TableStatus::Ocupada),
        ReservationStatus::Cancelada => Some(TableStatus::Libre),
        ReservationStatus::Pendiente => None,
    }
}

fn reservation_allowed(from: ReservationStatus, to: ReservationStatus) -> bool {
    use ReservationStatus::*;
    matches!(
        (from, to),
        (Pendiente, Confirmada)
            | (Pendiente, Cancelada)
            | (Confirmada, Completada)
            | (Confirmada, Cancelada)
    )
}

fn order_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pendiente, EnProceso)
            | (Pendiente, Cancelada)
            | (EnProceso, Completada)
            | (EnProceso, Cancelada)
    )
}

/// Plan a reservation status transition.
///
/// Returns the new reservation status and the cascaded table status (to be
/// applied only when the reservation actually has a linked table).
pub fn plan_reservation_transition(
    current: ReservationStatus,
    requested: ReservationStatus,
) -> Result<ReservationTransition, WorkflowError> {
    if current == requested {
        return Ok(ReservationTransition {
            next: current,
            table: None,
        });
    }

    if !reservation_allowed(current, requested) {
        return Err(WorkflowError::ForbiddenTransition {
            from: current.as_str().to_string(),
            to: requested.as_str().to_string(),
        });
    }

    Ok(ReservationTransition {
        next: requested,
        table: table_cascade(requested),
    })
}

/// Plan an order status transition. Orders have no cascaded side effects.
pub fn plan_order_transition(
    current: OrderStatus,
    requested: OrderStatus,
) -> Result<OrderStatus, WorkflowError> {
    if current == requested {
        return Ok(current);
    }

    if !order_allowed(current, requested) {
        return Err(WorkflowError::ForbiddenTransition {
            from: current.as_str().to_string(),
            to: requested.as_str().to_string(),
        });
    }

    Ok(requested)
}

/// Compute an order total from its line items.
///
/// Callers re-derive the total from the persisted detail rows instead of
/// accumulating increments, so the stored total cannot drift.
pub fn compute_order_total<I>(items: I) -> f64
where
    I: IntoIterator<Item = (i64, f64)>,
{
    items
        .into_iter()
        .map(|(quantity, unit_price)| quantity as f64 * unit_price)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_mapping_is_exact() {
        let t = plan_reservation_transition(
            ReservationStatus::Pendiente,
            ReservationStatus::Confirmada,
        )
        .unwrap();
        assert_eq!(t.next, ReservationStatus::Confirmada);
        assert_eq!(t.table, Some(TableStatus::Reservada));

        let t = plan_reservation_transition(
            ReservationStatus::Confirmada,
            ReservationStatus::Completada,
        )
        .unwrap();
        assert_eq!(t.table, Some(TableStatus::Ocupada));

        let t = plan_reservation_transition(
            ReservationStatus::Confirmada,
            ReservationStatus::Cancelada,
        )
        .unwrap();
        assert_eq!(t.table, Some(TableStatus::Libre));
    }

    #[test]
    fn pending_has_no_table_side_effect() {
        let t = plan_reservation_transition(
            ReservationStatus::Pendiente,
            ReservationStatus::Pendiente,
        )
        .unwrap();
        assert_eq!(t.next, ReservationStatus::Pendiente);
        assert_eq!(t.table, None);
    }

    #[test]
    fn terminal_reservation_statuses_reject_moves() {
        for terminal in [ReservationStatus::Cancelada, ReservationStatus::Completada] {
            let err = plan_reservation_transition(terminal, ReservationStatus::Confirmada)
                .unwrap_err();
            assert!(matches!(err, WorkflowError::ForbiddenTransition { .. }));
        }
    }

    #[test]
    fn same_status_is_a_noop() {
        for status in [
            ReservationStatus::Pendiente,
            ReservationStatus::Confirmada,
            ReservationStatus::Cancelada,
            ReservationStatus::Completada,
        ] {
            let t = plan_reservation_transition(status, status).unwrap();
            assert_eq!(t.next, status);
            assert_eq!(t.table, None);
        }
    }

    #[test]
    fn order_matrix() {
        assert!(plan_order_transition(OrderStatus::Pendiente, OrderStatus::EnProceso).is_ok());
        assert!(plan_order_transition(OrderStatus::EnProceso, OrderStatus::Completada).is_ok());
        assert!(plan_order_transition(OrderStatus::EnProceso, OrderStatus::Cancelada).is_ok());

        // No skipping straight to completed, no resurrecting cancelled orders
        assert!(
            plan_order_transition(OrderStatus::Pendiente, OrderStatus::Completada).is_err()
        );
        assert!(
            plan_order_transition(OrderStatus::Cancelada, OrderStatus::EnProceso).is_err()
        );
        assert!(
            plan_order_transition(OrderStatus::Completada, OrderStatus::Pendiente).is_err()
        );
    }

    #[test]
    fn total_is_sum_of_subtotals() {
        let items = vec![(2, 5.0), (1, 2.0)];
        assert_eq!(compute_order_total(items), 12.0);
    }

    #[test]
    fn empty_order_totals_zero() {
        assert_eq!(compute_order_total(Vec::<(i64, f64)>::new()), 0.0);
    }
}
