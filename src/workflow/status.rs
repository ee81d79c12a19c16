//! Status enums
//!
//! Closed sets of valid states for reservations, tables and orders.
//! Wire form is SCREAMING_SNAKE (`"EN_PROCESO"`), parsing is
//! case-insensitive and never panics.

use serde::{Deserialize, Serialize};

use super::WorkflowError;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pendiente,
    Confirmada,
    Cancelada,
    Completada,
}

/// Table occupancy status
///
/// Driven by the reservation/order lifecycle, not set directly by clients
/// in the normal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Libre,
    Reservada,
    Ocupada,
}

/// Kitchen-facing order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pendiente,
    EnProceso,
    Completada,
    Cancelada,
}

impl ReservationStatus {
    pub const MEMBERS: &'static str = "PENDIENTE, CONFIRMADA, CANCELADA, COMPLETADA";

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value.trim().to_uppercase().as_str() {
            "PENDIENTE" => Ok(Self::Pendiente),
            "CONFIRMADA" => Ok(Self::Confirmada),
            "CANCELADA" => Ok(Self::Cancelada),
            "COMPLETADA" => Ok(Self::Completada),
            _ => Err(WorkflowError::InvalidStatus {
                kind: "reservation",
                value: value.to_string(),
                expected: Self::MEMBERS,
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "PENDIENTE",
            Self::Confirmada => "CONFIRMADA",
            Self::Cancelada => "CANCELADA",
            Self::Completada => "COMPLETADA",
        }
    }
}

impl TableStatus {
    pub const MEMBERS: &'static str = "LIBRE, RESERVADA, OCUPADA";

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value.trim().to_uppercase().as_str() {
            "LIBRE" => Ok(Self::Libre),
            "RESERVADA" => Ok(Self::Reservada),
            "OCUPADA" => Ok(Self::Ocupada),
            _ => Err(WorkflowError::InvalidStatus {
                kind: "table",
                value: value.to_string(),
                expected: Self::MEMBERS,
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Libre => "LIBRE",
            Self::Reservada => "RESERVADA",
            Self::Ocupada => "OCUPADA",
        }
    }
}

impl OrderStatus {
    pub const MEMBERS: &'static str = "PENDIENTE, EN_PROCESO, COMPLETADA, CANCELADA";

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value.trim().to_uppercase().as_str() {
            "PENDIENTE" => Ok(Self::Pendiente),
            "EN_PROCESO" => Ok(Self::EnProceso),
            "COMPLETADA" => Ok(Self::Completada),
            "CANCELADA" => Ok(Self::Cancelada),
            _ => Err(WorkflowError::InvalidStatus {
                kind: "order",
                value: value.to_string(),
                expected: Self::MEMBERS,
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "PENDIENTE",
            Self::EnProceso => "EN_PROCESO",
            Self::Completada => "COMPLETADA",
            Self::Cancelada => "CANCELADA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            ReservationStatus::parse("confirmada"),
            Ok(ReservationStatus::Confirmada)
        );
        assert_eq!(
            OrderStatus::parse(" en_proceso "),
            Ok(OrderStatus::EnProceso)
        );
        assert_eq!(TableStatus::parse("Libre"), Ok(TableStatus::Libre));
    }

    #[test]
    fn parse_rejects_unknown_members() {
        let err = ReservationStatus::parse("APROBADA").unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidStatus { kind: "reservation", .. }));

        let err = OrderStatus::parse("").unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidStatus { kind: "order", .. }));
    }

    #[test]
    fn wire_form_is_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::EnProceso).unwrap(),
            "\"EN_PROCESO\""
        );
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Pendiente).unwrap(),
            "\"PENDIENTE\""
        );
    }
}
