//! Reservation Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::workflow::ReservationStatus;

/// Wire format for reservation start times (`2024-03-01 19:30:00`)
pub const START_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reservation entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub user_id: Option<i64>,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: Option<String>,
    pub quantity: i64,
    pub table_id: Option<i64>,
    pub status: ReservationStatus,
    pub start_date_time: NaiveDateTime,
    pub additional_details: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Booking request payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationCreate {
    pub user_id: Option<i64>,
    pub guest_name: String,
    pub guest_phone: String,
    #[serde(alias = "email")]
    pub guest_email: Option<String>,
    pub quantity: i64,
    pub table_id: Option<i64>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_date_time: String,
    pub additional_details: Option<String>,
    /// Optional explicit status (defaults to PENDIENTE)
    pub status: Option<String>,
}

/// Partial update payload for PUT /api/reservations/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationUpdate {
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    #[serde(alias = "email")]
    pub guest_email: Option<String>,
    pub quantity: Option<i64>,
    pub table_id: Option<i64>,
    pub start_date_time: Option<String>,
    pub additional_details: Option<String>,
    /// Status change, routed through the workflow engine
    pub status: Option<String>,
}
