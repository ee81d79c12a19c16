//! Reservations API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDateTime;
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::db::models::{
    Reservation, ReservationCreate, ReservationUpdate, START_DATE_FORMAT,
};
use crate::db::repository::{
    ReservationRepository,
    reservation::{ReservationFields, ReservationInsert},
};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_positive, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ListQuery, Paginated, ok, ok_with_message};
use crate::workflow::ReservationStatus;

fn parse_start(value: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(value.trim(), START_DATE_FORMAT).map_err(|_| {
        AppError::validation(format!(
            "start_date_time '{value}' does not match the format YYYY-MM-DD HH:MM:SS"
        ))
    })
}

/// POST /api/reservations - public booking endpoint
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Reservation>>)> {
    validate_required_text(&payload.guest_name, "guest_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.guest_phone, "guest_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.guest_email, "guest_email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.additional_details, "additional_details", MAX_NOTE_LEN)?;
    validate_positive(payload.quantity, "quantity")?;

    let start_date_time = parse_start(&payload.start_date_time)?;
    let status = match payload.status.as_deref() {
        Some(s) => ReservationStatus::parse(s)?,
        None => ReservationStatus::Pendiente,
    };

    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .create(ReservationInsert {
            user_id: payload.user_id,
            guest_name: payload.guest_name,
            guest_phone: payload.guest_phone,
            guest_email: payload.guest_email,
            quantity: payload.quantity,
            table_id: payload.table_id,
            status,
            start_date_time,
            additional_details: payload.additional_details,
        })
        .await?;

    if let Some(email) = &reservation.guest_email {
        state.mailer.spawn_reservation_received(
            email,
            &reservation.guest_name,
            &reservation.start_date_time.format(START_DATE_FORMAT).to_string(),
            reservation.quantity,
        );
    }

    tracing::info!(reservation_id = reservation.id, "Reservation received");

    Ok((
        StatusCode::CREATED,
        ok_with_message(reservation, "Reservation received"),
    ))
}

/// GET /api/reservations - paginated, filterable by status and date
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<Reservation>>>> {
    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(ReservationStatus::parse(s)?),
        None => None,
    };

    let repo = ReservationRepository::new(state.db.clone());
    let (reservations, total) = repo.list(&query, status).await?;
    Ok(ok(Paginated::new(reservations, total, &query)))
}

/// GET /api/reservations/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;
    Ok(ok(reservation))
}

/// PUT /api/reservations/:id
///
/// A status change goes through the workflow engine; the matching table
/// update commits in the same transaction. The response carries both
/// the reservation and the cascaded table, if any.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<AppResponse<Value>>> {
    if let Some(name) = &payload.guest_name {
        validate_required_text(name, "guest_name", MAX_NAME_LEN)?;
    }
    if let Some(quantity) = payload.quantity {
        validate_positive(quantity, "quantity")?;
    }
    validate_optional_text(&payload.guest_email, "guest_email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.additional_details, "additional_details", MAX_NOTE_LEN)?;

    let start_date_time = match payload.start_date_time.as_deref() {
        Some(s) => Some(parse_start(s)?),
        None => None,
    };
    let status = match payload.status.as_deref() {
        Some(s) => Some(ReservationStatus::parse(s)?),
        None => None,
    };

    let repo = ReservationRepository::new(state.db.clone());
    let (reservation, table) = repo
        .update(
            id,
            ReservationFields {
                guest_name: payload.guest_name,
                guest_phone: payload.guest_phone,
                guest_email: payload.guest_email,
                quantity: payload.quantity,
                table_id: payload.table_id,
                start_date_time,
                additional_details: payload.additional_details,
            },
            status,
        )
        .await?;

    Ok(ok(json!({
        "reservation": reservation,
        "table": table,
    })))
}

/// DELETE /api/reservations/:id - the linked table keeps its status
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let deleted = repo.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Reservation {id} not found")));
    }
    Ok(ok(true))
}
