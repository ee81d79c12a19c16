//! Dining Tables API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::DiningTableRepository;
use crate::utils::validation::validate_positive;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use crate::workflow::TableStatus;

/// GET /api/tables - the whole floor, ordered by table number
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<DiningTable>>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all().await?;
    Ok(ok(tables))
}

/// GET /api/tables/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(ok(table))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<DiningTable>>)> {
    validate_positive(payload.number, "number")?;
    validate_positive(payload.capacity, "capacity")?;

    let status = match payload.status.as_deref() {
        Some(s) => TableStatus::parse(s)?,
        None => TableStatus::Libre,
    };

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.create(payload.number, payload.capacity, status).await?;
    Ok((StatusCode::CREATED, ok_with_message(table, "Table created")))
}

/// PUT /api/tables/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<AppResponse<DiningTable>>> {
    if let Some(number) = payload.number {
        validate_positive(number, "number")?;
    }
    if let Some(capacity) = payload.capacity {
        validate_positive(capacity, "capacity")?;
    }
    let status = match payload.status.as_deref() {
        Some(s) => Some(TableStatus::parse(s)?),
        None => None,
    };

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .update(id, payload.number, payload.capacity, status)
        .await?;
    Ok(ok(table))
}

/// DELETE /api/tables/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let deleted = repo.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Table {id} not found")));
    }
    Ok(ok(true))
}
