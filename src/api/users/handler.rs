//! Users API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::models::{User, UserRole};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResponse, AppResult, ListQuery, Paginated, ok};

/// GET /api/users - paginated listing with search and role filter
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<User>>>> {
    let role = match query.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => Some(UserRole::parse(r).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid role '{r}', expected one of: {}",
                UserRole::MEMBERS
            ))
        })?),
        None => None,
    };

    let repo = UserRepository::new(state.db.clone());
    let (users, total) = repo.list(&query, role).await?;
    Ok(ok(Paginated::new(users, total, &query)))
}

/// GET /api/users/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<User>>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
    Ok(ok(user))
}
