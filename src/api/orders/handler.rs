//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{OrderCreate, OrderStatusUpdate, OrderView};
use crate::db::repository::OrderRepository;
use crate::utils::validation::{validate_positive, validate_price};
use crate::utils::{AppError, AppResponse, AppResult, ListQuery, Paginated, ok, ok_with_message};
use crate::workflow::OrderStatus;

fn parse_status_filter(query: &ListQuery) -> Result<Option<OrderStatus>, AppError> {
    match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Ok(Some(OrderStatus::parse(s)?)),
        None => Ok(None),
    }
}

fn validate_items(payload: &OrderCreate) -> Result<(), AppError> {
    for item in payload.dishes.iter().chain(payload.drinks.iter()) {
        validate_positive(item.quantity, "quantity")?;
        validate_price(item.price, "price")?;
    }
    Ok(())
}

/// POST /api/orders - place an order for the logged-in user
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<OrderView>>)> {
    validate_items(&payload)?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(Some(user.id), payload).await?;

    tracing::info!(order_id = order.id, code = %order.code, total = order.total, "Order placed");

    Ok((StatusCode::CREATED, ok_with_message(order, "Order placed")))
}

/// GET /api/orders - admin listing, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<OrderView>>>> {
    let status = parse_status_filter(&query)?;
    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo.list(&query, status).await?;
    Ok(ok(Paginated::new(orders, total, &query)))
}

/// GET /api/mis-ordenes - the caller's own orders
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<OrderView>>>> {
    let status = parse_status_filter(&query)?;
    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo.list_for_user(user.id, &query, status).await?;
    Ok(ok(Paginated::new(orders, total, &query)))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<OrderView>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_view(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(ok(order))
}

/// PUT /api/orders/:id - status transition through the workflow engine
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<AppResponse<OrderView>>> {
    let requested = OrderStatus::parse(&payload.status)?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update_status(id, requested).await?;

    tracing::info!(order_id = id, status = order.status.as_str(), "Order status updated");
    Ok(ok(order))
}

/// DELETE /api/orders/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = OrderRepository::new(state.db.clone());
    let deleted = repo.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Order {id} not found")));
    }
    Ok(ok(true))
}
