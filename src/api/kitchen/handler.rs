//! Kitchen API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::models::{OrderStatusUpdate, OrderView};
use crate::db::repository::OrderRepository;
use crate::utils::{AppResponse, AppResult, ListQuery, Paginated, ok};
use crate::workflow::OrderStatus;

/// GET /api/cocina/ordenes
///
/// Without an explicit status filter only PENDIENTE and EN_PROCESO
/// orders show up, oldest first.
pub async fn queue(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<OrderView>>>> {
    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(OrderStatus::parse(s)?),
        None => None,
    };

    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo.list_for_kitchen(&query, status).await?;
    Ok(ok(Paginated::new(orders, total, &query)))
}

/// PUT /api/cocina/ordenes/:id - advance an order through the workflow
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<AppResponse<OrderView>>> {
    let requested = OrderStatus::parse(&payload.status)?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update_status(id, requested).await?;

    tracing::info!(order_id = id, status = order.status.as_str(), "Kitchen updated order");
    Ok(ok(order))
}
