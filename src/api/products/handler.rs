//! Catalog API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::db::models::{Dish, Drink, ProductCreate, ProductKind, ProductUpdate};
use crate::db::repository::{CatalogRepository, product::Product};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

fn parse_kind(tipo: &str) -> Result<ProductKind, AppError> {
    ProductKind::parse(tipo)
        .ok_or_else(|| AppError::validation(format!("Invalid tipo '{tipo}', expected PLATO or BEBIDA")))
}

/// GET /api/productos - the active menu, dishes and drinks together
pub async fn menu(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Value>>> {
    let repo = CatalogRepository::new(state.db.clone());
    let dishes = repo.list_dishes(true).await?;
    let drinks = repo.list_drinks(true).await?;
    Ok(ok(json!({ "dishes": dishes, "drinks": drinks })))
}

/// GET /api/dishes
pub async fn list_dishes(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Dish>>>> {
    let repo = CatalogRepository::new(state.db.clone());
    Ok(ok(repo.list_dishes(true).await?))
}

/// GET /api/drinks
pub async fn list_drinks(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Drink>>>> {
    let repo = CatalogRepository::new(state.db.clone());
    Ok(ok(repo.list_drinks(true).await?))
}

/// GET /api/productos/:tipo/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((tipo, id)): Path<(String, i64)>,
) -> AppResult<Json<AppResponse<Product>>> {
    let kind = parse_kind(&tipo)?;
    let repo = CatalogRepository::new(state.db.clone());
    let product = repo
        .find(kind, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{} {id} not found", kind.label())))?;
    Ok(ok(product))
}

/// POST /api/productos
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Product>>)> {
    let kind = parse_kind(&payload.tipo)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.url_img, "url_img", MAX_URL_LEN)?;
    validate_price(payload.price, "price")?;

    let repo = CatalogRepository::new(state.db.clone());
    let product = repo.create(kind, payload).await?;
    Ok((
        StatusCode::CREATED,
        ok_with_message(product, "Product created"),
    ))
}

/// PUT /api/productos/:tipo/:id
pub async fn update(
    State(state): State<ServerState>,
    Path((tipo, id)): Path<(String, i64)>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let kind = parse_kind(&tipo)?;
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.url_img, "url_img", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let repo = CatalogRepository::new(state.db.clone());
    let product = repo.update(kind, id, payload).await?;
    Ok(ok(product))
}

/// DELETE /api/productos/:tipo/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path((tipo, id)): Path<(String, i64)>,
) -> AppResult<Json<AppResponse<bool>>> {
    let kind = parse_kind(&tipo)?;
    let repo = CatalogRepository::new(state.db.clone());
    let deleted = repo.delete(kind, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("{} {id} not found", kind.label())));
    }
    Ok(ok(true))
}
