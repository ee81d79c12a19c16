//! Orders API module
//!
//! Any logged-in user can place an order and see their own history;
//! listing and deletion are admin only; status changes are shared with
//! the floor and kitchen staff.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::UserRole;

pub fn router() -> Router<ServerState> {
    let authenticated = Router::new()
        .route("/api/orders", post(handler::create))
        .route("/api/mis-ordenes", get(handler::list_mine));

    let staff = Router::new()
        .route("/api/orders/{id}", put(handler::update_status))
        .layer(middleware::from_fn(require_role(&[
            UserRole::Admin,
            UserRole::Mesero,
            UserRole::Cocina,
        ])));

    let admin = Router::new()
        .route("/api/orders", get(handler::list))
        .route(
            "/api/orders/{id}",
            get(handler::get_by_id).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(&[UserRole::Admin])));

    authenticated.merge(staff).merge(admin)
}
