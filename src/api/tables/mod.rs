//! Dining Tables API module
//!
//! Waiters can read the floor; mutations are admin only.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::UserRole;

pub fn router() -> Router<ServerState> {
    let read = Router::new()
        .route("/api/tables", get(handler::list))
        .route("/api/tables/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_role(&[
            UserRole::Admin,
            UserRole::Mesero,
        ])));

    let manage = Router::new()
        .route("/api/tables", axum::routing::post(handler::create))
        .route(
            "/api/tables/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(&[UserRole::Admin])));

    read.merge(manage)
}
