//! Kitchen API module
//!
//! The prep queue: open orders oldest first, plus the status update the
//! kitchen screen drives.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::UserRole;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cocina/ordenes", get(handler::queue))
        .route("/api/cocina/ordenes/{id}", put(handler::update_status))
        .layer(middleware::from_fn(require_role(&[
            UserRole::Admin,
            UserRole::Mesero,
            UserRole::Cocina,
        ])))
}
