//! Users API module (admin only)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::UserRole;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/users", get(handler::list))
        .route("/api/users/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_role(&[UserRole::Admin])))
}
