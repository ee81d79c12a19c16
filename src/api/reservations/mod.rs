//! Reservations API module
//!
//! Booking is public (walk-in guests have no account); everything else
//! is admin territory.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::UserRole;

pub fn router() -> Router<ServerState> {
    let public = Router::new().route("/api/reservations", post(handler::create));

    let admin = Router::new()
        .route("/api/reservations", get(handler::list))
        .route(
            "/api/reservations/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(&[UserRole::Admin])));

    public.merge(admin)
}
