//! Catalog API module
//!
//! The menu is public; catalog management is admin only. Mutations go
//! through `/api/productos` with a `tipo` discriminator (`PLATO` /
//! `BEBIDA`).

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_role;
use crate::core::ServerState;
use crate::db::models::UserRole;

pub fn router() -> Router<ServerState> {
    let public = Router::new()
        .route("/api/productos", get(handler::menu))
        .route("/api/dishes", get(handler::list_dishes))
        .route("/api/drinks", get(handler::list_drinks));

    let admin = Router::new()
        .route("/api/productos", post(handler::create))
        .route(
            "/api/productos/{tipo}/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(&[UserRole::Admin])));

    public.merge(admin)
}
