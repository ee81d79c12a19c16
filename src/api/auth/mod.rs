//! Auth API module
//!
//! Registration, login, email verification and the profile endpoints.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
        .route("/api/verify-email", post(handler::verify_email))
        .route(
            "/api/profile",
            get(handler::get_profile).put(handler::update_profile),
        )
}
