//! Comanda Server - restaurant management backend
//!
//! REST API for a restaurant: accounts and roles, reservations with a
//! table-status cascade, the dish/drink catalog and the order workflow
//! the kitchen screen drives.
//!
//! # Module layout
//!
//! ```text
//! src/
//! ├── core/       # configuration, state, server lifecycle
//! ├── auth/       # JWT, argon2, role middleware
//! ├── api/        # HTTP routes and handlers
//! ├── db/         # SQLite pool, models, repositories
//! ├── workflow/   # status enums and the transition engine
//! ├── notify/     # outbound email
//! └── utils/      # errors, pagination, validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;
pub mod workflow;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app, build_router};
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, create the working directory and start the logger.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
    std::fs::create_dir_all(&work_dir)?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
