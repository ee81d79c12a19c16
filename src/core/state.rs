//! Server state
//!
//! Shared handle passed to every request. Cloning is cheap: the pool
//! and services are reference-counted.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::notify::MailerService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: SqlitePool,
    pub jwt: Arc<JwtService>,
    pub mailer: Arc<MailerService>,
}

impl ServerState {
    /// Open the database, apply migrations and wire the services.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        if let Err(e) = std::fs::create_dir_all(&config.work_dir) {
            return Err(AppError::internal(format!(
                "Failed to create work dir {}: {e}",
                config.work_dir
            )));
        }

        let db = DbService::new(&config.database_path).await?;
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let mailer = MailerService::new(config.mail.clone());

        if !mailer.is_enabled() {
            tracing::warn!("MAIL_API_URL not set, outbound email is disabled");
        }

        Ok(Self {
            config: config.clone(),
            db: db.pool,
            jwt,
            mailer,
        })
    }

    /// State over an existing pool. Used by tests.
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        Self {
            db: pool,
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            mailer: MailerService::new(config.mail.clone()),
            config,
        }
    }

    /// Verification link sent after registration
    pub fn verify_url(&self, token: &str) -> String {
        format!(
            "{}/verificar-cuenta?token={token}",
            self.config.frontend_url.trim_end_matches('/')
        )
    }
}
