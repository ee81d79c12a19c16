//! Server configuration
//!
//! Every setting can be overridden from the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATABASE_PATH | <WORK_DIR>/comanda.db | SQLite database file |
//! | FRONTEND_URL | http://localhost:5173 | Base URL used in email links |
//! | JWT_SECRET | generated (dev only) | Token signing secret |
//! | JWT_EXPIRATION_MINUTES | 1440 | Access token lifetime |
//! | MAIL_API_URL | unset (mailer disabled) | Mail relay endpoint |
//! | MAIL_API_KEY | empty | Mail relay credential |
//! | MAIL_SENDER | no-reply@comanda.local | From address |

use crate::auth::JwtConfig;
use crate::notify::MailConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Base URL of the frontend, used in verification links
    pub frontend_url: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Mail relay configuration
    pub mail: MailConfig,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{}/comanda.db", work_dir.trim_end_matches('/')));

        Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            jwt: JwtConfig::default(),
            mail: MailConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the paths and port, keeping the rest from the
    /// environment. Used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = format!("{}/comanda.db", config.work_dir.trim_end_matches('/'));
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
