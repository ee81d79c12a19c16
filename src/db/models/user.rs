//! User Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Account role, carried as a JWT claim and enforced by the role middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Cliente,
    Mesero,
    Cocina,
}

impl UserRole {
    pub const MEMBERS: &'static str = "ADMIN, CLIENTE, MESERO, COCINA";

    /// Case-insensitive member lookup
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "CLIENTE" => Some(Self::Cliente),
            "MESERO" => Some(Self::Mesero),
            "COCINA" => Some(Self::Cocina),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Cliente => "CLIENTE",
            Self::Mesero => "MESERO",
            Self::Cocina => "COCINA",
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    /// Never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Profile update payload (original frontend sends camelCase keys)
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "telephone")]
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Profile view returned by GET /api/profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "telephone")]
    pub phone_number: String,
    pub email: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
        }
    }
}
