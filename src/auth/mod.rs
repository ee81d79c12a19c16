//! Authentication Module
//!
//! JWT issuance/validation, argon2 password hashing and the axum
//! middleware enforcing the role model.

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{
    Claims, CurrentUser, JwtConfig, JwtError, JwtService, TOKEN_TYPE_ACCESS, TOKEN_TYPE_VERIFY,
};
pub use middleware::{require_auth, require_role};
pub use password::{hash_password, verify_password};
