//! CurrentUser extractor
//!
//! Lets protected handlers take [`CurrentUser`] as an argument. Falls
//! back to validating the Authorization header when the middleware has
//! not already populated the extensions.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::jwt::TOKEN_TYPE_ACCESS;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => {
                JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
            }
            None => return Err(AppError::Unauthorized),
        };

        match state.jwt.validate_token(token) {
            Ok(claims) => {
                if claims.token_type != TOKEN_TYPE_ACCESS {
                    return Err(AppError::InvalidToken);
                }
                let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(JwtError::ExpiredToken) => Err(AppError::TokenExpired),
            Err(_) => Err(AppError::InvalidToken),
        }
    }
}
