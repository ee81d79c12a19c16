//! Authentication middleware
//!
//! `require_auth` runs on the whole `/api/` surface and injects
//! [`CurrentUser`]; a small table of public method/path pairs is let
//! through without a token. Role checks are layered per route with
//! [`require_role`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::jwt::TOKEN_TYPE_ACCESS;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::models::UserRole;
use crate::utils::AppError;

/// Routes reachable without a token
const PUBLIC_ROUTES: &[(&Method, &str)] = &[
    (&Method::POST, "/api/register"),
    (&Method::POST, "/api/login"),
    (&Method::POST, "/api/contacto"),
    (&Method::POST, "/api/reservations"),
    // validates its own verification token
    (&Method::POST, "/api/verify-email"),
    (&Method::GET, "/api/productos"),
    (&Method::GET, "/api/dishes"),
    (&Method::GET, "/api/drinks"),
];

fn is_public_route(method: &Method, path: &str) -> bool {
    PUBLIC_ROUTES
        .iter()
        .any(|(m, p)| *m == method && *p == path)
}

/// Require a valid access token.
///
/// Skips OPTIONS (CORS preflight), non-`/api/` paths and the public
/// route table. On success the [`CurrentUser`] lands in the request
/// extensions.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
        }
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            if claims.token_type != TOKEN_TYPE_ACCESS {
                tracing::warn!(
                    target: "security",
                    token_type = %claims.token_type,
                    uri = %req.uri(),
                    "Non-access token on protected route"
                );
                return Err(AppError::InvalidToken);
            }
            let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token rejected");
            match e {
                JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

/// Require one of the given roles (admins always pass)
pub fn require_role(
    roles: &'static [UserRole],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::Unauthorized)?;

            if !user.has_role(roles) {
                tracing::warn!(
                    target: "security",
                    user_id = user.id,
                    user_role = user.role.as_str(),
                    "Role check failed"
                );
                return Err(AppError::forbidden(format!(
                    "Requires role: {}",
                    roles
                        .iter()
                        .map(|r| r.as_str())
                        .collect::<Vec<_>>()
                        .join(" | ")
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_route_table() {
        assert!(is_public_route(&Method::POST, "/api/login"));
        assert!(is_public_route(&Method::POST, "/api/verify-email"));
        assert!(is_public_route(&Method::GET, "/api/productos"));
        assert!(!is_public_route(&Method::GET, "/api/reservations"));
        assert!(!is_public_route(&Method::POST, "/api/orders"));
    }
}
