//! Auth API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::auth::{self, CurrentUser, JwtError, JwtService, TOKEN_TYPE_VERIFY};
use crate::core::ServerState;
use crate::db::models::{ProfileResponse, ProfileUpdate, UserCreate, UserRole};
use crate::db::repository::{UserRepository, user::NewUser};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: ProfileResponse,
    pub role: UserRole,
}

/// POST /api/register - create an account (inactive until verified)
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<ProfileResponse>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone_number, "phone_number", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    if !payload.email.contains('@') {
        return Err(AppError::validation("email is not a valid address"));
    }

    let role = UserRole::parse(&payload.role).ok_or_else(|| {
        AppError::validation(format!(
            "Invalid role '{}', expected one of: {}",
            payload.role,
            UserRole::MEMBERS
        ))
    })?;

    let password_hash = auth::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(NewUser {
            name: payload.name,
            last_name: payload.last_name,
            phone_number: payload.phone_number,
            email: payload.email.trim().to_lowercase(),
            password_hash,
            role,
            is_active: false,
        })
        .await?;

    let verify_token = state
        .jwt
        .generate_verify_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
    state
        .mailer
        .spawn_verification(&user.email, &user.name, &state.verify_url(&verify_token));

    tracing::info!(user_id = user.id, email = %user.email, "User registered");

    Ok((
        StatusCode::CREATED,
        ok_with_message(
            ProfileResponse::from(user),
            "Account created, check your email to verify it",
        ),
    ))
}

/// POST /api/login
///
/// Unknown email answers 404; a wrong password or an unverified
/// account answer 401.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_email(payload.email.trim())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let valid = auth::verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::warn!(target: "security", email = %user.email, "Failed login attempt");
        return Err(AppError::invalid_credentials("Invalid email or password"));
    }

    if !user.is_active {
        return Err(AppError::invalid_credentials(
            "Account not verified, check your email",
        ));
    }

    let token = state
        .jwt
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, role = user.role.as_str(), "User logged in");

    Ok(ok(LoginResponse {
        token,
        role: user.role,
        user: ProfileResponse::from(user),
    }))
}

/// POST /api/verify-email
///
/// Activates the account named by the bearer token. Only the short-lived
/// verification token minted at registration is accepted here; an access
/// token cannot flip the flag, and a verification token is worthless on
/// every other route.
pub async fn verify_email(
    State(state): State<ServerState>,
    headers: axum::http::HeaderMap,
) -> AppResult<Json<AppResponse<Value>>> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    let token = JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?;

    let claims = state.jwt.validate_token(token).map_err(|e| match e {
        JwtError::ExpiredToken => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })?;
    if claims.token_type != TOKEN_TYPE_VERIFY {
        tracing::warn!(target: "security", token_type = %claims.token_type, "Rejected non-verification token");
        return Err(AppError::InvalidToken);
    }
    let user = CurrentUser::try_from(claims).map_err(|_| AppError::InvalidToken)?;

    let repo = UserRepository::new(state.db.clone());
    repo.set_active(user.id, true).await?;

    tracing::info!(user_id = user.id, "Email verified");
    Ok(ok_with_message(
        json!({ "verified": true }),
        "Account verified",
    ))
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<ProfileResponse>>> {
    let repo = UserRepository::new(state.db.clone());
    let stored = repo
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(ProfileResponse::from(stored)))
}

/// PUT /api/profile - partial update of the caller's own data
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<AppResponse<ProfileResponse>>> {
    if let Some(email) = &payload.email
        && !email.contains('@')
    {
        return Err(AppError::validation("email is not a valid address"));
    }

    let repo = UserRepository::new(state.db.clone());
    let updated = repo.update_profile(user.id, payload).await?;
    Ok(ok(ProfileResponse::from(updated)))
}
