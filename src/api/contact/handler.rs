//! Contact API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /api/contacto - public contact form, relayed to the restaurant inbox
pub async fn send_message(
    State(state): State<ServerState>,
    Json(payload): Json<ContactRequest>,
) -> AppResult<Json<AppResponse<Value>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.message, "message", MAX_NOTE_LEN)?;
    if !payload.email.contains('@') {
        return Err(AppError::validation("email is not a valid address"));
    }

    state
        .mailer
        .spawn_contact(&payload.name, &payload.email, &payload.message);

    tracing::info!(from = %payload.email, "Contact message received");
    Ok(ok_with_message(json!({ "received": true }), "Message sent"))
}
