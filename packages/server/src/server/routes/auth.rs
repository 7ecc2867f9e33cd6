use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::common::{AppError, Role};
use crate::domains::auth::actions;
use crate::server::app::AppState;
use crate::server::routes::MessageResponse;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub contact: String,
}

/// POST /auth/login — issue a one-time code for a contact.
///
/// Responds identically for new and existing contacts.
pub async fn send_code(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    actions::request_code(&request.contact, &state.deps).await?;

    Ok(Json(MessageResponse {
        message: "OTP sent successfully".to_string(),
    }))
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub contact: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub verified: bool,
    pub access_token: String,
    pub token_type: &'static str,
    pub role: Role,
}

/// POST /auth/verify-otp — verify a code and issue a session token.
pub async fn verify_code(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let session = actions::verify_code(&request.contact, &request.code, &state.deps).await?;

    Ok(Json(TokenResponse {
        verified: true,
        access_token: session.token,
        token_type: "bearer",
        role: session.role,
    }))
}
