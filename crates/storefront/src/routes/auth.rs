//! Auth handoff route handlers.
//!
//! Authentication itself is an external collaborator: verifying that the
//! caller controls the email happens upstream of this service. These routes
//! are where the gate deposits the verified identity into the session and
//! clears it again on sign-out. The cart core only ever reads the result.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use orchard_core::Email;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;

/// Request body for establishing a session identity.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// `POST /api/auth/login` - establish the session identity.
///
/// The email is structurally validated; it is trusted to have been verified
/// by the gate in front of this endpoint.
#[instrument(skip(session, body))]
pub async fn login(
    session: Session,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<CurrentUser>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let email = Email::parse(&request.email).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let user = CurrentUser::from_email(email);

    set_current_user(&session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    Ok(Json(user))
}

/// `POST /api/auth/logout` - clear the session identity.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}
