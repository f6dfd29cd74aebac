use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateCredentialsCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Replace the caller's email and password.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::BadRequest(format!("Invalid email: {}", e)))?;

    let command = UpdateCredentialsCommand {
        email,
        password: body.password,
    };

    state
        .user_service
        .update_credentials(&auth_user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    email: String,
    password: String,
}
