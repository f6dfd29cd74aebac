use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Post a chirp as the authenticated user.
pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateChirpRequest>,
) -> Result<ApiSuccess<ChirpData>, ApiError> {
    let body = ChirpBody::new(body.body).map_err(ChirpError::from)?;

    state
        .chirp_service
        .create_chirp(CreateChirpCommand { body }, auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}
