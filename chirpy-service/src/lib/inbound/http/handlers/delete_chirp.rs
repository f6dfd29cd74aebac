use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Delete a chirp. Only its author may do so.
pub async fn delete_chirp(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(chirp_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let chirp_id = ChirpId::from_string(&chirp_id).map_err(ChirpError::from)?;

    state
        .chirp_service
        .delete_chirp(&chirp_id, &auth_user.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
