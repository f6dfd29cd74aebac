use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = auth::header::bearer_token(&headers).map_err(|e| {
        tracing::debug!(error = %e, "Revoke request without usable token");
        ApiError::BadRequest("Couldn't find token".to_string())
    })?;

    state.session_service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
