use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange the refresh token carried as a bearer credential for a new
/// access token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let refresh_token = auth::header::bearer_token(&headers).map_err(|e| {
        tracing::debug!(error = %e, "Refresh request without usable token");
        ApiError::BadRequest("Couldn't find token".to_string())
    })?;

    let token = state.session_service.refresh(refresh_token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData { token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
