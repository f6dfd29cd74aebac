use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const USER_UPGRADED: &str = "user.upgraded";

/// Billing provider callback. Only `user.upgraded` has an effect; every
/// other event is acknowledged and ignored.
pub async fn polka_webhook(
    State(state): State<AppState>,
    Json(body): Json<WebhookRequest>,
) -> Result<StatusCode, ApiError> {
    if body.event != USER_UPGRADED {
        tracing::debug!(event = %body.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&body.data.user_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid user ID: {}", e)))?;

    state.user_service.upgrade_to_chirpy_red(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookRequest {
    event: String,
    #[serde(default)]
    data: WebhookData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebhookData {
    #[serde(default)]
    user_id: String,
}
