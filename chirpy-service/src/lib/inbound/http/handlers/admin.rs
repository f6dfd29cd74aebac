use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;

use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        state.metrics.hits()
    ))
}

/// Zero the hit counter and delete every user. Development only.
pub async fn reset(State(state): State<AppState>) -> Result<Response, ApiError> {
    if state.platform != "dev" {
        tracing::warn!(platform = %state.platform, "Reset refused outside dev");
        return Ok((
            StatusCode::FORBIDDEN,
            "Reset is only allowed in dev environment.",
        )
            .into_response());
    }

    state.metrics.reset();
    state.user_service.delete_all_users().await?;

    Ok((StatusCode::OK, "Hits reset to 0").into_response())
}
