use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use auth::ApiKey;
use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;

/// Extension type to store the authenticated user ID in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Hit counter for the static file server.
#[derive(Debug, Default)]
pub struct Metrics {
    hits: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}

/// Middleware that validates the bearer access token and adds the user to
/// request extensions. Every failure is a 401; the handler never runs.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = auth::header::bearer_token(req.headers()).map_err(|e| {
        tracing::warn!(error = %e, "Rejected request without bearer token");
        unauthorized("Invalid or missing access token")
    })?;

    let user_id = authenticator.verify_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        unauthorized("Invalid or missing access token")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(user_id),
    });

    Ok(next.run(req).await)
}

/// Middleware gating the billing webhook on the configured API key.
pub async fn require_api_key(
    State(api_key): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let candidate = auth::header::api_key(req.headers()).map_err(|e| {
        tracing::warn!(error = %e, "Rejected webhook without API key");
        unauthorized("Incorrect API key")
    })?;

    if !api_key.matches(candidate) {
        tracing::warn!("Rejected webhook with wrong API key");
        return Err(unauthorized("Incorrect API key"));
    }

    Ok(next.run(req).await)
}

pub async fn count_hits(
    State(metrics): State<Arc<Metrics>>,
    req: Request,
    next: Next,
) -> Response {
    metrics.record_hit();
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::AUTHORIZATION;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    const SECRET: &[u8] = b"middleware-test-secret";

    async fn whoami(Extension(auth_user): Extension<AuthenticatedUser>) -> String {
        auth_user.user_id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                Arc::new(Authenticator::new(SECRET)),
                authenticate,
            ))
    }

    async fn call(app: Router, authorization: Option<String>) -> (StatusCode, String) {
        let mut request = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }

        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let user_id = Uuid::new_v4();
        let token = Authenticator::new(SECRET)
            .issue_access_token(user_id, Duration::hours(1))
            .unwrap();

        let (status, body) = call(app(), Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let user_id = Uuid::new_v4();
        let expired = Authenticator::new(SECRET)
            .issue_access_token(user_id, Duration::seconds(-10))
            .unwrap();
        let foreign = Authenticator::new(b"someone-else")
            .issue_access_token(user_id, Duration::hours(1))
            .unwrap();

        let cases = [
            None,
            Some(String::new()),
            Some(format!("Token {}", foreign)),
            Some("Bearer".to_string()),
            Some("Bearer not.a.jwt".to_string()),
            Some(format!("Bearer {}", expired)),
            Some(format!("Bearer {}", foreign)),
        ];

        for authorization in cases {
            let (status, body) = call(app(), authorization.clone()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{:?}", authorization);
            assert!(body.contains("\"error\""));
        }
    }

    #[tokio::test]
    async fn test_api_key_gate() {
        let app = Router::new()
            .route("/hook", get(|| async { StatusCode::NO_CONTENT }))
            .route_layer(middleware::from_fn_with_state(
                ApiKey::new("f271c81ff7084ee5b99a5091b42d486e"),
                require_api_key,
            ));

        for (header, expected) in [
            (
                Some("ApiKey f271c81ff7084ee5b99a5091b42d486e"),
                StatusCode::NO_CONTENT,
            ),
            (Some("ApiKey wrong"), StatusCode::UNAUTHORIZED),
            (
                Some("Bearer f271c81ff7084ee5b99a5091b42d486e"),
                StatusCode::UNAUTHORIZED,
            ),
            (None, StatusCode::UNAUTHORIZED),
        ] {
            let mut request = axum::http::Request::builder().uri("/hook");
            if let Some(value) = header {
                request = request.header(AUTHORIZATION, value);
            }
            let response = app
                .clone()
                .oneshot(request.body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), expected, "{:?}", header);
        }
    }

    #[test]
    fn test_metrics_counter() {
        let metrics = Metrics::new();
        metrics.record_hit();
        metrics.record_hit();
        assert_eq!(metrics.hits(), 2);

        metrics.reset();
        assert_eq!(metrics.hits(), 0);
    }
}
