mod common;

use std::sync::Arc;

use chrono::Duration;
use chirpy_service::domain::session::errors::SessionError;
use chirpy_service::domain::session::ports::SessionServicePort;
use chirpy_service::domain::user::models::UserId;
use common::session_service;
use common::InMemoryRefreshTokenRepository;
use common::InMemoryUserRepository;

fn service() -> common::TestSessionService {
    session_service(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryRefreshTokenRepository::default()),
    )
}

#[tokio::test]
async fn test_refresh_token_lifecycle() {
    let service = service();
    let user_id = UserId::new();

    let token = service
        .issue_refresh_token(user_id, Duration::days(60))
        .await
        .unwrap();
    assert_eq!(token.len(), 64);

    assert_eq!(service.resolve_user(&token).await.unwrap(), user_id);

    service.revoke(&token).await.unwrap();

    let result = service.resolve_user(&token).await;
    assert!(matches!(result, Err(SessionError::RefreshTokenNotFound)));
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let service = service();
    let user_id = UserId::new();

    let token = service
        .issue_refresh_token(user_id, Duration::days(60))
        .await
        .unwrap();

    service.revoke(&token).await.unwrap();
    service.revoke(&token).await.unwrap();

    let result = service.resolve_user(&token).await;
    assert!(matches!(result, Err(SessionError::RefreshTokenNotFound)));

    let result = service.refresh(&token).await;
    assert!(matches!(result, Err(SessionError::RefreshTokenNotFound)));
}

#[tokio::test]
async fn test_expired_refresh_token_is_not_found() {
    let service = service();

    let token = service
        .issue_refresh_token(UserId::new(), Duration::seconds(-1))
        .await
        .unwrap();

    let result = service.resolve_user(&token).await;
    assert!(matches!(result, Err(SessionError::RefreshTokenNotFound)));

    let result = service.refresh(&token).await;
    assert!(matches!(result, Err(SessionError::RefreshTokenNotFound)));
}

#[tokio::test]
async fn test_unknown_refresh_token() {
    let service = service();

    let result = service.resolve_user(&auth::refresh::generate()).await;
    assert!(matches!(result, Err(SessionError::RefreshTokenNotFound)));

    // Revoking a token that was never issued still succeeds.
    service.revoke("never-issued").await.unwrap();
}

#[tokio::test]
async fn test_refresh_issues_verifiable_access_token() {
    let service = service();
    let user_id = UserId::new();

    let token = service
        .issue_refresh_token(user_id, Duration::days(1))
        .await
        .unwrap();
    let access_token = service.refresh(&token).await.unwrap();

    let verified = auth::Authenticator::new(common::JWT_SECRET)
        .verify_access_token(&access_token)
        .unwrap();
    assert_eq!(verified, user_id.0);
}
