use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::session::errors::SessionError;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod admin;
pub mod create_chirp;
pub mod create_user;
pub mod delete_chirp;
pub mod get_chirp;
pub mod healthz;
pub mod list_chirps;
pub mod login;
pub mod polka_webhook;
pub mod refresh;
pub mod revoke;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Responding with 5XX error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidEmail(_) | UserError::InvalidUserId(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ChirpError> for ApiError {
    fn from(err: ChirpError) -> Self {
        match err {
            ChirpError::InvalidChirpId(_) | ChirpError::InvalidBody(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ChirpError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ChirpError::Forbidden => ApiError::Forbidden(err.to_string()),
            ChirpError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials | SessionError::RefreshTokenNotFound => {
                ApiError::Unauthorized(err.to_string())
            }
            SessionError::Password(_) | SessionError::Token(_) | SessionError::Storage(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// User as exposed over HTTP. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            is_chirpy_red: user.is_chirpy_red,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChirpData {
    pub id: String,
    pub body: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Chirp> for ChirpData {
    fn from(chirp: &Chirp) -> Self {
        Self {
            id: chirp.id.to_string(),
            body: chirp.body.as_str().to_string(),
            user_id: chirp.user_id.to_string(),
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtError;

    use super::*;
    use crate::domain::chirp::errors::ChirpBodyError;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                ApiError::from(UserError::EmailAlreadyExists("a@b.c".into())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(ChirpError::InvalidBody(ChirpBodyError::TooLong {
                    max: 140,
                    actual: 141,
                })),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::from(ChirpError::Forbidden), StatusCode::FORBIDDEN),
            (
                ApiError::from(SessionError::RefreshTokenNotFound),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(SessionError::Token(JwtError::EncodingFailed("x".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_too_long_message() {
        let error = ApiError::from(ChirpError::InvalidBody(ChirpBodyError::TooLong {
            max: 140,
            actual: 150,
        }));
        assert_eq!(error, ApiError::BadRequest("Chirp is too long".to_string()));
    }
}
