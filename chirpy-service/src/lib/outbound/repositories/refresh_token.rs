use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn insert(&self, record: RefreshTokenRecord) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens
                (token_hash, user_id, created_at, updated_at, expires_at, revoked_at)
            VALUES ($1, $2, $3, $3, $4, $5)
            "#,
        )
        .bind(&record.token_hash)
        .bind(record.user_id.0)
        .bind(record.created_at)
        .bind(record.expires_at)
        .bind(record.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn find_user_id_by_valid_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserId>, SessionError> {
        let user_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM refresh_tokens
            WHERE token_hash = $1
              AND revoked_at IS NULL
              AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

        Ok(user_id.map(UserId))
    }

    async fn revoke(&self, token_hash: &str) -> Result<u64, SessionError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
