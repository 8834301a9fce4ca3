//! MySQL implementation of the TokenRepository trait.
//!
//! State transitions are single conditional `UPDATE` statements; the number of
//! affected rows tells the caller whether its transition won.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gp_core::domain::entities::access_token::{AccessToken, DeliveryChannel, TokenStatus};
use gp_core::errors::{DomainError, TokenError};
use gp_core::repositories::TokenRepository;

const TOKEN_COLUMNS: &str =
    "id, token_value, student_id, delivery_channel, semester, status, expires_at, used_at, created_at";

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to AccessToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<AccessToken, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let student_id: String = row
            .try_get("student_id")
            .map_err(|e| DomainError::internal(format!("Failed to get student_id: {}", e)))?;
        let channel: String = row
            .try_get("delivery_channel")
            .map_err(|e| DomainError::internal(format!("Failed to get delivery_channel: {}", e)))?;
        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::internal(format!("Failed to get status: {}", e)))?;

        Ok(AccessToken {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid token UUID: {}", e)))?,
            value: row
                .try_get("token_value")
                .map_err(|e| DomainError::internal(format!("Failed to get token_value: {}", e)))?,
            student_id: Uuid::parse_str(&student_id)
                .map_err(|e| DomainError::internal(format!("Invalid student UUID: {}", e)))?,
            delivery_channel: channel.parse::<DeliveryChannel>().map_err(DomainError::internal)?,
            semester: row
                .try_get("semester")
                .map_err(|e| DomainError::internal(format!("Failed to get semester: {}", e)))?,
            status: status.parse::<TokenStatus>().map_err(DomainError::internal)?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::internal(format!("Failed to get expires_at: {}", e)))?,
            used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("used_at")
                .map_err(|e| DomainError::internal(format!("Failed to get used_at: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
        })
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        param: String,
    ) -> Result<Option<AccessToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM access_tokens WHERE {} = ? LIMIT 1",
            TOKEN_COLUMNS, clause
        );
        let row = sqlx::query(&query)
            .bind(param)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find token: {}", e)))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, token: AccessToken) -> Result<AccessToken, DomainError> {
        let query = r#"
            INSERT INTO access_tokens (
                id, token_value, student_id, delivery_channel, semester,
                status, expires_at, used_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(&token.value)
            .bind(token.student_id.to_string())
            .bind(token.delivery_channel.as_str())
            .bind(token.semester)
            .bind(token.status.as_str())
            .bind(token.expires_at)
            .bind(token.used_at)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::from(TokenError::DuplicateValue)
                }
                other => DomainError::internal(format!("Failed to save access token: {}", other)),
            })?;

        Ok(token)
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<AccessToken>, DomainError> {
        self.fetch_one_where("token_value", value.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessToken>, DomainError> {
        self.fetch_one_where("id", id.to_string()).await
    }

    async fn list_all(&self) -> Result<Vec<AccessToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM access_tokens ORDER BY created_at DESC",
            TOKEN_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list access tokens: {}", e)))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query(
            "UPDATE access_tokens SET status = 'Expired' WHERE status = 'Active' AND expires_at < ?",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to expire stale tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn mark_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE access_tokens
            SET status = 'Used', used_at = ?
            WHERE id = ? AND status = 'Active' AND expires_at >= ?
            "#,
        )
        .bind(now)
        .bind(id.to_string())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to mark token used: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE access_tokens SET status = 'Expired' WHERE id = ? AND status = 'Active'",
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to revoke token: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}
