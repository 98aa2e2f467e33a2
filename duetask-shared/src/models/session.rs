/// Session model and database operations
///
/// This module provides the Session model backing cookie-based logins. Each
/// successful login creates one row; the browser holds the plaintext token in
/// an HttpOnly cookie and the server stores only its hash.
///
/// # Security
///
/// - Tokens are stored as SHA-256 hashes (never plaintext)
/// - Lookups ignore rows past their expiry, so a stale cookie is just an
///   anonymous request
/// - Logging out deletes the row, which invalidates the cookie immediately
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     token_hash TEXT NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Session model representing one logged-in browser
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Unique session ID
    pub id: i64,

    /// User this session belongs to
    pub user_id: i64,

    /// SHA-256 hash of the session token (never store plaintext!)
    pub token_hash: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session stops being honored
    pub expires_at: DateTime<Utc>,
}

/// Input for creating a new session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// User ID
    pub user_id: i64,

    /// SHA-256 hash of the token handed to the client
    pub token_hash: String,

    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session row
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails. A token hash collision
    /// would violate the unique constraint, but with 32 random characters of
    /// entropy that does not happen in practice.
    pub async fn create(pool: &PgPool, data: CreateSession) -> Result<Self, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, created_at, expires_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.token_hash)
        .bind(data.expires_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Finds a live session by token hash
    ///
    /// Expired sessions are filtered out here rather than eagerly deleted;
    /// `delete_expired_for_user` cleans them up on the user's next login.
    ///
    /// # Returns
    ///
    /// The session if it exists and has not expired, None otherwise
    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token_hash, created_at, expires_at
            FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Deletes a session by token hash (logout)
    ///
    /// # Returns
    ///
    /// True if a session was deleted, false if no matching row existed
    pub async fn delete_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes all expired sessions belonging to a user
    ///
    /// Called on login so abandoned sessions don't accumulate forever.
    ///
    /// # Returns
    ///
    /// Number of rows removed
    pub async fn delete_expired_for_user(pool: &PgPool, user_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= NOW()")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_struct() {
        let expires = Utc::now() + chrono::Duration::hours(168);
        let create = CreateSession {
            user_id: 7,
            token_hash: "abc123".to_string(),
            expires_at: expires,
        };

        assert_eq!(create.user_id, 7);
        assert_eq!(create.expires_at, expires);
    }

    // Integration tests for database operations are in tests/models_tests.rs
}
