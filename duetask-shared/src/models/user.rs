/// User model and database operations
///
/// This module provides the User model and the account operations behind
/// registration, login, and profile management.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     full_name TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     mobile TEXT NOT NULL,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use duetask_shared::models::user::{User, CreateUser};
/// use duetask_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// // Register a new account
/// let new_user = CreateUser {
///     full_name: "Jess Bourne".to_string(),
///     email: "jess@example.com".to_string(),
///     mobile: "412345678".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// println!("Created user: {}", user.id);
///
/// // Look up for login
/// let found = User::find_by_email(&pool, "jess@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User model representing a registered account
///
/// The email address doubles as the login identifier and must be unique.
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (BIGSERIAL)
    pub id: i64,

    /// Display name shown on the home and profile pages
    pub full_name: String,

    /// Email address used to log in
    ///
    /// Must be unique across all users
    pub email: String,

    /// Mobile number for SMS reminders, stored without the country prefix
    pub mobile: String,

    /// Argon2id password hash
    ///
    /// Never store plaintext passwords!
    /// Use `auth::password` for hashing/verification
    pub password_hash: String,

    /// When the user account was created
    pub created_at: DateTime<Utc>,

    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// All fields are required. The handler validates presence and hashes the
/// password before building this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub full_name: String,

    /// Email address (login identifier)
    pub email: String,

    /// Mobile number without the country prefix
    pub mobile: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

/// Input for updating a user's profile
///
/// The profile form always submits the full set of editable values, so the
/// update overwrites all three columns at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New display name
    pub full_name: String,

    /// New email address
    pub email: String,

    /// New mobile number
    pub mobile: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - User creation data
    ///
    /// # Returns
    ///
    /// The newly created user with generated ID and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use duetask_shared::models::user::{User, CreateUser};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let new_user = CreateUser {
    ///     full_name: "Jess Bourne".to_string(),
    ///     email: "jess@example.com".to_string(),
    ///     mobile: "412345678".to_string(),
    ///     password_hash: "$argon2id$...".to_string(),
    /// };
    ///
    /// let user = User::create(&pool, new_user).await?;
    /// println!("Created user: {}", user.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, mobile, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, email, mobile, password_hash, created_at, updated_at
            "#,
        )
        .bind(data.full_name)
        .bind(data.email)
        .bind(data.mobile)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - User ID to search for
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, mobile, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Used by login (the email is the login identifier) and by the duplicate
    /// check during registration.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `email` - Email address to search for
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use duetask_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// if let Some(user) = User::find_by_email(&pool, "jess@example.com").await? {
    ///     println!("Found user: {}", user.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, mobile, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates a user's profile
    ///
    /// Overwrites the display name, email, and mobile number, and bumps the
    /// `updated_at` timestamp. The password is not touched here.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - ID of the user to update
    /// * `data` - Replacement profile values
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The new email already belongs to another user
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use duetask_shared::models::user::{User, UpdateProfile};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
    /// let update = UpdateProfile {
    ///     full_name: "Jess B. Bourne".to_string(),
    ///     email: "jess@example.com".to_string(),
    ///     mobile: "498765432".to_string(),
    /// };
    ///
    /// if let Some(user) = User::update_profile(&pool, user_id, update).await? {
    ///     println!("Updated user: {}", user.email);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_profile(
        pool: &PgPool,
        id: i64,
        data: UpdateProfile,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = $2, email = $3, mobile = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, email, mobile, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.full_name)
        .bind(data.email)
        .bind(data.mobile)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            full_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            mobile: "412000111".to_string(),
            password_hash: "hash".to_string(),
        };

        assert_eq!(create_user.email, "test@example.com");
        assert_eq!(create_user.password_hash, "hash");
    }

    #[test]
    fn test_update_profile_struct() {
        let update = UpdateProfile {
            full_name: "Renamed User".to_string(),
            email: "renamed@example.com".to_string(),
            mobile: "412000222".to_string(),
        };

        assert_eq!(update.full_name, "Renamed User");
        assert_eq!(update.mobile, "412000222");
    }

    // Integration tests for database operations are in tests/models_tests.rs
}
