/// Database models for DueTask
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts behind registration, login, and the profile page
/// - `task`: To-do items owned by a user
/// - `session`: Server-side login sessions referenced by the session cookie
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
/// let new_user = CreateUser {
///     full_name: "Jess Bourne".to_string(),
///     email: "jess@example.com".to_string(),
///     mobile: "412345678".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod session;
pub mod task;
pub mod user;
