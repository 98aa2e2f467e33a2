/// Authentication utilities
///
/// This module provides the authentication primitives for DueTask:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session_token`]: session token generation and hashing
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: Secure random generation with SHA-256 hashing
///
/// # Example
///
/// ```no_run
/// use duetask_shared::auth::password::{hash_password, verify_password};
/// use duetask_shared::auth::session_token::generate_session_token;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session establishment
/// let (token, token_hash) = generate_session_token();
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session_token;
