/// Authentication endpoints
///
/// This module provides account and session endpoints for the browser flow:
/// registration, login, and logout. Forms post
/// `application/x-www-form-urlencoded` bodies and successful submits answer
/// with a redirect, so plain HTML forms work without any client scripting.
///
/// # Endpoints
///
/// - `GET /register` - Registration form
/// - `POST /register` - Create an account
/// - `GET /login` - Login form
/// - `POST /login` - Start a session
/// - `GET /logout` - End the session

use crate::{
    app::{authenticate, AppState, SESSION_COOKIE},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use duetask_shared::{
    auth::{password, session_token},
    models::{
        session::{CreateSession, Session},
        user::{CreateUser, User},
    },
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Form descriptor returned by the GET form endpoints
#[derive(Debug, Serialize)]
pub struct AuthFormResponse {
    /// Form name
    pub form: &'static str,

    /// Fields the form expects
    pub fields: &'static [&'static str],
}

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Full display name
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    /// Email address, used as the login identifier
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Mobile number without the country prefix
    #[validate(length(min = 1, message = "Mobile number is required"))]
    pub mobile: String,

    /// Password (stored as an Argon2id hash)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
///
/// Deliberately unvalidated: any mismatch, including a malformed email,
/// answers with the same 401 so the form leaks nothing about which accounts
/// exist.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Registration form
///
/// # Endpoint
///
/// ```text
/// GET /register
/// ```
pub async fn register_form() -> Json<AuthFormResponse> {
    Json(AuthFormResponse {
        form: "register",
        fields: &["full_name", "email", "mobile", "password"],
    })
}

/// Register a new user
///
/// Creates the account and redirects to the login page. Registration does
/// not log the user in.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/x-www-form-urlencoded
///
/// full_name=Jane+Doe&email=jane%40example.com&mobile=412345678&password=hunter2hunter2
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Form(req): Form<RegisterRequest>,
) -> ApiResult<Redirect> {
    req.validate()?;

    // Friendly pre-check; the unique index still backstops a concurrent
    // register with the same address
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            full_name: req.full_name,
            email: req.email,
            mobile: req.mobile,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "New user registered");

    Ok(Redirect::to("/login"))
}

/// Login form
///
/// An already-authenticated browser is sent straight to `/home`.
///
/// # Endpoint
///
/// ```text
/// GET /login
/// ```
pub async fn login_form(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Response> {
    if authenticate(&state, &jar).await?.is_some() {
        return Ok(Redirect::to("/home").into_response());
    }

    Ok(Json(AuthFormResponse {
        form: "login",
        fields: &["email", "password"],
    })
    .into_response())
}

/// Login and start a session
///
/// Verifies the credentials, mints an opaque session token, and sets it as
/// an HttpOnly cookie. Expired sessions for the user are purged on the way
/// through. A browser that already holds a valid session is sent straight
/// to `/home` without touching the submitted credentials.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/x-www-form-urlencoded
///
/// email=jane%40example.com&password=hunter2hunter2
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password (same message for
///   both)
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<LoginRequest>,
) -> ApiResult<(CookieJar, Redirect)> {
    if authenticate(&state, &jar).await?.is_some() {
        return Ok((jar, Redirect::to("/home")));
    }

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    // Opportunistic purge; keeps the sessions table from accumulating dead
    // rows for active users
    let purged = Session::delete_expired_for_user(&state.db, user.id).await?;
    if purged > 0 {
        tracing::debug!(user_id = user.id, purged, "Purged expired sessions");
    }

    let (token, token_hash) = session_token::generate_session_token();
    let expires_at = Utc::now() + Duration::hours(state.session_ttl_hours());

    Session::create(
        &state.db,
        CreateSession {
            user_id: user.id,
            token_hash,
            expires_at,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User logged in");

    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    );

    Ok((jar, Redirect::to("/home")))
}

/// Logout and clear the session
///
/// Deletes the session row for the presented cookie and expires the cookie.
/// A missing or already-dead session still clears the cookie and redirects,
/// so logout never fails from the browser's point of view.
///
/// # Endpoint
///
/// ```text
/// GET /logout
/// ```
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Redirect)> {
    let token_hash = jar
        .get(SESSION_COOKIE)
        .map(|cookie| session_token::hash_session_token(cookie.value()));

    if let Some(token_hash) = token_hash {
        let deleted = Session::delete_by_token_hash(&state.db, &token_hash).await?;
        if deleted {
            tracing::info!("User logged out");
        }
    }

    // Removal must match the path the cookie was set with
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    Ok((jar, Redirect::to("/")))
}
