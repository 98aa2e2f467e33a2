/// Application state, session middleware, and router builder
///
/// This module defines the shared application state, the cookie-session
/// authentication layer, and the function that assembles the Axum router.
///
/// # Sessions
///
/// Login stores an opaque token in the `duetask_session` cookie and its
/// SHA-256 hash in the `sessions` table. The middleware resolves the cookie
/// on every protected request; anything missing, malformed, expired, or
/// unknown redirects the browser to `/login` instead of returning an error
/// page.
///
/// # Example
///
/// ```no_run
/// use duetask_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = duetask_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use duetask_shared::auth::session_token;
use duetask_shared::models::{session::Session, user::User};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Name of the browser session cookie
pub const SESSION_COOKIE: &str = "duetask_session";

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Hours a new session stays valid
    pub fn session_ttl_hours(&self) -> i64 {
        self.config.session.ttl_hours
    }
}

/// The authenticated user, injected into request extensions by the session
/// middleware
#[derive(Clone)]
pub struct CurrentUser {
    /// Full user row for the session owner
    pub user: User,
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                    # Landing page (public)
/// ├── GET  /health              # Health check (public)
/// ├── GET+POST /register        # Account creation (public)
/// ├── GET+POST /login           # Login form and submit (public)
/// ├── GET  /logout              # Clears the session (public)
/// ├── GET  /home                # Task list (session required)
/// ├── GET+POST /add             # Add-task form and submit
/// ├── POST /tasks/search        # Title search
/// ├── POST /update/:task_id     # Mark a task complete
/// ├── POST /delete/:task_id     # Delete a task
/// ├── GET  /profile             # Profile view
/// └── GET+POST /profile/update/ # Profile edit form and submit
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Session authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes, no session required
    let public_routes = Router::new()
        .route("/", get(routes::index::landing))
        .route("/health", get(routes::index::health_check))
        .route(
            "/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_form).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout));

    // Task and profile routes, session required
    let protected_routes = Router::new()
        .route("/home", get(routes::tasks::home))
        .route(
            "/add",
            get(routes::tasks::add_form).post(routes::tasks::add_task),
        )
        .route("/tasks/search", post(routes::tasks::search_tasks))
        .route("/update/:task_id", post(routes::tasks::complete_task))
        .route("/delete/:task_id", post(routes::tasks::delete_task))
        .route("/profile", get(routes::profile::view_profile))
        .route(
            "/profile/update/",
            get(routes::profile::update_form).post(routes::profile::update_profile),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Resolves the session cookie to a user and injects `CurrentUser` into
/// request extensions. Requests without a usable session are redirected to
/// the login page.
async fn session_auth_layer(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match authenticate(&state, &jar).await {
        Ok(Some(user)) => user,
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(e) => return ApiError::from(e).into_response(),
    };

    req.extensions_mut().insert(CurrentUser { user });
    next.run(req).await
}

/// Resolves the session cookie to its user
///
/// Returns `Ok(None)` for a missing cookie, a token that fails the format
/// check, or a token without a live session row. Only infrastructure
/// failures surface as errors.
pub(crate) async fn authenticate(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<User>, sqlx::Error> {
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value(),
        None => return Ok(None),
    };

    // Reject garbage before touching the database
    if !session_token::validate_session_token_format(token) {
        return Ok(None);
    }

    let token_hash = session_token::hash_session_token(token);
    let session = match Session::find_by_token_hash(&state.db, &token_hash).await? {
        Some(session) => session,
        None => return Ok(None),
    };

    User::find_by_id(&state.db, session.user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_name_is_stable() {
        // The cookie name is part of the browser contract; renaming it logs
        // every user out.
        assert_eq!(SESSION_COOKIE, "duetask_session");
    }
}
