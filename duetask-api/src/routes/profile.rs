/// Profile endpoints
///
/// This module provides the profile view and the profile edit flow. Updates
/// overwrite all three editable fields at once, mirroring the edit form that
/// always submits every input.
///
/// # Endpoints
///
/// - `GET /profile` - Profile view
/// - `GET /profile/update/` - Edit form prefilled with current values
/// - `POST /profile/update/` - Apply the edit

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
};
use axum::{extract::State, response::Redirect, Extension, Form, Json};
use duetask_shared::models::user::{UpdateProfile, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profile response
///
/// The password hash never leaves the server; this is the full set of fields
/// a user gets to see about themselves.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// User ID
    pub id: i64,

    /// Full display name
    pub full_name: String,

    /// Email address
    pub email: String,

    /// Mobile number without the country prefix
    pub mobile: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        ProfileResponse {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            mobile: user.mobile,
        }
    }
}

/// Update profile request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Full display name
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    /// Email address
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Mobile number without the country prefix
    #[validate(length(min = 1, message = "Mobile number is required"))]
    pub mobile: String,
}

/// Profile view
///
/// # Endpoint
///
/// ```text
/// GET /profile
/// Cookie: duetask_session=<token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "full_name": "Jane Doe",
///   "email": "jane@example.com",
///   "mobile": "412345678"
/// }
/// ```
pub async fn view_profile(
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ProfileResponse>> {
    Ok(Json(ProfileResponse::from(current.user)))
}

/// Profile edit form
///
/// Returns the current values so the form can prefill its inputs.
///
/// # Endpoint
///
/// ```text
/// GET /profile/update/
/// ```
pub async fn update_form(
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ProfileResponse>> {
    Ok(Json(ProfileResponse::from(current.user)))
}

/// Apply a profile edit
///
/// Overwrites name, email, and mobile in one shot. Changing the email to an
/// address another account holds trips the unique index and surfaces as a
/// conflict.
///
/// # Endpoint
///
/// ```text
/// POST /profile/update/
/// Content-Type: application/x-www-form-urlencoded
///
/// full_name=Jane+Doe&email=jane%40example.com&mobile=412345678
/// ```
///
/// # Errors
///
/// - `404 Not Found`: The account vanished mid-session
/// - `409 Conflict`: Email already belongs to another account
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Form(req): Form<UpdateProfileRequest>,
) -> ApiResult<Redirect> {
    req.validate()?;

    let updated = User::update_profile(
        &state.db,
        current.user.id,
        UpdateProfile {
            full_name: req.full_name,
            email: req.email,
            mobile: req.mobile,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = updated.id, "Profile updated");

    Ok(Redirect::to("/profile"))
}
