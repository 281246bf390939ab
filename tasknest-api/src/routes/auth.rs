/// Authentication endpoints
///
/// This module provides user authentication endpoints:
///
/// - `POST /api/auth/signup` - Create a new account
/// - `POST /api/auth/signin` - Sign in to an existing account
///
/// Both return the user's identity plus a bearer token that subsequent
/// requests present in the `Authorization` header.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tasknest_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Signin request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Authentication response with bearer token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// User ID
    pub user_id: Uuid,

    /// User email
    pub email: String,

    /// User display name
    pub name: String,

    /// Bearer token (7 days)
    pub token: String,
}

/// Create a new user account
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/signup
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "name": "Alice Smith",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    // Racing signups past this check hit the unique index and surface as
    // a conflict instead
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            name: req.name,
            password_hash,
        },
    )
    .await?;

    let claims = jwt::Claims::new(user.id, user.email.as_str());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "New account created");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: user.id,
            email: user.email,
            name: user.name,
            token,
        }),
    ))
}

/// Sign in to an existing account
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/signin
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials. The message is identical for
///   an unknown email and a wrong password, so accounts cannot be enumerated.
/// - `422 Unprocessable Entity`: Validation failed
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    User::update_last_login(&state.db, user.id).await?;

    let claims = jwt::Claims::new(user.id, user.email.as_str());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        user_id: user.id,
        email: user.email,
        name: user.name,
        token,
    }))
}
