//! Auth service handlers: token verification, registration, login, profiles.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use shopflow_auth::VerifyResponse;
use shopflow_core::{Identity, UserProfile, UserRecord};

use crate::error::ApiError;
use crate::extract::{authorization_header, AuthCaller, ValidatedJson};
use crate::handlers::SuccessResponse;
use crate::password::{hash_password, verify_password};
use crate::state::AuthState;

/// Registration and update body.
#[derive(Deserialize)]
pub struct UserRequest {
    /// Unique login.
    pub username: String,
    /// Plain-text password; hashed before storage.
    pub password: String,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
}

impl UserRequest {
    fn into_record(self) -> Result<UserRecord, ApiError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "username and password are required".into(),
            ));
        }

        Ok(UserRecord {
            password_hash: hash_password(&self.password)?,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        })
    }
}

/// Login body.
#[derive(Deserialize)]
pub struct LoginRequest {
    /// Login.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
pub struct LoginResponse {
    /// Access token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
}

fn ensure_owner(auth: &AuthCaller, username: &str) -> Result<(), ApiError> {
    if auth.0.login() == username {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "you can only access your own account".into(),
        ))
    }
}

/// Verify a token pair, rotating it when only the refresh token is valid.
pub async fn verify(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, ApiError> {
    let caller = state
        .relay
        .authenticate(authorization_header(&headers))
        .await?;

    Ok(Json(VerifyResponse {
        login: caller.identity.login,
        email: caller.identity.email,
        access: caller.tokens.access,
        refresh: caller.tokens.refresh,
    }))
}

/// Register a new user.
pub async fn create_user(
    State(state): State<Arc<AuthState>>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let user = request.into_record()?;
    state.users.create_user(&user).await?;

    tracing::info!(username = %user.username, "User registered");

    Ok(Json(SuccessResponse::new(format!(
        "user with username '{}' created",
        user.username
    ))))
}

/// Exchange credentials for a token pair.
///
/// The pair is returned in the body and as the `Authorization` header.
pub async fn login(
    State(state): State<Arc<AuthState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || ApiError::Forbidden("invalid username or password".into());

    let user = state
        .users
        .get_user(&request.username)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&request.password, &user.password_hash) {
        tracing::warn!(username = %request.username, "Login rejected");
        return Err(invalid());
    }

    let tokens = state
        .authority
        .issue_pair(&Identity::new(&user.username, &user.email))
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(username = %user.username, "User logged in");

    Ok((
        [(AUTHORIZATION, tokens.authorization_value())],
        Json(LoginResponse {
            access: tokens.access,
            refresh: tokens.refresh,
        }),
    ))
}

/// Get the caller's own profile.
pub async fn get_user(
    State(state): State<Arc<AuthState>>,
    auth: AuthCaller,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    ensure_owner(&auth, &username)?;

    let user = state
        .users
        .get_user(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {username}")))?;

    Ok(Json(UserProfile::from(&user)))
}

/// Replace the caller's own profile.
pub async fn update_user(
    State(state): State<Arc<AuthState>>,
    auth: AuthCaller,
    Path(username): Path<String>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    ensure_owner(&auth, &username)?;

    let user = request.into_record()?;
    state.users.update_user(&username, &user).await?;

    tracing::info!(username = %username, new_username = %user.username, "User updated");

    Ok(Json(SuccessResponse::new(format!(
        "information for user with username '{username}' updated"
    ))))
}

/// Delete the caller's own account.
pub async fn delete_user(
    State(state): State<Arc<AuthState>>,
    auth: AuthCaller,
    Path(username): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    ensure_owner(&auth, &username)?;

    state.users.delete_user(&username).await?;

    tracing::info!(username = %username, "User deleted");

    Ok(Json(SuccessResponse::new(format!(
        "user with username '{username}' deleted"
    ))))
}
