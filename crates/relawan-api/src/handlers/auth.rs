// ============================================================================
// Relawan API - Auth Handlers
// File: crates/relawan-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login, register, token, logout, profile)

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use relawan_core::domain::{AuthUser, NewUser, UserProfile};
use relawan_security::TokenPair;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::upload::MultipartForm;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserRef {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserRef,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: AuthUser,
    pub skills: Vec<String>,
}

/// Login handler - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let Json(payload) = payload?;
    let result = state.auth.login(&payload.identifier, &payload.password).await?;

    Ok(Json(ApiResponse::success_with_message(
        LoginResponse {
            user: UserRef {
                id: result.user_id,
                email: result.email,
            },
            tokens: result.tokens,
        },
        "Login successful",
    )))
}

/// Register handler - POST /api/auth/register (multipart, optional `foto`)
pub async fn register(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TokenPair>>), ApiError> {
    let mut form = MultipartForm::read(multipart?).await?;

    let mut stored = Vec::new();
    if let Some(foto) = form.take_file("foto") {
        stored.push(state.uploads.save_image(&foto).await?);
    }

    let new_user = NewUser {
        nama: form.text_or_empty("nama"),
        email: form.text_or_empty("email"),
        password: form.text_or_empty("password"),
        alamat: form.text("alamat").map(str::to_string),
        foto: stored.first().map(|f| f.public_url.clone()),
    };
    let skills = form.text_or_empty("skills");

    let result = state.auth.register(new_user, &skills).await;
    if result.is_err() {
        state.uploads.discard(&stored).await;
    }
    let tokens = result?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(tokens, "User registered successfully")),
    ))
}

/// Refresh token handler - POST /api/auth/token
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    let Json(payload) = payload?;
    let tokens = state.auth.refresh_access_token(&payload.refresh_token).await?;
    Ok(Json(ApiResponse::success_with_message(tokens, "Token refreshed")))
}

/// Logout handler - POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.auth.logout(user.id).await?;
    Ok(Json(ApiResponse::message("Logged out successfully")))
}

/// GET /api/auth/data
pub async fn current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<CurrentUserResponse>>, ApiError> {
    let skills = state.auth.current_user_skills(user.id).await?;
    Ok(Json(ApiResponse::success(CurrentUserResponse { user, skills })))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = state.auth.profile(user.id).await?;
    Ok(Json(ApiResponse::success(profile)))
}
