//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{LoginRequest, RegisterRequest, Role, User, UserInfo},
};

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
    pub user: UserInfo,
}

/// Plain message response
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new reader account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state.services.users.register(&request, Role::User).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate and receive a token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (token, user) = state
        .services
        .users
        .authenticate(&request.email, &request.password)
        .await?;

    // Token goes out in the JSON body and as a session cookie
    let cookie = Cookie::build((state.config.auth.token_cookie.clone(), token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            user: UserInfo::from(&user),
        }),
    ))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let cookie = Cookie::build((state.config.auth.token_cookie.clone(), ""))
        .path("/")
        .build();

    (
        jar.remove(cookie),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}
