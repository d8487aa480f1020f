//! Authenticated user endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{borrow::BorrowDetails, user::Role},
};

use super::AuthenticatedUser;

/// Profile of the authenticated user with borrow history
#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub borrows: Vec<BorrowDetails>,
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile with borrow history", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = state.services.users.get_by_id(claims.user_id).await?;
    let borrows = state.services.borrows.user_borrows(claims.user_id).await?;

    Ok(Json(ProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        created_at: user.created_at,
        borrows,
    }))
}

/// Get the authenticated user's borrow records
#[utoipa::path(
    get,
    path = "/users/me/borrows",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrow records", body = Vec<BorrowDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_borrows(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowDetails>>> {
    let borrows = state.services.borrows.user_borrows(claims.user_id).await?;

    Ok(Json(borrows))
}
