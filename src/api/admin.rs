//! Administrative endpoints
//!
//! All paths here sit under an admin prefix in the route table. Handlers
//! still call `require_admin` so the invariant holds even for a handler
//! mounted outside that prefix.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook},
        borrow::{Borrow, CreateBorrow},
        user::{RegisterRequest, Role, User},
    },
};

use super::AuthenticatedUser;

/// Register a new admin account
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin registered", body = User),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Admin privileges required"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_admin(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    claims.require_admin()?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state.services.users.register(&request, Role::Admin).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Admin privileges required"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require_admin()?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = state.services.catalog.create_book(request).await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// Create a borrow record
#[utoipa::path(
    post,
    path = "/admin/borrows",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Borrow record created", body = Borrow),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<Borrow>)> {
    claims.require_admin()?;

    let borrow = state.services.borrows.create_borrow(&request).await?;

    Ok((StatusCode::CREATED, Json(borrow)))
}
