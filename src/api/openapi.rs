//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, auth, books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::logout,
        // Users
        users::me,
        users::my_borrows,
        // Books
        books::list_books,
        books::get_book,
        // Admin
        admin::register_admin,
        admin::create_book,
        admin::create_borrow,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            auth::MessageResponse,
            crate::models::user::User,
            crate::models::user::UserInfo,
            crate::models::user::Role,
            crate::models::user::RegisterRequest,
            crate::models::user::LoginRequest,
            // Users
            users::ProfileResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookQuery,
            crate::models::book::CreateBook,
            // Borrows
            crate::models::borrow::Borrow,
            crate::models::borrow::BorrowDetails,
            crate::models::borrow::BorrowStatus,
            crate::models::borrow::CreateBorrow,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "Authenticated user endpoints"),
        (name = "books", description = "Public catalog"),
        (name = "admin", description = "Administrative operations")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
