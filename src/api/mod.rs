//! API handlers for Libris REST endpoints

pub mod admin;
pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    auth::{extract, guard, Claims},
    error::AppError,
    AppState,
};

/// Extractor for the authenticated user. Handlers receive the resolved
/// identity as a parameter; the token is verified at most once per
/// request — claims already checked by the edge middleware are reused
/// from request extensions.
pub struct AuthenticatedUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthenticatedUser(claims.clone()));
        }

        let identity = extract::identity(
            &parts.headers,
            &state.auth,
            &state.config.auth.token_cookie,
        );
        let claims = guard::guard(identity, None)?;

        Ok(AuthenticatedUser(claims))
    }
}
