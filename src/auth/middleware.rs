//! Edge middleware enforcing the protected/admin path table
//!
//! Runs at the outer router, before any handler. Verified claims are
//! stashed in request extensions so handlers (through the
//! `AuthenticatedUser` extractor) never re-verify the token.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{config::RoutesConfig, error::AppError, AppState};

use super::extract;

/// Result of matching a request path against the configured prefix table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Public,
    Protected,
    Admin,
}

/// Prefix matching: a path is protected when any protected prefix
/// matches, and escalates to admin when an admin prefix matches too.
/// An admin prefix missing from the protected list is not enforced.
pub fn classify(routes: &RoutesConfig, path: &str) -> PathClass {
    if !routes
        .protected_prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()))
    {
        return PathClass::Public;
    }

    if routes
        .admin_prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()))
    {
        PathClass::Admin
    } else {
        PathClass::Protected
    }
}

/// Per-request authorization dispatch. Stateless; every rejection is
/// terminal for the request.
pub async fn authorize(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let class = classify(&state.config.routes, req.uri().path());
    if class == PathClass::Public {
        return next.run(req).await;
    }

    let Some(token) = extract::credential(req.headers(), &state.config.auth.token_cookie) else {
        return AppError::Authentication("Unauthorized".to_string()).into_response();
    };

    let claims = match state.auth.verify(&token) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    if class == PathClass::Admin {
        if let Err(err) = claims.require_admin() {
            return err.into_response();
        }
    }

    req.extensions_mut().insert(claims);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RoutesConfig {
        RoutesConfig {
            protected_prefixes: vec![
                "/api/v1/users".to_string(),
                "/api/v1/borrows".to_string(),
                "/api/v1/admin".to_string(),
            ],
            admin_prefixes: vec!["/api/v1/admin".to_string()],
        }
    }

    #[test]
    fn unlisted_paths_are_public() {
        let routes = routes();
        assert_eq!(classify(&routes, "/api/v1/books"), PathClass::Public);
        assert_eq!(classify(&routes, "/api/v1/auth/login"), PathClass::Public);
        assert_eq!(classify(&routes, "/api/v1/health"), PathClass::Public);
    }

    #[test]
    fn protected_prefixes_match_whole_subtrees() {
        let routes = routes();
        assert_eq!(classify(&routes, "/api/v1/users/me"), PathClass::Protected);
        assert_eq!(
            classify(&routes, "/api/v1/users/me/borrows"),
            PathClass::Protected
        );
    }

    #[test]
    fn admin_prefixes_escalate() {
        let routes = routes();
        assert_eq!(classify(&routes, "/api/v1/admin/books"), PathClass::Admin);
        assert_eq!(classify(&routes, "/api/v1/admin/users"), PathClass::Admin);
    }

    #[test]
    fn admin_prefix_outside_protected_list_is_not_enforced() {
        let routes = RoutesConfig {
            protected_prefixes: vec!["/api/v1/users".to_string()],
            admin_prefixes: vec!["/api/v1/admin".to_string()],
        };
        assert_eq!(classify(&routes, "/api/v1/admin/books"), PathClass::Public);
    }
}
