//! Role checks converting missing or insufficient identity into terminal
//! 401/403 responses

use crate::{
    error::{AppError, AppResult},
    models::user::Role,
};

use super::token::Claims;

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require an exact role match.
    pub fn require_role(&self, required: Role) -> AppResult<()> {
        match (required, self.role) {
            (Role::User, Role::User) | (Role::Admin, Role::Admin) => Ok(()),
            (required, _) => Err(AppError::Authorization(format!(
                "{} role required",
                required
            ))),
        }
    }

    /// Require admin privileges.
    pub fn require_admin(&self) -> AppResult<()> {
        self.require_role(Role::Admin)
    }
}

/// Resolve an optional identity against an optional role requirement.
/// No identity is a 401; a role mismatch is a 403; otherwise the caller
/// receives the resolved claims to work with.
pub fn guard(identity: Option<Claims>, required: Option<Role>) -> AppResult<Claims> {
    let claims =
        identity.ok_or_else(|| AppError::Authentication("Unauthorized".to_string()))?;

    if let Some(role) = required {
        claims.require_role(role)?;
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn claims(role: Role) -> Claims {
        Claims {
            sub: "1".to_string(),
            user_id: 1,
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn no_identity_is_unauthorized() {
        let err = guard(None, None).unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn no_identity_with_required_role_is_still_unauthorized() {
        let err = guard(None, Some(Role::Admin)).unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn user_against_admin_requirement_is_forbidden() {
        let err = guard(Some(claims(Role::User)), Some(Role::Admin)).unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn admin_against_admin_requirement_is_allowed() {
        let resolved = guard(Some(claims(Role::Admin)), Some(Role::Admin)).unwrap();
        assert!(resolved.is_admin());
    }

    #[test]
    fn any_identity_without_requirement_is_allowed() {
        assert!(guard(Some(claims(Role::User)), None).is_ok());
        assert!(guard(Some(claims(Role::Admin)), None).is_ok());
    }
}
