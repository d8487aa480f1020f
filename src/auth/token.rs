//! Signed, time-limited identity tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::Role,
};

/// Claims embedded in a signed token. Decoding is typed, so a token whose
/// payload is not a structured claim (a bare string, a number) fails
/// verification instead of passing through as a partial identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Standard JWT subject, carries the user id as a string
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies identity tokens with the process-wide shared secret
/// (HMAC-SHA256). Constructed once at startup from [`AuthConfig`]; a
/// missing secret aborts initialization rather than surfacing per-request.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    default_ttl: Duration,
}

impl TokenCodec {
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        if config.jwt_secret.trim().is_empty() {
            return Err(AppError::Configuration(
                "auth.jwt_secret is not configured".to_string(),
            ));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            default_ttl: Duration::days(config.token_ttl_days),
        })
    }

    /// Issue a signed token for the given principal, expiring after `ttl`
    /// (the configured default when `None`).
    pub fn issue(&self, user_id: i32, role: Role, ttl: Option<Duration>) -> AppResult<String> {
        let now = Utc::now();
        let ttl = ttl.unwrap_or(self.default_ttl);

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify signature and expiry, returning the structured claims.
    /// Malformed, tampered, expired, and non-object-payload tokens all
    /// fail here; the reason is carried in the error message.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Authentication(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_ttl_days: 7,
            token_cookie: "token".to_string(),
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::from_config(&test_config()).unwrap()
    }

    #[test]
    fn issue_then_verify_round_trips() {
        let codec = codec();
        let token = codec.issue(42, Role::Admin, None).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        // Well past the default 60s validation leeway
        let token = codec
            .issue(1, Role::User, Some(Duration::hours(-2)))
            .unwrap();

        assert!(matches!(
            codec.verify(&token),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let codec = codec();
        let token = codec.issue(1, Role::User, None).unwrap();

        let mut tampered = token.into_bytes();
        let last = tampered.last_mut().unwrap();
        *last = if *last == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        assert!(matches!(
            codec.verify(&tampered),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let codec = codec();
        let other = TokenCodec::from_config(&AuthConfig {
            jwt_secret: "a-completely-different-secret-of-enough-length".to_string(),
            ..test_config()
        })
        .unwrap();

        let token = other.issue(1, Role::User, None).unwrap();
        assert!(matches!(
            codec.verify(&token),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn bare_string_payload_is_not_an_identity() {
        let codec = codec();
        let secret = test_config().jwt_secret;
        // A signed token whose payload is a JSON string, not a claim object
        let token = encode(
            &Header::default(),
            &"just-a-string",
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            codec.verify(&token),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn missing_secret_is_fatal_at_construction() {
        let config = AuthConfig {
            jwt_secret: "".to_string(),
            ..test_config()
        };

        assert!(matches!(
            TokenCodec::from_config(&config),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            codec().verify("not-a-token"),
            Err(AppError::Authentication(_))
        ));
    }
}
