//! Credential extraction from inbound requests

use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::cookie::CookieJar;

use super::token::{Claims, TokenCodec};

/// Pull the raw credential out of a request: the session cookie first,
/// then the `Authorization: Bearer <token>` header.
pub fn credential(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    bearer(headers)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

/// Resolve the request identity. Any failure (no credential, bad
/// signature, expired, malformed payload) is "no identity", never an
/// error.
pub fn identity(headers: &HeaderMap, codec: &TokenCodec, cookie_name: &str) -> Option<Claims> {
    let token = credential(headers, cookie_name)?;
    codec.verify(&token).ok()
}
