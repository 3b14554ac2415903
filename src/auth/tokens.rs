/**
 * Session Tokens
 *
 * This module handles issuing and verifying the signed session tokens used
 * in place of a password after login.
 *
 * Tokens are stateless HS256 JWTs embedding the username and an absolute
 * expiry. They are verified by signature and expiry on every use; there is
 * no revocation, so a leaked token stays valid until it expires.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default token lifetime in seconds
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Token verification failure
///
/// Callers treat both variants as "not authenticated", but they stay
/// distinguishable so expiry behavior can be tested directly.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Signature was valid but the token has expired
    Expired,
    /// Malformed token or bad signature
    Invalid,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Issue a signed token for a user
///
/// The expiry is absolute: `now + ttl_seconds`. Negative ttls produce an
/// already-expired token, which the tests rely on.
pub fn issue_token(
    secret: &str,
    username: &str,
    ttl_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();
    let exp = (now as i64 + ttl_seconds).max(0) as u64;

    let claims = Claims {
        sub: username.to_string(),
        exp,
        iat: now,
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a token
///
/// Returns the claims on success. Expired tokens are reported as
/// `TokenError::Expired`; anything else (garbage, wrong signature) is
/// `TokenError::Invalid`.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let mut validation = Validation::default();
    // The default 60s leeway would keep freshly expired tokens alive
    validation.leeway = 0;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(TokenError::Expired),
            _ => Err(TokenError::Invalid),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_token() {
        let token = issue_token(SECRET, "alice", DEFAULT_TTL_SECS).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let token = issue_token(SECRET, "alice", DEFAULT_TTL_SECS).unwrap();
        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token() {
        let token = issue_token(SECRET, "alice", -10).unwrap();
        assert_eq!(verify_token(SECRET, &token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_token() {
        assert_eq!(
            verify_token(SECRET, "not.a.token"),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue_token(SECRET, "alice", DEFAULT_TTL_SECS).unwrap();
        assert_eq!(
            verify_token("other-secret", &token),
            Err(TokenError::Invalid)
        );
    }
}
