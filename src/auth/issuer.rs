// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! Session token issuance and validation.
//!
//! Tokens are HS256 JWTs signed with a shared secret. There is no per-token
//! server state: a token is valid iff its signature verifies and its expiry
//! lies in the future.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{claims::Claims, AuthError};

/// Default session lifetime in days.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Mints and validates session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_days: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_days", &self.ttl_days)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create a new issuer from the shared signing secret.
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_days,
        }
    }

    /// Mint a signed token bound to a user id.
    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(self.ttl_days)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(e.to_string()))
    }

    /// Validate a token and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret-key-must-be-long-enough", DEFAULT_TOKEN_TTL_DAYS)
    }

    #[test]
    fn issue_and_validate_roundtrip() {
        let issuer = issuer();
        let token = issuer.issue("user-123").unwrap();

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn validate_rejects_garbage() {
        let issuer = issuer();
        let result = issuer.validate("not-a-token");
        assert!(matches!(result, Err(AuthError::MalformedToken)));
    }

    #[test]
    fn validate_rejects_wrong_secret() {
        let token = TokenIssuer::new("secret-one-must-be-long-enough", 30)
            .issue("user-123")
            .unwrap();

        let result = TokenIssuer::new("secret-two-must-be-long-enough", 30).validate(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn validate_rejects_expired_token() {
        // Negative ttl puts the expiry (well) in the past, beyond any leeway.
        let issuer = TokenIssuer::new("test-secret-key-must-be-long-enough", -2);
        let token = issuer.issue("user-123").unwrap();

        let result = issuer.validate(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }
}
