// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
///
/// The token is self-contained: identity, issue instant, and expiry. There
/// is no server-side session store; validity is computed from these fields
/// and the signature alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the canonical user identifier
    pub sub: String,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

/// Authenticated user information extracted from a validated token.
///
/// This is the type handlers receive for the caller making a request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Canonical user ID (the token's `sub` claim)
    pub user_id: String,

    /// Token expiration (Unix timestamp)
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Create from validated claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            expires_at: claims.exp,
        }
    }
}
