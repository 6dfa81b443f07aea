// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`/`Deserialize` and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation. Field names are
//! camelCase on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::StoredUser;

// =============================================================================
// Auth Models
// =============================================================================

/// Request to start a signup: profile details, OTP goes to the email.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Email address; receives the code and becomes the login key.
    pub email: String,
    /// Date of birth (YYYY-MM-DD), informational only.
    pub date_of_birth: NaiveDate,
}

/// Request to start a login for an existing, verified account.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address of the account.
    pub email: String,
}

/// Request to redeem an OTP code (signup or login verification).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    /// Email address the code was sent to.
    pub email: String,
    /// The 6-digit code from the mail.
    pub code: String,
}

/// Public identity profile returned alongside a fresh token.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<StoredUser> for UserProfile {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Successful verification response: session token plus profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Signed bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user's public profile.
    pub user: UserProfile,
}

/// Response for GET /auth/me. Never includes OTP state.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// Unique user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Whether the account has completed signup verification.
    pub verified: bool,
    /// When the account record was created.
    pub created_at: DateTime<Utc>,
}

impl From<StoredUser> for MeResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            date_of_birth: user.date_of_birth,
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}

// =============================================================================
// Note Models
// =============================================================================

/// Request to create a new note.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note text; must be non-empty after trimming.
    pub content: String,
}

// =============================================================================
// Acknowledgement
// =============================================================================

/// Plain acknowledgement body for operations with no payload to return.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Ack {
    /// Human-readable confirmation.
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> StoredUser {
        StoredUser::new(
            "Alice",
            "alice@example.com",
            NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
        )
    }

    #[test]
    fn signup_request_accepts_camel_case_date() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"name":"Alice","email":"alice@example.com","dateOfBirth":"1990-04-12"}"#,
        )
        .unwrap();

        assert_eq!(req.name, "Alice");
        assert_eq!(
            req.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()
        );
    }

    #[test]
    fn user_profile_from_stored_user() {
        let user = sample_user();
        let id = user.id.clone();

        let profile: UserProfile = user.into();
        assert_eq!(profile.id, id);
        assert_eq!(profile.name, "Alice");
        assert_eq!(profile.email, "alice@example.com");
    }

    #[test]
    fn me_response_uses_camel_case_and_omits_otp_state() {
        let response: MeResponse = sample_user().into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["dateOfBirth"], "1990-04-12");
        assert_eq!(json["verified"], false);
        assert!(json.get("challenge").is_none());
        assert!(json.get("otp").is_none());
    }
}
