// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! # Authentication Module
//!
//! Passwordless authentication for the HD Notes API.
//!
//! ## Auth Flow
//!
//! 1. Client requests a signup or login OTP; the server mails a 6-digit code
//! 2. Client echoes the code back; the server verifies it and mints a token
//! 3. Client sends `Authorization: Bearer <token>` on every protected call
//! 4. The `Auth` extractor validates signature and expiry and resolves the
//!    user id for handlers
//!
//! ## Security
//!
//! - Tokens are HS256-signed with a shared secret; nothing is stored per
//!   session
//! - OTP verification never reveals whether the email, the code, or the
//!   expiry was at fault
//! - Codes are single-use and expire after ten minutes

pub mod claims;
pub mod error;
pub mod extractor;
pub mod issuer;
pub mod otp;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::Auth;
pub use issuer::{TokenIssuer, DEFAULT_TOKEN_TTL_DAYS};
