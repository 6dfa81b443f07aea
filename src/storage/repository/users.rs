// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! User repository: identity records and their OTP verification state.
//!
//! Each user is stored as a separate JSON file under `/data/users/`. The
//! email address is the natural lookup key; the file name is the opaque id.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::super::{FileStorage, StorageError, StorageResult};

/// An outstanding OTP challenge.
///
/// Code and expiry always travel together; a user either has a full pending
/// challenge or none at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtpChallenge {
    /// The 6-digit code the user must echo back.
    pub code: String,
    /// The code is invalid at or after this instant.
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// True once the expiry instant has been reached.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Identity record stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID), assigned at creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address; unique among verified users.
    pub email: String,
    /// Date of birth, informational only.
    pub date_of_birth: NaiveDate,
    /// Outstanding OTP challenge, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<OtpChallenge>,
    /// False until the first successful signup confirmation.
    pub verified: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Create a fresh, unverified identity record.
    pub fn new(name: impl Into<String>, email: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            date_of_birth,
            challenge: None,
            verified: false,
            created_at: Utc::now(),
        }
    }
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Persist a user record (create or overwrite).
    pub fn save(&self, user: &StoredUser) -> StorageResult<()> {
        self.storage
            .write_json(self.storage.paths().user(&user.id), user)
    }

    /// Find a user by email address (exact match).
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        let user_ids = self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?;

        for id in user_ids {
            if let Ok(user) = self.get(&id) {
                if user.email == email {
                    return Ok(Some(user));
                }
            }
        }

        Ok(None)
    }

    /// Attach a fresh OTP challenge to a user and persist.
    ///
    /// Any previous pending challenge is superseded: the old code stops
    /// validating the moment this write lands.
    pub fn issue_challenge(
        &self,
        user: &mut StoredUser,
        challenge: OtpChallenge,
    ) -> StorageResult<()> {
        user.challenge = Some(challenge);
        self.save(user)
    }

    /// Attempt to redeem an OTP challenge for the given email.
    ///
    /// Registration and login verification share this path; login additionally
    /// requires the user to already be verified. Returns the updated user on
    /// success, or `None` for every non-match (unknown email, wrong code,
    /// expired code, unverified login) so callers cannot tell them apart.
    ///
    /// Clearing the challenge is the commit point: a matching code is removed
    /// from the record whether it was redeemed or found expired, so a code
    /// never validates twice. A successful redemption also marks the user
    /// verified (a no-op for login, the activation step for signup).
    pub fn consume_challenge(
        &self,
        email: &str,
        code: &str,
        require_verified: bool,
    ) -> StorageResult<Option<StoredUser>> {
        let Some(mut user) = self.find_by_email(email)? else {
            return Ok(None);
        };

        if require_verified && !user.verified {
            return Ok(None);
        }

        let Some(challenge) = user.challenge.as_ref() else {
            return Ok(None);
        };

        if challenge.code != code {
            return Ok(None);
        }

        if challenge.is_expired(Utc::now()) {
            // The code matched but arrived too late; spend it anyway.
            user.challenge = None;
            self.save(&user)?;
            return Ok(None);
        }

        user.challenge = None;
        user.verified = true;
        self.save(&user)?;
        Ok(Some(user))
    }
}
