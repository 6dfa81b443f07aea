// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! Repository layer providing typed access to storage.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using the FileStorage for all file operations.

pub mod notes;
pub mod users;

pub use notes::{NoteRepository, StoredNote};
pub use users::{OtpChallenge, StoredUser, UserRepository};
