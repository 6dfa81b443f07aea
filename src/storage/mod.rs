// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! # Storage Module
//!
//! Persistent storage for user and note records as JSON files on disk.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   users/
//!     {user_id}.json    # Identity record (profile, verification, OTP state)
//!   notes/
//!     {note_id}.json    # Note record (owner, content)
//! ```

pub mod files;
pub mod paths;
pub mod repository;

pub use files::{FileStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{NoteRepository, OtpChallenge, StoredNote, StoredUser, UserRepository};
