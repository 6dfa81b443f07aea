// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! Note repository.
//!
//! Each note is stored as a separate JSON file under `/data/notes/`.
//! Ownership is fixed at creation and checked by the API layer before any
//! mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::super::{FileStorage, StorageError, StorageResult};

/// Note stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredNote {
    /// Unique note identifier (UUID)
    pub id: String,
    /// Owner user ID; never reassigned
    pub owner_id: String,
    /// Note text, exactly as submitted
    pub content: String,
    /// When the note was created
    pub created_at: DateTime<Utc>,
}

impl StoredNote {
    /// Create a new note owned by `owner_id`.
    pub fn new(owner_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Repository for note operations.
pub struct NoteRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> NoteRepository<'a> {
    /// Create a new NoteRepository.
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Get a note by ID.
    pub fn get(&self, note_id: &str) -> StorageResult<StoredNote> {
        let path = self.storage.paths().note(note_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Note {note_id}")));
        }
        self.storage.read_json(path)
    }

    /// Persist a new note.
    pub fn create(&self, note: &StoredNote) -> StorageResult<()> {
        let note_id = &note.id;

        if self.storage.exists(self.storage.paths().note(note_id)) {
            return Err(StorageError::AlreadyExists(format!("Note {note_id}")));
        }

        self.storage
            .write_json(self.storage.paths().note(note_id), note)
    }

    /// Delete a note permanently.
    pub fn delete(&self, note_id: &str) -> StorageResult<()> {
        if !self.storage.exists(self.storage.paths().note(note_id)) {
            return Err(StorageError::NotFound(format!("Note {note_id}")));
        }

        self.storage.delete(self.storage.paths().note(note_id))
    }

    /// List all notes owned by a user. No ordering guarantee.
    pub fn list_by_owner(&self, owner_id: &str) -> StorageResult<Vec<StoredNote>> {
        let note_ids = self
            .storage
            .list_files(self.storage.paths().notes_dir(), "json")?;

        let mut notes = Vec::new();
        for id in note_ids {
            if let Ok(note) = self.get(&id) {
                if note.owner_id == owner_id {
                    notes.push(note);
                }
            }
        }

        Ok(notes)
    }
}
