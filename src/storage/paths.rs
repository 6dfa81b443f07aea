// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! Path constants and utilities for the storage layout.

use std::path::{Path, PathBuf};

/// Base directory for all persistent storage.
pub const DATA_ROOT: &str = "/data";

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user records.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user record file.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Note Paths ==========

    /// Directory containing all notes.
    pub fn notes_dir(&self) -> PathBuf {
        self.root.join("notes")
    }

    /// Path to a specific note file.
    pub fn note(&self, note_id: &str) -> PathBuf {
        self.notes_dir().join(format!("{note_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("/data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.user("user-123"),
            PathBuf::from("/tmp/test-data/users/user-123.json")
        );
    }

    #[test]
    fn user_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(paths.users_dir(), PathBuf::from("/data/users"));
        assert_eq!(paths.user("u1"), PathBuf::from("/data/users/u1.json"));
    }

    #[test]
    fn note_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(paths.notes_dir(), PathBuf::from("/data/notes"));
        assert_eq!(paths.note("n-456"), PathBuf::from("/data/notes/n-456.json"));
    }
}
