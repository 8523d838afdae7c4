//! File System Types
//!
//! Error and snapshot types for the virtual file system.

use thiserror::Error;

/// Characters that may never appear in a file name.
pub const SPECIAL_CHARS: &str = " `!#&*()-+={}[]|;:\\'\"<>,?";

/// File system errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("{0}")]
    InvalidPath(String),

    #[error("{0}")]
    InvalidFileName(String),
}

/// The kind of a tree entry, as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Directory,
    TextFile,
}

impl FileKind {
    pub fn is_directory(&self) -> bool {
        matches!(self, FileKind::Directory)
    }

    pub fn is_text_file(&self) -> bool {
        matches!(self, FileKind::TextFile)
    }
}

/// A point-in-time snapshot of one tree entry. The path is computed at
/// snapshot time; it is never stored in the tree itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: String,
    pub kind: FileKind,
}

/// Check a candidate file name: non-empty and free of special characters.
pub fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() {
        return Err(FsError::InvalidFileName(
            "File name cannot be empty.".to_string(),
        ));
    }
    if name.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(FsError::InvalidFileName(format!(
            "{}: File name cannot contain special characters: {}",
            name, SPECIAL_CHARS
        )));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_predicates() {
        assert!(FileKind::Directory.is_directory());
        assert!(!FileKind::Directory.is_text_file());
        assert!(FileKind::TextFile.is_text_file());
        assert!(!FileKind::TextFile.is_directory());
    }

    #[test]
    fn test_validate_name_accepts_plain_names() {
        assert!(validate_name("notes.txt").is_ok());
        assert!(validate_name("a").is_ok());
        assert!(validate_name("dir_2").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_validate_name_rejects_special_characters() {
        for bad in ["a b", "a*b", "semi;colon", "quo\"te", "pipe|name"] {
            assert!(validate_name(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
