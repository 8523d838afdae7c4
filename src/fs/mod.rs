//! Virtual File System
//!
//! In-memory tree of directories and text files, path resolution, and the
//! session's current-directory cursor.

pub mod node;
pub mod path;
pub mod types;
pub mod vfs;

pub use path::ROOT;
pub use types::{DirEntry, FileKind, FsError};
pub use vfs::VirtualFileSystem;
