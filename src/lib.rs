//! memshell - a simulated Unix-like shell
//!
//! An in-process simulation of a shell operating on a purely in-memory
//! virtual filesystem: path resolution with a current-directory cursor,
//! file creation/move/copy/delete, and a command pipeline with validation
//! and output redirection.

pub mod commands;
pub mod fs;
pub mod history;
pub mod shell;

pub use commands::{Command, CommandContext, CommandResult, Dispatcher};
pub use fs::{DirEntry, FileKind, FsError, VirtualFileSystem};
pub use history::History;
pub use shell::Shell;
