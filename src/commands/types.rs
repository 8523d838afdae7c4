//! Command Types
//!
//! The command contract every variant implements, the execution context
//! threaded through the pipeline, and the dispatch-level error type.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::fs::{FsError, VirtualFileSystem};
use crate::history::History;

use super::dispatcher::Dispatcher;

/// Errors surfaced by the dispatch pipeline before a command runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Command \"{0}\" does not exist.")]
    UnknownCommand(String),

    #[error("{command}: {reason}")]
    InvalidArguments { command: String, reason: String },

    #[error("{0}")]
    InvalidRedirection(String),

    #[error(transparent)]
    Fs(#[from] FsError),
}

/// What one executed command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// Set only by `exit`; tells the front end to end the process.
    #[serde(skip)]
    pub terminate: bool,
}

impl CommandResult {
    pub fn success(stdout: String) -> Self {
        Self {
            stdout,
            stderr: String::new(),
            exit_code: 0,
            terminate: false,
        }
    }

    pub fn error(stderr: String) -> Self {
        Self {
            stdout: String::new(),
            stderr,
            exit_code: 1,
            terminate: false,
        }
    }

    pub fn empty() -> Self {
        Self::success(String::new())
    }

    pub fn exit() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
            terminate: true,
        }
    }

    pub fn with_streams(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            terminate: false,
        }
    }
}

/// Everything a command needs to validate and run.
#[derive(Clone)]
pub struct CommandContext {
    /// Argument vector, redirection clause and recursion flag removed.
    pub args: Vec<String>,
    /// Whether a leading `-R` was stripped from the arguments.
    pub recursive: bool,
    pub fs: Arc<VirtualFileSystem>,
    pub history: Arc<History>,
    /// Handle back into the pipeline for re-entrant commands (`!N`, `man`).
    pub dispatcher: Arc<Dispatcher>,
}

/// One command variant: a name, its manual text, an argument validator, and
/// an executor. Validation never mutates state; execution is consulted only
/// after validation passed.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn documentation(&self) -> &'static str;

    /// Check the argument vector. An `Err` carries the reason only; the
    /// dispatcher prefixes the command name.
    async fn validate(&self, ctx: &CommandContext) -> Result<(), String>;

    async fn execute(&self, ctx: CommandContext) -> CommandResult;
}
