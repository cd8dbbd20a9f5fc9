use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use bookworm_common::error::ValidationError;
use thiserror::Error;

use crate::command::Lifecycle;

pub type CommandResult<T> = Result<T, CommandError>;

/// Where in a command's life a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Argument processing, before any command object exists.
    Arguments,
    Setup,
    Run,
    Commit,
    /// A lifecycle operation was called out of order.
    Lifecycle,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = match self {
            Phase::Arguments => "arguments",
            Phase::Setup => "setup",
            Phase::Run => "run",
            Phase::Commit => "commit",
            Phase::Lifecycle => "lifecycle",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An input, or the parent of an output directory, does not exist.
    #[error("file or directory does not exist: {}", path.display())]
    NotFound { phase: Phase, path: PathBuf },

    #[error("failed to list directory {}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("failed to create directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to spawn '{program}'")]
    Spawn { program: String, source: io::Error },

    #[error("'{program}' failed with {status}")]
    NonZeroExit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("commit failed for {}: {reason}", path.display())]
    CommitFailed { path: PathBuf, reason: &'static str },

    #[error("cannot {action} a command that is {state}")]
    InvalidTransition {
        action: &'static str,
        state: Lifecycle,
    },
}

impl CommandError {
    pub fn phase(&self) -> Phase {
        match self {
            CommandError::Validation(_) | CommandError::ReadDir { .. } => Phase::Arguments,
            CommandError::NotFound { phase, .. } => *phase,
            CommandError::CreateDir { .. } => Phase::Setup,
            CommandError::Spawn { .. } | CommandError::NonZeroExit { .. } => Phase::Run,
            CommandError::CommitFailed { .. } => Phase::Commit,
            CommandError::InvalidTransition { .. } => Phase::Lifecycle,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::NotFound { .. })
    }
}
