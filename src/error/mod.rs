// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Error handling module.
//!
//! ```text
//!          EnsError (~24 bytes)
//!                 |
//!   +------+------+------+------+
//!   |      |      |      |      |
//!   v      v      v      v      v
//! Usage   Git   Config Process Io
//! Box<str> Box   Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git     CommandFailed, Gix, CloneFailed, CheckoutFailed
//!   Config  ReadError, ParseError, UnknownGroup
//!   Process ExecutableNotFound, SpawnFailed
//!
//! Fatal:     Usage, Config::UnknownGroup, Config::ParseError
//! Per-module: Git, Process (reported, loop continues)
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnsError`].
pub type EnsResult<T> = std::result::Result<T, EnsError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnsError {
    /// Bad or missing command-line options.
    #[error("usage error: {0}")]
    Usage(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl EnsError {
    /// Whether this error belongs on the usage-error path (exit code 2).
    #[must_use]
    pub fn is_usage(&self) -> bool {
        match self {
            Self::Usage(_) => true,
            Self::Config(e) => matches!(**e, ConfigError::UnknownGroup { .. }),
            _ => false,
        }
    }
}

/// Create a [`EnsError::Usage`] for a bad or missing option.
pub fn usage_error(message: impl Into<String>) -> EnsError {
    EnsError::Usage(message.into().into_boxed_str())
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnsError {
                fn from(err: $error) -> Self {
                    EnsError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from the gix library while querying a repository.
    #[error("gix error: {0}")]
    Gix(String),

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },

    /// A remote or branch name that git would parse as an option.
    #[error("refusing {what} '{value}': names must not start with '-'")]
    OptionLikeName { what: &'static str, value: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a groups file.
    #[error("failed to read config file '{}': {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A groups file is present but malformed.
    #[error("failed to parse config file '{}': {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    /// Requested group is not defined by any source.
    #[error("unknown group '{name}'")]
    UnknownGroup { name: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
