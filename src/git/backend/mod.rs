// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//!                          local-branch lookups go through GixBackend
//! ```
//!
//! Every operation takes the repository path explicitly; the process working
//! directory is never changed. Remote and branch names starting with `-` are
//! refused before git sees them, and clone URLs follow `--`.

use crate::error::{GitError, EnsResult, ProcessError};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> EnsResult<Option<String>>;

    /// Check whether `refs/heads/<branch>` exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or reference lookup fails.
    fn has_local_branch(path: &Path, branch: &str) -> EnsResult<bool>;
}

// --- Mutation Trait (Write operations) ---

/// Git operations that modify repository state.
///
/// Each call blocks until git exits. Failures carry git's stderr.
pub trait GitMutation {
    /// Clone `url` into `dest`. The parent of `dest` must exist.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone operation fails or the destination path is invalid.
    fn clone(url: &str, dest: &Path) -> EnsResult<()>;

    /// Switch to `branch`, creating it to track `<remote>/<branch>` if there
    /// is no local branch of that name yet.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout_tracking(repo_path: &Path, branch: &str, remote: &str) -> EnsResult<()>;

    /// Pull from `remote`, optionally a specific branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the pull operation fails.
    fn pull(repo_path: &Path, remote: &str, branch: Option<&str>) -> EnsResult<()>;

    /// Fetch from remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the fetch operation fails.
    fn fetch(repo_path: &Path, remote: &str) -> EnsResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Read-only; no subprocess is spawned.
pub struct GixBackend;

fn gix_error(e: impl std::fmt::Display) -> GitError {
    GitError::Gix(e.to_string())
}

impl GitQuery for GixBackend {
    fn current_branch(path: &Path) -> EnsResult<Option<String>> {
        let repo = gix::discover(path).map_err(gix_error)?;
        let head = repo.head_name().map_err(gix_error)?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_local_branch(path: &Path, branch: &str) -> EnsResult<bool> {
        let repo = gix::discover(path).map_err(gix_error)?;
        let reference = format!("refs/heads/{branch}");
        Ok(repo.try_find_reference(reference.as_str()).map_err(gix_error)?.is_some())
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
///
/// Used for all writes so that the user's SSH agent, credential helpers and
/// git configuration apply unchanged.
pub struct ShellBackend;

static GIT_EXECUTABLE: OnceLock<Option<PathBuf>> = OnceLock::new();

impl ShellBackend {
    /// Locate `git` in PATH once per process.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError::ExecutableNotFound` if git is not in PATH.
    pub fn git_executable() -> EnsResult<&'static Path> {
        GIT_EXECUTABLE
            .get_or_init(|| which::which("git").ok())
            .as_deref()
            .ok_or_else(|| {
                ProcessError::ExecutableNotFound {
                    name: "git".to_string(),
                }
                .into()
            })
    }

    /// Execute a git command in `cwd`. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> EnsResult<String> {
        use std::process::Command;

        let git = Self::git_executable()?;
        let command = format!("git {}", args.join(" "));
        debug!(cwd = %cwd.display(), %command, "running");

        let output = Command::new(git)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn plain_name(what: &'static str, value: &str) -> EnsResult<()> {
    if value.starts_with('-') {
        return Err(GitError::OptionLikeName {
            what,
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

impl GitMutation for ShellBackend {
    fn clone(url: &str, dest: &Path) -> EnsResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: url.to_string(),
            message: "invalid destination path".to_string(),
        })?;
        let parent = dest.parent().unwrap_or_else(|| Path::new("."));

        Self::git_command(&["clone", "--quiet", "--", url, dest_str], parent)
            .map(|_| ())
            .map_err(|e| {
                GitError::CloneFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                }
                .into()
            })
    }

    fn checkout_tracking(repo_path: &Path, branch: &str, remote: &str) -> EnsResult<()> {
        plain_name("branch", branch)?;
        plain_name("remote", remote)?;

        let result = if GixBackend::has_local_branch(repo_path, branch)? {
            Self::git_command(&["checkout", "-q", branch], repo_path)
        } else {
            let upstream = format!("{remote}/{branch}");
            Self::git_command(
                &["checkout", "-q", "--track", "-b", branch, &upstream],
                repo_path,
            )
        };

        result.map(|_| ()).map_err(|e| {
            GitError::CheckoutFailed {
                what: branch.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn pull(repo_path: &Path, remote: &str, branch: Option<&str>) -> EnsResult<()> {
        plain_name("remote", remote)?;
        let mut args = vec!["pull", "--quiet", remote];
        if let Some(b) = branch {
            plain_name("branch", b)?;
            args.push(b);
        }
        Self::git_command(&args, repo_path)?;
        Ok(())
    }

    fn fetch(repo_path: &Path, remote: &str) -> EnsResult<()> {
        plain_name("remote", remote)?;
        Self::git_command(&["fetch", "--quiet", remote], repo_path)?;
        Ok(())
    }
}
