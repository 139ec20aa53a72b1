// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Action dispatcher: applies one git action to every module of the
//! requested groups.
//!
//! ```text
//! Dispatcher::new(root, action, options)   checkout needs --branch
//!   .run(config, groups)
//!       resolve every group first           unknown group aborts
//!       per group (CLI order), per module (sorted):
//!
//!           Pending --precondition fails--> Skipped(reason)    warn!
//!              |
//!              +--------git step----------> Attempted(outcome) error! on failure
//! ```
//!
//! | Action   | Precondition             | Effect                                  |
//! |----------|--------------------------|-----------------------------------------|
//! | clone    | `<root>/<module>` absent | clone, then checkout if a branch given  |
//! | checkout | `<root>/<module>` exists | checkout tracking `<remote>/<branch>`   |
//! | pull     | `<root>/<module>` exists | optional checkout, then pull            |
//! | fetch    | `<root>/<module>` exists | fetch `<remote>`                        |
//!
//! Module paths are always passed to git explicitly; the process working
//! directory is never changed.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use bon::Builder;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::GroupsConfig;
use crate::error::{EnsResult, usage_error};
use crate::git::backend::{GitMutation, GitQuery, GixBackend, ShellBackend};

/// Remote used when none is given.
pub const DEFAULT_REMOTE: &str = "origin";

/// Git action applied to every selected module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Clone,
    Checkout,
    Pull,
    Fetch,
}

impl Action {
    /// Whether the module directory must already exist.
    #[must_use]
    pub const fn needs_existing_dir(self) -> bool {
        !matches!(self, Self::Clone)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clone => write!(f, "clone"),
            Self::Checkout => write!(f, "checkout"),
            Self::Pull => write!(f, "pull"),
            Self::Fetch => write!(f, "fetch"),
        }
    }
}

/// Options shared by every module of one run.
#[derive(Debug, Clone, Builder)]
pub struct ActionOptions {
    /// Branch to check out (required for checkout, optional for clone/pull).
    #[builder(setters(name = with_branch), into)]
    branch: Option<String>,

    #[builder(setters(name = with_remote), into, default = DEFAULT_REMOTE.to_string())]
    remote: String,

    /// Log the git commands instead of running them.
    #[builder(setters(name = with_dry_run), default = false)]
    dry_run: bool,
}

impl Default for ActionOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ActionOptions {
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref().filter(|b| !b.is_empty())
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Why a module was not touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("{} already exists", .0.display())]
    TargetExists(PathBuf),

    #[error("{} does not exist", .0.display())]
    TargetMissing(PathBuf),
}

/// Result of running the git step for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(String),
}

/// Per-module lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleState {
    Pending,
    Skipped(SkipReason),
    Attempted(Outcome),
}

impl ModuleState {
    #[must_use]
    pub const fn is_attempted(&self) -> bool {
        matches!(self, Self::Attempted(_))
    }

    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Attempted(Outcome::Failed(_)))
    }
}

/// What happened to one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReport {
    pub group: String,
    pub module: String,
    pub path: PathBuf,
    pub state: ModuleState,
    /// Checked-out branch after a successful action, when known.
    pub branch: Option<String>,
}

impl ModuleReport {
    fn pending(group: &str, module: &str, path: PathBuf) -> Self {
        Self {
            group: group.to_string(),
            module: module.to_string(),
            path,
            state: ModuleState::Pending,
            branch: None,
        }
    }

    fn skip(&mut self, reason: SkipReason) {
        debug_assert_eq!(self.state, ModuleState::Pending);
        self.state = ModuleState::Skipped(reason);
    }

    fn attempt(&mut self, outcome: Outcome) {
        debug_assert_eq!(self.state, ModuleState::Pending);
        self.state = ModuleState::Attempted(outcome);
    }
}

/// Reports for every processed module, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    modules: Vec<ModuleReport>,
}

impl DispatchReport {
    #[must_use]
    pub fn modules(&self) -> &[ModuleReport] {
        &self.modules
    }

    #[must_use]
    pub fn attempted(&self) -> usize {
        self.modules.iter().filter(|m| m.state.is_attempted()).count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.modules.iter().filter(|m| m.state.is_skipped()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.modules.iter().filter(|m| m.state.is_failed()).count()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.modules.iter().any(|m| m.state.is_failed())
    }

    /// One-line summary, e.g. `3 attempted, 1 skipped, 0 failed`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} attempted, {} skipped, {} failed",
            self.attempted(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Applies one action across groups of modules.
///
/// `M` performs the git writes, `Q` answers the branch query recorded in
/// each report.
pub struct Dispatcher<M = ShellBackend, Q = GixBackend> {
    root: PathBuf,
    action: Action,
    options: ActionOptions,
    _backend: PhantomData<fn() -> (M, Q)>,
}

impl Dispatcher {
    /// Dispatcher using the git CLI for writes and gix for queries.
    ///
    /// # Errors
    ///
    /// Returns an `EnsError::Usage` for a checkout without a branch, for a
    /// remote or branch name starting with `-`, and when `root` is not a
    /// directory.
    pub fn new(root: impl Into<PathBuf>, action: Action, options: ActionOptions) -> EnsResult<Self> {
        Self::with_backends(root, action, options)
    }
}

impl<M: GitMutation, Q: GitQuery> Dispatcher<M, Q> {
    /// Dispatcher over explicit backends.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::new`].
    pub fn with_backends(
        root: impl Into<PathBuf>,
        action: Action,
        options: ActionOptions,
    ) -> EnsResult<Self> {
        if action == Action::Checkout && options.branch().is_none() {
            return Err(usage_error("--checkout requires --branch"));
        }
        let names = [("--remote", Some(options.remote())), ("--branch", options.branch())];
        for (flag, value) in names {
            if let Some(value) = value
                && value.starts_with('-')
            {
                return Err(usage_error(format!(
                    "{flag} value '{value}' must not start with '-'"
                )));
            }
        }

        let root = root.into();
        if !root.is_dir() {
            return Err(usage_error(format!(
                "working directory {} does not exist",
                root.display()
            )));
        }

        Ok(Self {
            root,
            action,
            options,
            _backend: PhantomData,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Apply the action to every module of `groups`.
    ///
    /// All names are resolved before any module is touched. Module failures
    /// are recorded in the report and do not stop the run.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::UnknownGroup` if any name is not configured.
    pub fn run(&self, config: &GroupsConfig, groups: &[String]) -> EnsResult<DispatchReport> {
        let resolved = groups
            .iter()
            .map(|name| config.modules_for(name).map(|modules| (name.as_str(), modules)))
            .collect::<EnsResult<Vec<_>>>()?;

        let mut report = DispatchReport::default();
        for (group, modules) in resolved {
            info!(group, action = %self.action, count = modules.len(), "processing group");
            for (module, url) in modules {
                report.modules.push(self.process(group, module, url));
            }
        }
        Ok(report)
    }

    fn process(&self, group: &str, module: &str, url: &str) -> ModuleReport {
        let path = self.root.join(module);
        let mut report = ModuleReport::pending(group, module, path);

        if let Some(reason) = self.precondition(&report.path) {
            warn!(group, module, "skipping {}: {reason}", self.action);
            report.skip(reason);
            return report;
        }

        if self.options.dry_run() {
            for command in self.planned_commands(url, &report.path) {
                info!(group, module, "[dry-run] would run {command}");
            }
            report.attempt(Outcome::Succeeded);
            return report;
        }

        info!(group, module, path = %report.path.display(), "{}", self.action);
        match self.apply(url, &report.path) {
            Ok(()) => {
                report.branch = Q::current_branch(&report.path).ok().flatten();
                report.attempt(Outcome::Succeeded);
            }
            Err(e) => {
                error!(group, module, "{} failed: {e}", self.action);
                report.attempt(Outcome::Failed(e.to_string()));
            }
        }
        report
    }

    fn precondition(&self, path: &Path) -> Option<SkipReason> {
        if self.action.needs_existing_dir() {
            (!path.is_dir()).then(|| SkipReason::TargetMissing(path.to_path_buf()))
        } else {
            path.exists()
                .then(|| SkipReason::TargetExists(path.to_path_buf()))
        }
    }

    fn apply(&self, url: &str, path: &Path) -> EnsResult<()> {
        let remote = self.options.remote();
        let branch = self.options.branch();

        match self.action {
            Action::Clone => {
                M::clone(url, path)?;
                if let Some(branch) = branch {
                    M::checkout_tracking(path, branch, remote)?;
                }
                Ok(())
            }
            Action::Checkout => {
                let Some(branch) = branch else {
                    return Err(usage_error("--checkout requires --branch"));
                };
                M::checkout_tracking(path, branch, remote)
            }
            Action::Pull => {
                if let Some(branch) = branch {
                    M::checkout_tracking(path, branch, remote)?;
                }
                M::pull(path, remote, branch)
            }
            Action::Fetch => M::fetch(path, remote),
        }
    }

    /// Git commands `apply` would run, for dry-run output.
    fn planned_commands(&self, url: &str, path: &Path) -> Vec<String> {
        let remote = self.options.remote();
        let branch = self.options.branch();
        let checkout = branch.map(|b| format!("git checkout {b} (tracking {remote}/{b})"));

        let mut commands = Vec::new();
        match self.action {
            Action::Clone => {
                commands.push(format!("git clone {url} {}", path.display()));
                commands.extend(checkout);
            }
            Action::Checkout => commands.extend(checkout),
            Action::Pull => {
                commands.extend(checkout);
                let target = branch.map_or_else(String::new, |b| format!(" {b}"));
                commands.push(format!("git pull {remote}{target}"));
            }
            Action::Fetch => commands.push(format!("git fetch {remote}")),
        }
        debug!(count = commands.len(), "planned commands");
        commands
    }
}

#[cfg(test)]
mod tests;
