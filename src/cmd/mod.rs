// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Command implementations.
//!
//! ```text
//! Cli --> load groups --> --list  : list::run_list_command
//!                         --clone
//!                         --checkout
//!                         --pull
//!                         --fetch : git::run_git_command --> DispatchReport
//!
//! exit code: 0 ok (skips included), 1 module failure or fatal error, 2 usage
//! ```

pub mod git;
pub mod list;

use tracing::debug;

use crate::cli::Cli;
use crate::config::GroupsConfig;
use crate::dispatch::DispatchReport;
use crate::error::{EnsError, Result};

/// Exit code for a run with failed modules or a fatal error.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for bad options or an unknown group.
pub const EXIT_USAGE: u8 = 2;

/// Loads the groups and runs the selected action.
///
/// Returns `None` for `--list`, the dispatch report otherwise.
///
/// # Errors
///
/// Returns an error if a groups file is malformed, the options are invalid,
/// or a group is unknown.
pub fn run(cli: &Cli) -> Result<Option<DispatchReport>> {
    let loader = GroupsConfig::loader_for(cli.url_scheme(), &cli.config_paths());
    let loaded_files = loader.format_loaded_files();
    for line in &loaded_files {
        debug!("groups file {line}");
    }
    let config = loader.build()?;

    match cli.action.selected() {
        None => {
            list::run_list_command(&config, &loaded_files);
            Ok(None)
        }
        Some(action) => git::run_git_command(action, cli, &config).map(Some),
    }
}

/// Maps the outcome of [`run`] to a process exit code.
#[must_use]
pub fn exit_code(result: &Result<Option<DispatchReport>>) -> u8 {
    match result {
        Ok(Some(report)) if report.has_failures() => EXIT_FAILURE,
        Ok(_) => 0,
        Err(e) if e.downcast_ref::<EnsError>().is_some_and(EnsError::is_usage) => EXIT_USAGE,
        Err(_) => EXIT_FAILURE,
    }
}
