// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! `--clone` / `--checkout` / `--pull` / `--fetch` implementation.

use anyhow::Context;

use crate::cli::Cli;
use crate::config::GroupsConfig;
use crate::dispatch::{Action, DispatchReport, Dispatcher, ModuleState, Outcome};
use crate::error::Result;

/// Runs `action` over the groups named on the command line and prints a
/// summary.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined, the
/// options are invalid, or a group is unknown. Module failures are in the
/// returned report instead.
pub fn run_git_command(action: Action, cli: &Cli, config: &GroupsConfig) -> Result<DispatchReport> {
    let root = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };

    let dispatcher = Dispatcher::new(root, action, cli.action_options())?;
    let report = dispatcher.run(config, &cli.groups)?;

    print_report(action, &report);
    Ok(report)
}

fn print_report(action: Action, report: &DispatchReport) {
    for module in report.modules() {
        match &module.state {
            ModuleState::Attempted(Outcome::Failed(message)) => {
                println!("{:30} FAILED  {message}", module.module);
            }
            ModuleState::Skipped(reason) => println!("{:30} skipped ({reason})", module.module),
            ModuleState::Attempted(Outcome::Succeeded) => match &module.branch {
                Some(branch) => println!("{:30} ok      [{branch}]", module.module),
                None => println!("{:30} ok", module.module),
            },
            ModuleState::Pending => {}
        }
    }
    println!("{action}: {}", report.summary());
}
