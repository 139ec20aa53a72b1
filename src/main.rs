// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> cmd::run --> exit code
//! ```

use std::process::ExitCode;

use ensembl_git_tools::cli;
use ensembl_git_tools::cmd::{self, EXIT_FAILURE};
use ensembl_git_tools::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let _log_guard = match init_logging(&cli.global.to_log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let result = cmd::run(&cli);
    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
    }
    ExitCode::from(cmd::exit_code(&result))
}
