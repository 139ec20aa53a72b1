// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Global CLI options.
//!
//! ```text
//! --dry             ← Log git commands instead of running them
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --log-file FILE   ← Also log to FILE
//! --no-timestamps   ← Plain console lines
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::logging::{LogConfig, LogLevel};

/// Options that are independent of the selected action.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Logs the git commands that would run without running them.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file. Appended to if it exists.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Omits timestamps from console log lines.
    #[arg(long = "no-timestamps")]
    pub no_timestamps: bool,
}

impl GlobalOptions {
    /// Logging setup for these options. The file level falls back to the
    /// console level.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let console_level = self
            .log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or_default();

        let file_level = self
            .file_log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(console_level);

        LogConfig::builder()
            .with_console_level(console_level)
            .with_file_level(file_level)
            .maybe_with_log_file(self.log_file.clone())
            .with_timestamps(!self.no_timestamps)
            .build()
    }
}
