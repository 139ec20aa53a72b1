// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Logging for `git-ensembl`.
//!
//! ```text
//! --log-level N ------> console layer --> stderr
//!                        (targets shown from Debug up)
//! --log-file FILE
//! --file-log-level N --> file layer ----> FILE (appended, non-blocking)
//!
//! LogLevel:  0=Silent 1=Error 2=Warn 3=Info
//!            4=Debug  5=Trace 6=Dump (gix and other dependencies too)
//! ```
//!
//! Skipped modules are logged at warn, failed ones at error, and every
//! processed module at info with `group` and `module` fields.


use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::Result;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Verbosity selected with `--log-level` / `--file-log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Silent,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    /// Like `Trace`, but dependency crates are no longer capped at warn.
    Dump,
}

impl LogLevel {
    /// Level for a numeric command-line value, `None` above 6.
    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        Some(match level {
            0 => Self::Silent,
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            4 => Self::Debug,
            5 => Self::Trace,
            6 => Self::Dump,
            _ => return None,
        })
    }

    /// `EnvFilter` directives for this level.
    #[must_use]
    pub const fn directives(self) -> &'static str {
        match self {
            Self::Silent => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "warn,ensembl_git_tools=info,git_ensembl=info",
            Self::Debug => "warn,ensembl_git_tools=debug,git_ensembl=debug",
            Self::Trace => "warn,ensembl_git_tools=trace,git_ensembl=trace",
            Self::Dump => "trace",
        }
    }
}

#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::Debug)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file), into)]
    log_file: Option<PathBuf>,
    /// Prefix console lines with a timestamp.
    #[builder(setters(name = with_timestamps), default = true)]
    timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    #[must_use]
    pub const fn timestamps(&self) -> bool {
        self.timestamps
    }

    /// Console lines name their module path once debugging output is on.
    #[must_use]
    pub fn show_target(&self) -> bool {
        self.console_level >= LogLevel::Debug
    }
}

/// Keeps the file writer alive; pending lines are flushed on drop.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Hold the returned guard until the program exits.
///
/// # Errors
///
/// Returns an error if the log file or its directory cannot be created, or
/// if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let mut layers = vec![console_layer(config)];

    let file_guard = match config.log_file() {
        Some(path) => {
            let (layer, guard) = file_layer(path, config.file_level())?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("failed to install the logging subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn console_layer(config: &LogConfig) -> BoxedLayer {
    let filter = EnvFilter::new(config.console_level().directives());
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target());

    if config.timestamps() {
        layer.with_filter(filter).boxed()
    } else {
        layer.without_time().with_filter(filter).boxed()
    }
}

fn file_layer(path: &Path, level: LogLevel) -> Result<(BoxedLayer, WorkerGuard)> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(EnvFilter::new(level.directives()))
        .boxed();
    Ok((layer, guard))
}
