// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for git-ensembl using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! git-ensembl [global options] <action> [--branch B] [--remote R]
//!             [--dir DIR] [--https] GROUP...
//!
//! action (exactly one):
//!   --clone | --checkout | --pull | --fetch | --list
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use crate::config::paths::{CENTRAL_CONFIG_ENV, ConfigPaths, USER_CONFIG_ENV};
use crate::config::types::UrlScheme;
use crate::dispatch::{Action, ActionOptions, DEFAULT_REMOTE};
use clap::{Args, Parser};
use std::path::PathBuf;

/// Ensembl repository group tool.
///
/// Clones, checks out, pulls or fetches every repository of one or more
/// named groups.
#[derive(Debug, Parser)]
#[command(
    name = "git-ensembl",
    author,
    version,
    about = "Manage groups of Ensembl git repositories",
    long_about = "Manage groups of Ensembl git repositories.\n\n\
                  Invoking `git-ensembl --clone api` clones every repository of\n\
                  the api group into the current directory. Use --list to see\n\
                  the available groups.",
    after_help = "GROUPS FILES:\n\n\
                  Groups are built in, then read from a central file\n\
                  (<install prefix>/etc/git-ensembl.groups), then from\n\
                  ~/.git-ensembl.groups. A group defined in a later file\n\
                  replaces the whole group of the same name from earlier ones.\n\
                  Files are JSON5: { name: { desc: \"...\", modules: { repo: url } } }"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    pub action: ActionArgs,

    /// Branch to check out. Required by --checkout.
    #[arg(short = 'b', long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Remote used for tracking, pull and fetch.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_REMOTE)]
    pub remote: String,

    /// Directory holding the module checkouts (default: current directory).
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Use HTTPS instead of SSH URLs for built-in groups.
    #[arg(long)]
    pub https: bool,

    /// Central groups file.
    #[arg(long = "central-config", value_name = "FILE", env = CENTRAL_CONFIG_ENV)]
    pub central_config: Option<PathBuf>,

    /// Per-user groups file.
    #[arg(long = "user-config", value_name = "FILE", env = USER_CONFIG_ENV)]
    pub user_config: Option<PathBuf>,

    /// Groups to act on.
    #[arg(value_name = "GROUP", required_unless_present = "list", value_parser = parse_group_name)]
    pub groups: Vec<String>,
}

/// The action flags; exactly one must be given.
#[derive(Debug, Clone, Copy, Default, Args)]
#[group(required = true, multiple = false)]
pub struct ActionArgs {
    /// Clone each module that does not exist yet.
    #[arg(long)]
    pub clone: bool,

    /// Check out --branch in each existing module.
    #[arg(long, requires = "branch")]
    pub checkout: bool,

    /// Pull each existing module, after checking out --branch if given.
    #[arg(long)]
    pub pull: bool,

    /// Fetch each existing module.
    #[arg(long)]
    pub fetch: bool,

    /// List the available groups.
    #[arg(long)]
    pub list: bool,
}

impl ActionArgs {
    /// The git action selected, or `None` for `--list`.
    #[must_use]
    pub const fn selected(&self) -> Option<Action> {
        if self.clone {
            Some(Action::Clone)
        } else if self.checkout {
            Some(Action::Checkout)
        } else if self.pull {
            Some(Action::Pull)
        } else if self.fetch {
            Some(Action::Fetch)
        } else {
            None
        }
    }
}

impl Cli {
    #[must_use]
    pub const fn url_scheme(&self) -> UrlScheme {
        if self.https {
            UrlScheme::Https
        } else {
            UrlScheme::Ssh
        }
    }

    /// Groups file locations: flags and env first, then the defaults.
    #[must_use]
    pub fn config_paths(&self) -> ConfigPaths {
        ConfigPaths::resolve(self.central_config.as_deref(), self.user_config.as_deref())
    }

    #[must_use]
    pub fn action_options(&self) -> ActionOptions {
        ActionOptions::builder()
            .maybe_with_branch(self.branch.clone())
            .with_remote(self.remote.clone())
            .with_dry_run(self.global.dry)
            .build()
    }
}

/// Group names are case-insensitive; they are compared in lowercase.
fn parse_group_name(value: &str) -> Result<String, String> {
    let name = value.trim();
    if name.is_empty() {
        return Err("group name must not be empty".to_string());
    }
    Ok(name.to_lowercase())
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
