// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Well-known groups file locations.
//!
//! ```text
//! <prefix>/
//!   bin/git-ensembl
//!   etc/git-ensembl.groups   (central)
//! ~/.git-ensembl.groups      (user)
//! ```
//!
//! Either location can be replaced on the command line or through
//! `GIT_ENSEMBL_CENTRAL_CONFIG` / `GIT_ENSEMBL_USER_CONFIG`.

use std::path::{Path, PathBuf};

/// Environment variable overriding the central groups file.
pub const CENTRAL_CONFIG_ENV: &str = "GIT_ENSEMBL_CENTRAL_CONFIG";

/// Environment variable overriding the user groups file.
pub const USER_CONFIG_ENV: &str = "GIT_ENSEMBL_USER_CONFIG";

/// File name of the central groups file under `<prefix>/etc`.
pub const CENTRAL_FILE_NAME: &str = "git-ensembl.groups";

/// File name of the user groups file in the home directory.
pub const USER_FILE_NAME: &str = ".git-ensembl.groups";

/// Resolved locations of the optional groups files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Central file, `None` if no location could be determined.
    pub central: Option<PathBuf>,
    /// User file, `None` if the home directory is unknown.
    pub user: Option<PathBuf>,
}

impl ConfigPaths {
    /// Use explicit paths where given, well-known locations otherwise.
    #[must_use]
    pub fn resolve(central: Option<&Path>, user: Option<&Path>) -> Self {
        Self {
            central: central.map(Path::to_path_buf).or_else(default_central_path),
            user: user.map(Path::to_path_buf).or_else(default_user_path),
        }
    }
}

/// `<exe dir>/../etc/git-ensembl.groups`.
#[must_use]
pub fn default_central_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    central_path_for_exe(&exe)
}

pub(super) fn central_path_for_exe(exe: &Path) -> Option<PathBuf> {
    let prefix = exe.parent()?.parent()?;
    Some(prefix.join("etc").join(CENTRAL_FILE_NAME))
}

/// `~/.git-ensembl.groups`.
#[must_use]
pub fn default_user_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(USER_FILE_NAME))
}
