// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Group configuration for git-ensembl.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. built-in defaults       (--https selects URL scheme)
//! 2. central groups file     (<prefix>/etc/git-ensembl.groups)
//! 3. user groups file        (~/.git-ensembl.groups)
//! ```
//!
//! Absent files contribute nothing. A present but malformed file is fatal.
//!
//! # Groups File Format (JSON5)
//!
//! ```text
//! {
//!   // comments and trailing commas are fine
//!   mygroup: {
//!     desc: "My modules",
//!     modules: { "my-repo": "git@github.com:me/my-repo.git", },
//!   },
//! }
//! ```

pub mod defaults;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod types;


use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ConfigError, EnsResult};

use loader::GroupsLoader;
use paths::ConfigPaths;
use types::{ConfigSource, Group, Modules, UrlScheme};

/// Merged mapping of group name → group for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupsConfig {
    groups: BTreeMap<String, Group>,
}

impl GroupsConfig {
    /// Create a new groups loader.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ensembl_git_tools::config::GroupsConfig;
    /// use ensembl_git_tools::config::types::{ConfigSource, UrlScheme};
    ///
    /// let config = GroupsConfig::builder()
    ///     .with_url_scheme(UrlScheme::Https)
    ///     .add_groups_file_optional(ConfigSource::User, "/home/me/.git-ensembl.groups")
    ///     .build()?;
    /// # Ok::<(), ensembl_git_tools::error::EnsError>(())
    /// ```
    #[must_use]
    pub fn builder() -> GroupsLoader {
        GroupsLoader::new()
    }

    /// Load defaults plus the central and user files, if present.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ParseError` if either file exists but is
    /// malformed.
    pub fn resolve(scheme: UrlScheme, paths: &ConfigPaths) -> EnsResult<Self> {
        Self::loader_for(scheme, paths).build()
    }

    /// The loader `resolve` uses, exposed so callers can report its files.
    #[must_use]
    pub fn loader_for(scheme: UrlScheme, paths: &ConfigPaths) -> GroupsLoader {
        let mut loader = Self::builder().with_url_scheme(scheme);
        if let Some(central) = &paths.central {
            loader = loader.add_groups_file_optional(ConfigSource::Central, central);
        }
        if let Some(user) = &paths.user {
            loader = loader.add_groups_file_optional(ConfigSource::User, user);
        }
        loader
    }

    pub(crate) const fn from_groups(groups: BTreeMap<String, Group>) -> Self {
        Self { groups }
    }

    #[must_use]
    pub const fn groups(&self) -> &BTreeMap<String, Group> {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups in name order, each with sorted module names.
    #[must_use]
    pub fn list_groups(&self) -> Vec<GroupListing<'_>> {
        self.groups
            .iter()
            .map(|(name, group)| GroupListing {
                name,
                description: &group.description,
                modules: group.modules.keys().map(String::as_str).collect(),
                source: group.source,
            })
            .collect()
    }

    /// Module name → remote URL for `name`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::UnknownGroup` if no source defines `name`.
    pub fn modules_for(&self, name: &str) -> EnsResult<&Modules> {
        self.groups
            .get(name)
            .map(|group| &group.modules)
            .ok_or_else(|| {
                ConfigError::UnknownGroup {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Render `list_groups` for display, one block per group.
    #[must_use]
    pub fn format_listing(&self) -> String {
        self.list_groups()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Display view of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupListing<'a> {
    pub name: &'a str,
    pub description: &'a str,
    /// Sorted module names.
    pub modules: Vec<&'a str>,
    pub source: ConfigSource,
}

impl fmt::Display for GroupListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {} ({})", self.name, self.description, self.source)?;
        writeln!(f, "    {}", self.modules.join(", "))
    }
}
