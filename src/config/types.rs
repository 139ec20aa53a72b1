// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration types.
//!
//! # Group Structure
//!
//! ```text
//! GroupDefs: group name → GroupDef { desc, modules }   (on disk)
//! Group:     GroupDef + ConfigSource                   (merged)
//! modules:   module name → remote URL (BTreeMap, sorted)
//! ```
//!
//! # Remote URLs
//!
//! ```text
//! UrlScheme::Ssh   git@github.com:Ensembl/<name>.git   (default)
//! UrlScheme::Https https://github.com/Ensembl/<name>.git
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


/// GitHub organisation hosting the built-in modules.
pub const GITHUB_ORG: &str = "Ensembl";

/// Module name → remote repository location.
pub type Modules = BTreeMap<String, String>;

/// Group name → group definition, as read from one source.
pub type GroupDefs = BTreeMap<String, GroupDef>;

/// Configuration layer a group came from, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Built into the binary.
    Default,
    /// Shared file for every user of an installation.
    Central,
    /// Per-user file in the home directory.
    User,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Central => write!(f, "central"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Remote URL flavour for built-in groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlScheme {
    /// SSH write URLs.
    #[default]
    Ssh,
    /// Anonymous HTTPS URLs.
    Https,
}

impl UrlScheme {
    /// Remote URL of repository `name` under the GitHub organisation `org`.
    #[must_use]
    pub fn remote_url(self, org: &str, name: &str) -> String {
        match self {
            Self::Ssh => format!("git@github.com:{org}/{name}.git"),
            Self::Https => format!("https://github.com/{org}/{name}.git"),
        }
    }
}

/// One group as written in a groups file.
///
/// Both fields are required; anything else is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDef {
    /// Free-text description.
    #[serde(rename = "desc")]
    pub description: String,
    /// Module name → remote URL.
    pub modules: Modules,
}

/// A group after merging, tagged with the source that defined it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub description: String,
    pub modules: Modules,
    pub source: ConfigSource,
}

impl Group {
    #[must_use]
    pub fn from_def(def: GroupDef, source: ConfigSource) -> Self {
        Self {
            description: def.description,
            modules: def.modules,
            source,
        }
    }
}
