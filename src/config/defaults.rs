// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Built-in groups.
//!
//! Module lists are plain repository names; URLs are derived from the
//! requested [`UrlScheme`] under the `Ensembl` GitHub organisation.

use super::types::{GITHUB_ORG, GroupDef, GroupDefs, UrlScheme};

const API_MODULES: &[&str] = &[
    "ensembl",
    "ensembl-compara",
    "ensembl-variation",
    "ensembl-funcgen",
];

/// (name, description, modules)
const BUILTIN_GROUPS: &[(&str, &str, &[&str])] = &[
    (
        "api",
        "API module set used for querying and processing Ensembl data",
        API_MODULES,
    ),
    (
        "tools",
        "Libraries required to run Ensembl tools such as the VEP",
        &[
            "ensembl",
            "ensembl-compara",
            "ensembl-variation",
            "ensembl-funcgen",
            "ensembl-io",
            "ensembl-tools",
        ],
    ),
    (
        "rest",
        "Modules required to run the Ensembl REST server",
        &[
            "ensembl",
            "ensembl-compara",
            "ensembl-variation",
            "ensembl-funcgen",
            "ensembl-io",
            "ensembl-rest",
        ],
    ),
    (
        "production",
        "Modules used by the Ensembl production pipelines",
        &[
            "ensembl",
            "ensembl-analysis",
            "ensembl-hive",
            "ensembl-production",
            "ensembl-taxonomy",
        ],
    ),
    (
        "hive",
        "The eHive workflow manager",
        &["ensembl-hive"],
    ),
];

/// Built-in groups with URLs in the given scheme.
#[must_use]
pub fn default_groups(scheme: UrlScheme) -> GroupDefs {
    BUILTIN_GROUPS
        .iter()
        .map(|(name, description, modules)| {
            let modules = modules
                .iter()
                .map(|m| ((*m).to_string(), scheme.remote_url(GITHUB_ORG, m)))
                .collect();
            (
                (*name).to_string(),
                GroupDef {
                    description: (*description).to_string(),
                    modules,
                },
            )
        })
        .collect()
}
