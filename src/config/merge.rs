// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Group merging.
//!
//! ```text
//! defaults --> central --> user      (low → high)
//!
//! same name: higher layer replaces the whole group
//! ```
//!
//! Merging is shallow: a colliding group is never merged field by field, so
//! `modules` of a lower layer never leak into an overriding group.

use std::collections::BTreeMap;

use super::types::{ConfigSource, Group, GroupDefs};

/// Merge the three layers. Absent layers contribute nothing.
#[must_use]
pub fn merge(
    defaults: GroupDefs,
    central: Option<GroupDefs>,
    user: Option<GroupDefs>,
) -> BTreeMap<String, Group> {
    let layers = [
        Some((ConfigSource::Default, defaults)),
        central.map(|groups| (ConfigSource::Central, groups)),
        user.map(|groups| (ConfigSource::User, groups)),
    ];
    merge_layers(layers.into_iter().flatten())
}

/// Apply layers in order; later layers win on name collision.
///
/// Group names are lowercased before insertion.
pub(super) fn merge_layers(
    layers: impl IntoIterator<Item = (ConfigSource, GroupDefs)>,
) -> BTreeMap<String, Group> {
    let mut merged = BTreeMap::new();
    for (source, groups) in layers {
        for (name, def) in groups {
            merged.insert(name.to_lowercase(), Group::from_def(def, source));
        }
    }
    merged
}
