// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Groups loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! GroupsLoader::new()
//!   .with_url_scheme()            built-in defaults
//!   .add_groups_file_optional()   central
//!   .add_groups_file_optional()   user
//!   .add_groups_str()
//!        |
//!        v  each layer parsed alone (JSON5)
//!    build() --> merge_layers --> GroupsConfig
//! ```
//!
//! Layers are parsed one at a time so that a parse error names the file it
//! came from. Parsing is strict: values must be strings, keys are literal.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::GroupsConfig;
use super::defaults::default_groups;
use super::merge::merge_layers;
use super::types::{ConfigSource, GroupDefs, UrlScheme};
use crate::error::{ConfigError, EnsError, EnsResult};

enum LayerInput {
    File { path: PathBuf, required: bool },
    Str(String),
}

/// Builder for loading groups from the built-in defaults and groups files.
pub struct GroupsLoader {
    url_scheme: UrlScheme,
    with_defaults: bool,
    layers: Vec<(ConfigSource, LayerInput)>,
    files: Vec<(ConfigSource, PathBuf)>,
}

impl GroupsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            url_scheme: UrlScheme::default(),
            with_defaults: true,
            layers: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Selects the URL flavour of the built-in groups.
    #[must_use]
    pub const fn with_url_scheme(mut self, scheme: UrlScheme) -> Self {
        self.url_scheme = scheme;
        self
    }

    /// Skips the built-in groups entirely.
    #[must_use]
    pub const fn without_defaults(mut self) -> Self {
        self.with_defaults = false;
        self
    }

    /// Adds a groups file that must exist.
    ///
    /// The file is read when `build()` is called.
    #[must_use]
    pub fn add_groups_file<P: AsRef<Path>>(mut self, source: ConfigSource, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        self.files.push((source, path.clone()));
        self.layers.push((
            source,
            LayerInput::File {
                path,
                required: true,
            },
        ));
        self
    }

    /// Adds a groups file that is silently skipped when absent.
    #[must_use]
    pub fn add_groups_file_optional<P: AsRef<Path>>(
        mut self,
        source: ConfigSource,
        path: P,
    ) -> Self {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            self.files.push((source, path.clone()));
        }
        self.layers.push((
            source,
            LayerInput::File {
                path,
                required: false,
            },
        ));
        self
    }

    #[must_use]
    pub fn add_groups_str(mut self, source: ConfigSource, content: &str) -> Self {
        self.layers
            .push((source, LayerInput::Str(content.to_string())));
        self.files.push((source, PathBuf::from("<string>")));
        self
    }

    /// Parses every layer and merges them, lowest priority first.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ReadError` if a required file is missing, or a
    /// `ConfigError::ParseError` naming the file if any present layer is not
    /// valid JSON5 or does not have the `{ desc, modules }` group shape.
    pub fn build(self) -> EnsResult<GroupsConfig> {
        let mut parsed = Vec::with_capacity(self.layers.len() + 1);
        if self.with_defaults {
            parsed.push((ConfigSource::Default, default_groups(self.url_scheme)));
        }

        for (source, input) in self.layers {
            if let Some(groups) = parse_layer(source, input)? {
                parsed.push((source, groups));
            }
        }

        Ok(GroupsConfig::from_groups(merge_layers(parsed)))
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(ConfigSource, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for GroupsLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_layer(source: ConfigSource, input: LayerInput) -> EnsResult<Option<GroupDefs>> {
    match input {
        LayerInput::File { path, required } => {
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                    debug!(%source, path = %path.display(), "groups file not found, skipping");
                    return Ok(None);
                }
                Err(source) => return Err(ConfigError::ReadError { path, source }.into()),
            };
            debug!(%source, path = %path.display(), "loading groups file");
            parse_groups(&content, &path).map(Some)
        }
        LayerInput::Str(content) => parse_groups(&content, Path::new("<string>")).map(Some),
    }
}

/// Strict JSON5 parse of one layer.
///
/// Group names are taken literally (no path syntax) and lowercased; two
/// names that differ only in case are rejected.
fn parse_groups(content: &str, origin: &Path) -> EnsResult<GroupDefs> {
    let parse_error = |message: String| -> EnsError {
        ConfigError::ParseError {
            path: origin.to_path_buf(),
            message,
        }
        .into()
    };

    let raw: GroupDefs = json5::from_str(content).map_err(|e| parse_error(e.to_string()))?;

    let mut spelled: BTreeMap<String, String> = BTreeMap::new();
    let mut groups = GroupDefs::new();
    for (name, def) in raw {
        let key = name.to_lowercase();
        if let Some(previous) = spelled.insert(key.clone(), name.clone()) {
            return Err(parse_error(format!(
                "group '{name}' clashes with '{previous}' (group names are case-insensitive)"
            )));
        }
        groups.insert(key, def);
    }
    Ok(groups)
}
