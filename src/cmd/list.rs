// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! `--list` implementation.

use crate::config::GroupsConfig;

/// Prints the groups files that were read, then every group.
pub fn run_list_command(config: &GroupsConfig, loaded_files: &[String]) {
    if loaded_files.is_empty() {
        println!("No groups files loaded, using built-in groups");
    } else {
        println!("Groups files:");
        for line in loaded_files {
            println!("  {line}");
        }
    }
    println!();

    if config.is_empty() {
        println!("No groups defined");
    } else {
        print!("{}", config.format_listing());
    }
}
