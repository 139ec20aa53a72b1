// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Git operations module.
//!
//! ```text
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!   (gix, read)  (CLI, write)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .branch     .clone
//!    .has_local  .checkout_tracking
//!                .pull / .fetch
//! ```
//!
//! The dispatcher is generic over both traits; callers outside it use the
//! backends directly.
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI, so SSH agents and credential helpers apply.

pub mod backend;

#[cfg(test)]
mod tests;
