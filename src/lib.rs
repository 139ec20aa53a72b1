// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              list / git
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              | default < central < user  |
//!              '-------------+-------------'
//!                            v
//!                        dispatch
//!              Pending -> Skipped | Attempted
//!                            |
//!                            v
//!                           git
//!                  gix (read) / CLI (write)
//!
//!   +-----------------------------------------+
//!   |  foundation        error, logging       |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod git;
pub mod logging;
