// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

use crate::git::backend::{GitMutation, GitQuery, GixBackend, ShellBackend};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a bare repository with one commit on `main` and a `feature` branch.
/// Returns the path of the bare repository.
fn init_remote(root: &Path) -> PathBuf {
    let seed = root.join("seed");
    std::fs::create_dir(&seed).expect("failed to create seed dir");
    git(&["init", "--quiet", "--initial-branch=main"], &seed);
    git(&["commit", "--allow-empty", "--quiet", "-m", "Initial commit"], &seed);
    git(&["branch", "feature"], &seed);

    let bare = root.join("remote.git");
    git(
        &["clone", "--bare", "--quiet", seed.to_str().unwrap(), bare.to_str().unwrap()],
        root,
    );
    bare
}

#[test]
fn test_clone_and_current_branch() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let dest = temp.path().join("ensembl");

    ShellBackend::clone(remote.to_str().unwrap(), &dest).expect("clone failed");

    assert!(dest.join(".git").is_dir());
    assert_eq!(GixBackend::current_branch(&dest).unwrap().as_deref(), Some("main"));
    assert!(GixBackend::has_local_branch(&dest, "main").unwrap());
    assert!(!GixBackend::has_local_branch(&dest, "feature").unwrap());
}

#[test]
fn test_clone_bad_url_fails() {
    let temp = temp_dir();
    let missing = temp.path().join("does-not-exist.git");
    let dest = temp.path().join("target");

    let err = ShellBackend::clone(missing.to_str().unwrap(), &dest).unwrap_err();
    assert!(err.to_string().contains("failed to clone"), "{err}");
    assert!(!dest.exists());
}

#[test]
fn test_checkout_tracking_creates_branch() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let dest = temp.path().join("ensembl");
    ShellBackend::clone(remote.to_str().unwrap(), &dest).unwrap();

    ShellBackend::checkout_tracking(&dest, "feature", "origin").expect("checkout failed");
    assert_eq!(GixBackend::current_branch(&dest).unwrap().as_deref(), Some("feature"));
    assert!(GixBackend::has_local_branch(&dest, "feature").unwrap());

    // Existing local branch is switched to, not recreated
    ShellBackend::checkout_tracking(&dest, "main", "origin").expect("checkout failed");
    assert_eq!(GixBackend::current_branch(&dest).unwrap().as_deref(), Some("main"));
}

#[test]
fn test_checkout_unknown_branch_fails() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let dest = temp.path().join("ensembl");
    ShellBackend::clone(remote.to_str().unwrap(), &dest).unwrap();

    let err = ShellBackend::checkout_tracking(&dest, "release/999", "origin").unwrap_err();
    assert!(err.to_string().contains("release/999"), "{err}");
    assert_eq!(GixBackend::current_branch(&dest).unwrap().as_deref(), Some("main"));
}

#[test]
fn test_fetch_and_pull() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let dest = temp.path().join("ensembl");
    ShellBackend::clone(remote.to_str().unwrap(), &dest).unwrap();

    ShellBackend::fetch(&dest, "origin").expect("fetch failed");
    ShellBackend::pull(&dest, "origin", None).expect("pull failed");
    ShellBackend::pull(&dest, "origin", Some("main")).expect("pull with branch failed");
}

#[test]
fn test_fetch_unknown_remote_fails() {
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let dest = temp.path().join("ensembl");
    ShellBackend::clone(remote.to_str().unwrap(), &dest).unwrap();

    assert!(ShellBackend::fetch(&dest, "upstream").is_err());
}

#[test]
fn test_operations_keep_working_directory() {
    let before = std::env::current_dir().unwrap();
    let temp = temp_dir();
    let remote = init_remote(temp.path());
    let dest = temp.path().join("ensembl");

    ShellBackend::clone(remote.to_str().unwrap(), &dest).unwrap();
    ShellBackend::fetch(&dest, "origin").unwrap();
    let _ = ShellBackend::checkout_tracking(&dest, "nope", "origin");
    let _ = ShellBackend::pull(&dest, "--all", None);

    assert_eq!(std::env::current_dir().unwrap(), before);
}
