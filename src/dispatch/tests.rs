// ensembl-git-tools: Ensembl repository group tooling
//
// SPDX-FileCopyrightText: 2026 ensembl-git-tools contributors
// SPDX-License-Identifier: Apache-2.0

use super::{Action, ActionOptions, Dispatcher, ModuleState, Outcome, SkipReason};
use crate::config::GroupsConfig;
use crate::config::types::{ConfigSource, Group, Modules};
use crate::error::{EnsError, EnsResult, GitError};
use crate::git::backend::{GitMutation, GitQuery};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tempfile::TempDir;

thread_local! {
    static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static FAILING: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Records calls per test thread; modules listed in `FAILING` fail.
struct MockGit;

fn module_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

fn record(op: &str, path: &Path) -> EnsResult<()> {
    let module = module_name(path);
    CALLS.with_borrow_mut(|calls| calls.push(format!("{op} {module}")));
    if FAILING.with_borrow(|failing| failing.contains(&module)) {
        return Err(GitError::CommandFailed {
            command: format!("git {op}"),
            message: "remote hung up".to_string(),
        }
        .into());
    }
    Ok(())
}

fn calls() -> Vec<String> {
    CALLS.with_borrow(Clone::clone)
}

fn fail_module(name: &str) {
    FAILING.with_borrow_mut(|failing| failing.insert(name.to_string()));
}

impl GitMutation for MockGit {
    fn clone(_url: &str, dest: &Path) -> EnsResult<()> {
        record("clone", dest)?;
        std::fs::create_dir(dest).map_err(EnsError::from)
    }

    fn checkout_tracking(repo_path: &Path, branch: &str, remote: &str) -> EnsResult<()> {
        record(&format!("checkout {remote}/{branch}"), repo_path)
    }

    fn pull(repo_path: &Path, remote: &str, branch: Option<&str>) -> EnsResult<()> {
        record(&format!("pull {remote} {}", branch.unwrap_or("-")), repo_path)
    }

    fn fetch(repo_path: &Path, remote: &str) -> EnsResult<()> {
        record(&format!("fetch {remote}"), repo_path)
    }
}

impl GitQuery for MockGit {
    fn current_branch(_path: &Path) -> EnsResult<Option<String>> {
        Ok(Some("main".to_string()))
    }

    fn has_local_branch(_path: &Path, _branch: &str) -> EnsResult<bool> {
        Ok(true)
    }
}

type MockDispatcher = Dispatcher<MockGit, MockGit>;

fn group(modules: &[&str]) -> Group {
    Group {
        description: "test".to_string(),
        modules: modules
            .iter()
            .map(|m| ((*m).to_string(), format!("file:///remotes/{m}.git")))
            .collect::<Modules>(),
        source: ConfigSource::User,
    }
}

fn config() -> GroupsConfig {
    let mut groups = BTreeMap::new();
    groups.insert("core".to_string(), group(&["gamma", "alpha", "beta"]));
    groups.insert("extra".to_string(), group(&["delta"]));
    GroupsConfig::from_groups(groups)
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn root_with(dirs: &[&str]) -> TempDir {
    let root = tempfile::tempdir().expect("failed to create temp dir");
    for dir in dirs {
        std::fs::create_dir(root.path().join(dir)).unwrap();
    }
    root
}

#[test]
fn test_checkout_without_branch_is_usage_error() {
    let root = root_with(&["alpha"]);
    let err = MockDispatcher::with_backends(root.path(), Action::Checkout, ActionOptions::default())
        .err()
        .expect("checkout without branch must fail");
    assert!(err.is_usage());
    insta::assert_snapshot!(err.to_string(), @"usage error: --checkout requires --branch");

    let empty = ActionOptions::builder().with_branch("").build();
    assert!(MockDispatcher::with_backends(root.path(), Action::Checkout, empty).is_err());
    assert!(calls().is_empty());
}

#[test]
fn test_option_like_branch_or_remote_is_usage_error() {
    let root = root_with(&["alpha"]);

    let options = ActionOptions::builder().with_branch("--orphan").build();
    let err = MockDispatcher::with_backends(root.path(), Action::Checkout, options)
        .err()
        .unwrap();
    assert!(err.is_usage());
    insta::assert_snapshot!(
        err.to_string(),
        @"usage error: --branch value '--orphan' must not start with '-'"
    );

    let options = ActionOptions::builder().with_remote("--upload-pack=x").build();
    let err = MockDispatcher::with_backends(root.path(), Action::Fetch, options)
        .err()
        .unwrap();
    assert!(err.is_usage());
    assert!(calls().is_empty());
}

#[test]
fn test_missing_root_is_usage_error() {
    let root = root_with(&[]);
    let missing = root.path().join("nowhere");
    let err = MockDispatcher::with_backends(&missing, Action::Fetch, ActionOptions::default())
        .err()
        .unwrap();
    assert!(err.is_usage());
}

#[test]
fn test_skip_does_not_abort() {
    let root = root_with(&["alpha", "gamma"]);
    let dispatcher =
        MockDispatcher::with_backends(root.path(), Action::Pull, ActionOptions::default()).unwrap();

    let report = dispatcher.run(&config(), &names(&["core"])).unwrap();

    assert_eq!(report.attempted(), 2);
    assert_eq!(report.skipped(), 1);
    assert!(!report.has_failures());
    assert_eq!(calls(), vec!["pull origin - alpha", "pull origin - gamma"]);

    let beta = &report.modules()[1];
    assert_eq!(beta.module, "beta");
    assert_eq!(
        beta.state,
        ModuleState::Skipped(SkipReason::TargetMissing(root.path().join("beta")))
    );
}

#[test]
fn test_modules_processed_in_sorted_order() {
    let root = root_with(&["alpha", "beta", "gamma", "delta"]);
    let dispatcher =
        MockDispatcher::with_backends(root.path(), Action::Fetch, ActionOptions::default()).unwrap();

    let report = dispatcher.run(&config(), &names(&["extra", "core"])).unwrap();

    let order: Vec<_> = report
        .modules()
        .iter()
        .map(|m| format!("{}/{}", m.group, m.module))
        .collect();
    assert_eq!(order, vec!["extra/delta", "core/alpha", "core/beta", "core/gamma"]);
    insta::assert_snapshot!(report.summary(), @"4 attempted, 0 skipped, 0 failed");
}

#[test]
fn test_failure_is_recorded_and_loop_continues() {
    let root = root_with(&["alpha", "beta", "gamma"]);
    fail_module("beta");
    let dispatcher =
        MockDispatcher::with_backends(root.path(), Action::Fetch, ActionOptions::default()).unwrap();

    let report = dispatcher.run(&config(), &names(&["core"])).unwrap();

    assert!(report.has_failures());
    assert_eq!(report.failed(), 1);
    assert_eq!(report.attempted(), 3);
    assert_eq!(calls().len(), 3);
    assert!(matches!(
        &report.modules()[1].state,
        ModuleState::Attempted(Outcome::Failed(message)) if message.contains("remote hung up")
    ));
    assert_eq!(report.modules()[1].branch, None);
    assert_eq!(report.modules()[2].branch.as_deref(), Some("main"));
}

#[test]
fn test_unknown_group_aborts_before_any_module() {
    let root = root_with(&["alpha", "beta", "gamma"]);
    let dispatcher =
        MockDispatcher::with_backends(root.path(), Action::Fetch, ActionOptions::default()).unwrap();

    let err = dispatcher
        .run(&config(), &names(&["core", "nosuch"]))
        .unwrap_err();

    assert!(err.is_usage());
    assert!(calls().is_empty());
}

#[test]
fn test_clone_skips_existing_and_checks_out_branch() {
    let root = root_with(&["beta"]);
    let options = ActionOptions::builder()
        .with_branch("release/110")
        .with_remote("upstream")
        .build();
    let dispatcher = MockDispatcher::with_backends(root.path(), Action::Clone, options).unwrap();

    let report = dispatcher.run(&config(), &names(&["core"])).unwrap();

    assert_eq!(
        calls(),
        vec![
            "clone alpha",
            "checkout upstream/release/110 alpha",
            "clone gamma",
            "checkout upstream/release/110 gamma",
        ]
    );
    assert_eq!(
        report.modules()[1].state,
        ModuleState::Skipped(SkipReason::TargetExists(root.path().join("beta")))
    );
    assert!(root.path().join("alpha").is_dir());
}

#[test]
fn test_pull_with_branch_checks_out_first() {
    let root = root_with(&["delta"]);
    let options = ActionOptions::builder().with_branch("main").build();
    let dispatcher = MockDispatcher::with_backends(root.path(), Action::Pull, options).unwrap();

    dispatcher.run(&config(), &names(&["extra"])).unwrap();

    assert_eq!(
        calls(),
        vec!["checkout origin/main delta", "pull origin main delta"]
    );
}

#[test]
fn test_dry_run_touches_nothing() {
    let root = root_with(&["alpha"]);
    let options = ActionOptions::builder().with_dry_run(true).build();
    let dispatcher = MockDispatcher::with_backends(root.path(), Action::Clone, options).unwrap();

    let report = dispatcher.run(&config(), &names(&["core"])).unwrap();

    assert!(calls().is_empty());
    assert_eq!(report.attempted(), 2);
    assert_eq!(report.skipped(), 1);
    assert!(!root.path().join("beta").exists());
}

#[test]
fn test_working_directory_unchanged() {
    let before = std::env::current_dir().unwrap();
    let root = root_with(&["alpha", "beta"]);
    fail_module("alpha");
    let dispatcher =
        MockDispatcher::with_backends(root.path(), Action::Fetch, ActionOptions::default()).unwrap();

    dispatcher.run(&config(), &names(&["core"])).unwrap();

    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
fn test_options_defaults() {
    let options = ActionOptions::default();
    assert_eq!(options.remote(), "origin");
    assert_eq!(options.branch(), None);
    assert!(!options.dry_run());
    assert!(Action::Pull.needs_existing_dir());
    assert!(!Action::Clone.needs_existing_dir());
    assert_eq!(Action::Checkout.to_string(), "checkout");
}
