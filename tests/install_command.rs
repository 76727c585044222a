#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the `install` command.
//!
//! These tests exercise the full task list produced by [`all_install_tasks`],
//! the task-name-based filtering applied by the `--skip` and `--only` CLI
//! flags, and the end-to-end batch-install behavior over scripted executors.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use fedsetup_cli::logging::TaskStatus;
use fedsetup_cli::tasks::{self, Task};

use common::{CapturingLog, ScriptedExecutor, TestRootBuilder, make_context};

// ---------------------------------------------------------------------------
// Snapshot: full install task list
// ---------------------------------------------------------------------------

/// Snapshot of all install task names in their declared order.
///
/// This test serves as a regression guard: any addition, removal, or rename
/// of an install task will cause it to fail, prompting a deliberate snapshot
/// update.
#[test]
fn install_task_names() {
    let all_tasks = tasks::all_install_tasks();
    let task_names: Vec<&str> = all_tasks.iter().map(|t| t.name()).collect();
    insta::assert_snapshot!("install_task_names", task_names.join("\n"));
}

// ---------------------------------------------------------------------------
// Structural invariants
// ---------------------------------------------------------------------------

/// The install task list must contain exactly the expected number of tasks.
#[test]
fn install_task_count() {
    assert_eq!(tasks::all_install_tasks().len(), 12);
}

/// Every task name must be non-empty.
#[test]
fn install_task_names_are_non_empty() {
    for task in tasks::all_install_tasks() {
        assert!(!task.name().is_empty(), "install task has an empty name");
    }
}

/// No two install tasks may share the same name.
#[test]
fn install_task_names_are_unique() {
    let tasks = tasks::all_install_tasks();
    let mut seen: HashSet<&str> = HashSet::new();
    for task in &tasks {
        assert!(
            seen.insert(task.name()),
            "duplicate install task name: '{}'",
            task.name()
        );
    }
}

/// The six package batches are fail-soft; the six structural steps fail fast.
#[test]
fn failure_policy_split_is_six_and_six() {
    let tasks = tasks::all_install_tasks();
    let fail_fast = tasks.iter().filter(|t| t.fail_fast()).count();
    let fail_soft = tasks.len() - fail_fast;
    assert_eq!(fail_fast, 6, "structural steps");
    assert_eq!(fail_soft, 6, "batch-install steps");
}

/// Repositories must be enabled before any package batch runs.
#[test]
fn repositories_precede_package_batches() {
    let tasks = tasks::all_install_tasks();
    let names: Vec<&str> = tasks.iter().map(|t| t.name()).collect();
    let repos = names
        .iter()
        .position(|n| *n == "Enable repositories")
        .expect("repos task present");
    let first_batch = names
        .iter()
        .position(|n| n.starts_with("Install"))
        .expect("at least one batch");
    assert!(repos < first_batch);
}

// ---------------------------------------------------------------------------
// --skip / --only filters (same substring matching the command applies)
// ---------------------------------------------------------------------------

/// Tasks whose names contain the skip keyword (case-insensitive) must be
/// excluded from the filtered list, matching the behavior of `--skip packages`.
#[test]
fn skip_filter_excludes_matching_tasks() {
    let all_tasks = tasks::all_install_tasks();
    let skip_keyword = "packages";

    let filtered: Vec<&str> = all_tasks
        .iter()
        .filter(|t| !t.name().to_lowercase().contains(skip_keyword))
        .map(|t| t.name())
        .collect();

    for name in &filtered {
        assert!(
            !name.to_lowercase().contains(skip_keyword),
            "task '{name}' should have been excluded by --skip {skip_keyword}",
        );
    }
    assert!(
        filtered.len() < all_tasks.len(),
        "--skip packages should remove at least one task"
    );
}

/// Only tasks whose names contain the `--only` keyword should remain.
#[test]
fn only_filter_includes_only_matching_tasks() {
    let all_tasks = tasks::all_install_tasks();
    let only_keyword = "fonts";

    let filtered: Vec<&str> = all_tasks
        .iter()
        .filter(|t| t.name().to_lowercase().contains(only_keyword))
        .map(|t| t.name())
        .collect();

    assert_eq!(
        filtered,
        vec!["Install fonts"],
        "--only fonts should return exactly one task"
    );
}

/// When the keyword matches nothing the `--only` result is empty.
#[test]
fn only_filter_with_no_match_returns_empty() {
    let all_tasks = tasks::all_install_tasks();
    let any_match = all_tasks
        .iter()
        .any(|t| t.name().to_lowercase().contains("zzznomatch"));
    assert!(!any_match);
}

// ---------------------------------------------------------------------------
// End-to-end: manifest batch over a scripted executor
// ---------------------------------------------------------------------------

/// The documented end-to-end scenario: `pkg.txt` containing
/// `git\n# comment\n\nvim\n` yields exactly two install attempts, in file
/// order; a failing `vim` is reported and skipped, the batch completes, and
/// the task does not count as failed.
#[test]
fn manifest_batch_isolates_failure_and_preserves_order() {
    let root = TestRootBuilder::new()
        .with_pkg_manifest("git\n# comment\n\nvim\n")
        .build();

    // rpm -qa (nothing installed), install git ok, install vim fails.
    let executor = Arc::new(ScriptedExecutor::with_responses(vec![
        (true, String::new()),
        (true, String::new()),
        (false, String::new()),
    ]));
    let log = Arc::new(CapturingLog::default());
    let dyn_executor: Arc<dyn fedsetup_cli::exec::Executor> = executor.clone();
    let ctx = make_context(&root, dyn_executor, Arc::clone(&log), false);

    let task = fedsetup_cli::tasks::packages::InstallManifestPackages;
    tasks::execute(&task, &ctx).expect("batch task never aborts the run");

    let calls = executor.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].starts_with("rpm -qa"));
    assert_eq!(calls[1], "sudo dnf install -y git");
    assert_eq!(calls[2], "sudo dnf install -y vim");

    assert_eq!(log.messages_of("success"), vec!["Installed git"]);
    assert_eq!(
        log.messages_of("warn"),
        vec!["Failed to install vim, skipping..."]
    );
    assert!(
        log.failed_tasks().is_empty(),
        "per-item failure must not fail the task"
    );
}

/// A missing manifest skips the batch with a warning and the run proceeds.
#[test]
fn missing_manifest_skips_batch() {
    let root = TestRootBuilder::new().build();
    let executor = Arc::new(ScriptedExecutor::new());
    let log = Arc::new(CapturingLog::default());
    let dyn_executor: Arc<dyn fedsetup_cli::exec::Executor> = executor.clone();
    let ctx = make_context(&root, dyn_executor, Arc::clone(&log), false);

    let task = fedsetup_cli::tasks::packages::InstallManifestPackages;
    tasks::execute(&task, &ctx).expect("missing manifest is not an error");

    assert!(executor.calls().is_empty(), "no commands for a skipped batch");
    let statuses = log.task_statuses();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].1, TaskStatus::Skipped);
    assert_eq!(log.messages_of("warn").len(), 1);
}

// ---------------------------------------------------------------------------
// End-to-end: full dry-run over a scripted executor
// ---------------------------------------------------------------------------

/// A dry run across the complete task list must not issue a single mutating
/// command: only read-only state queries are allowed.
#[test]
fn full_dry_run_issues_only_read_only_commands() {
    let root = TestRootBuilder::new()
        .with_settings(
            r#"
            [[fonts]]
            name = "JetBrainsMono Nerd Font"
            url = "https://example.com/JetBrainsMono.tar.xz"

            [dns]
            servers = ["1.1.1.1"]

            [[desktop]]
            schema = "org.gnome.desktop.interface"
            key = "monospace-font-name"
            value = "'JetBrainsMono Nerd Font 11'"

            [services]
            enable = ["fstrim.timer"]
            "#,
        )
        .with_pkg_manifest("tmux\n")
        .with_fpk_manifest("org.gnome.Boxes\n")
        .build();

    let executor = Arc::new(ScriptedExecutor::new());
    let log = Arc::new(CapturingLog::default());
    let dyn_executor: Arc<dyn fedsetup_cli::exec::Executor> = executor.clone();
    let ctx = make_context(&root, dyn_executor, Arc::clone(&log), true);

    for task in tasks::all_install_tasks() {
        tasks::execute(task.as_ref(), &ctx).expect("dry-run task must not abort");
    }

    assert!(log.failed_tasks().is_empty(), "no task may fail in dry-run");

    let read_only_prefixes = [
        "rpm -qa",
        "rpm -E",
        "dnf repolist",
        "flatpak list",
        "flatpak remotes",
        "fc-list",
        "systemctl is-enabled",
        "gsettings get",
    ];
    for call in executor.calls() {
        assert!(
            read_only_prefixes.iter().any(|p| call.starts_with(p)),
            "dry-run issued a non-read-only command: {call}"
        );
    }

    // Every applicable task either previewed work or found nothing to do.
    assert!(
        !log.messages_of("dry_run").is_empty(),
        "dry-run should preview pending changes"
    );
}
