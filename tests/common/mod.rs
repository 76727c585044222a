//! Shared helpers for integration tests: a temp configuration root builder
//! and a scripted executor that never touches the real system.
#![allow(dead_code)] // Not every test binary uses every helper.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fedsetup_cli::config::Config;
use fedsetup_cli::exec::{ExecResult, Executor};
use fedsetup_cli::logging::{Log, TaskStatus};
use fedsetup_cli::platform::Platform;
use fedsetup_cli::tasks::Context;

/// Builds a temporary configuration root with optional `setup.toml` and
/// manifest files.
pub struct TestRootBuilder {
    settings: Option<String>,
    pkg_manifest: Option<String>,
    fpk_manifest: Option<String>,
}

impl TestRootBuilder {
    pub fn new() -> Self {
        Self {
            settings: None,
            pkg_manifest: None,
            fpk_manifest: None,
        }
    }

    pub fn with_settings(mut self, contents: &str) -> Self {
        self.settings = Some(contents.to_string());
        self
    }

    pub fn with_pkg_manifest(mut self, contents: &str) -> Self {
        self.pkg_manifest = Some(contents.to_string());
        self
    }

    pub fn with_fpk_manifest(mut self, contents: &str) -> Self {
        self.fpk_manifest = Some(contents.to_string());
        self
    }

    pub fn build(self) -> TestRoot {
        let dir = tempfile::tempdir().expect("create temp config root");
        if let Some(contents) = &self.settings {
            std::fs::write(dir.path().join("setup.toml"), contents).expect("write setup.toml");
        }
        if let Some(contents) = &self.pkg_manifest {
            std::fs::write(dir.path().join("pkg.txt"), contents).expect("write pkg.txt");
        }
        if let Some(contents) = &self.fpk_manifest {
            std::fs::write(dir.path().join("fpk.txt"), contents).expect("write fpk.txt");
        }
        TestRoot { dir }
    }
}

/// A temporary configuration root on disk.
pub struct TestRoot {
    dir: tempfile::TempDir,
}

impl TestRoot {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn load_config(&self) -> Config {
        Config::load(self.path()).expect("load config from test root")
    }
}

/// An executor that replays scripted responses and records every call.
///
/// Responses are consumed in FIFO order; once the queue is empty every call
/// succeeds with empty output. `which()` always resolves.
#[derive(Debug)]
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<(bool, String)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::with_responses(vec![])
    }

    pub fn with_responses(responses: Vec<(bool, String)>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every executed command line, in order, as `program arg1 arg2 ...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex").clone()
    }

    fn next(&self, program: &str, args: &[&str]) -> (bool, String) {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().expect("calls mutex").push(line);
        self.responses
            .lock()
            .expect("responses mutex")
            .pop_front()
            .unwrap_or((true, String::new()))
    }
}

impl Executor for ScriptedExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let (success, stdout) = self.next(program, args);
        if success {
            Ok(ExecResult {
                stdout,
                stderr: String::new(),
                success: true,
                code: Some(0),
            })
        } else {
            anyhow::bail!("scripted failure for {program}")
        }
    }

    fn run_in(&self, _: &Path, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.run(program, args)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let (success, stdout) = self.next(program, args);
        Ok(ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(i32::from(!success)),
        })
    }

    fn which(&self, _: &str) -> bool {
        true
    }
}

/// A [`Log`] capturing messages and task entries for assertions.
#[derive(Default)]
pub struct CapturingLog {
    messages: Mutex<Vec<(&'static str, String)>>,
    tasks: Mutex<Vec<(String, TaskStatus)>>,
}

impl CapturingLog {
    fn push(&self, class: &'static str, msg: &str) {
        self.messages
            .lock()
            .expect("messages mutex")
            .push((class, msg.to_string()));
    }

    pub fn messages_of(&self, class: &str) -> Vec<String> {
        self.messages
            .lock()
            .expect("messages mutex")
            .iter()
            .filter(|(c, _)| *c == class)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn task_statuses(&self) -> Vec<(String, TaskStatus)> {
        self.tasks.lock().expect("tasks mutex").clone()
    }

    pub fn failed_tasks(&self) -> Vec<String> {
        self.task_statuses()
            .into_iter()
            .filter(|(_, status)| *status == TaskStatus::Failed)
            .map(|(name, _)| name)
            .collect()
    }
}

impl Log for CapturingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn success(&self, msg: &str) {
        self.push("success", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_task(&self, name: &str, status: TaskStatus, _message: Option<&str>) {
        self.tasks
            .lock()
            .expect("tasks mutex")
            .push((name.to_string(), status));
    }
}

/// Build a task [`Context`] over the given root, executor, and log, with a
/// Fedora 42 platform and a temp home directory.
pub fn make_context(
    root: &TestRoot,
    executor: Arc<dyn Executor>,
    log: Arc<CapturingLog>,
    dry_run: bool,
) -> Context {
    let dyn_log: Arc<dyn Log> = log;
    Context {
        config: Arc::new(root.load_config()),
        platform: Arc::new(Platform {
            is_linux: true,
            is_fedora: true,
            release: Some(42),
        }),
        log: dyn_log,
        dry_run,
        home: PathBuf::from("/home/test"),
        executor,
    }
}
