use crate::error::{ReleaseError, Result};
use crate::git::{GitOutput, GitRunner};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Mock runner for testing without spawning git
///
/// Every invocation is recorded. Invocations whose arguments start with a
/// scripted prefix fail with the scripted reason; everything else succeeds
/// with empty output.
pub struct MockGit {
    calls: Mutex<Vec<Vec<String>>>,
    failures: Vec<(Vec<String>, String)>,
}

impl MockGit {
    /// Create a mock where every command succeeds
    pub fn new() -> Self {
        MockGit {
            calls: Mutex::new(Vec::new()),
            failures: Vec::new(),
        }
    }

    /// Fail any invocation whose arguments start with `prefix`
    pub fn fail_on(mut self, prefix: &[&str], reason: impl Into<String>) -> Self {
        self.failures.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            reason.into(),
        ));
        self
    }

    /// Recorded invocations, oldest first
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Recorded invocations joined with spaces, for compact assertions
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.join(" ")).collect()
    }
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for MockGit {
    fn run(&self, _working_dir: &Path, args: &[&str], _timeout: Duration) -> Result<GitOutput> {
        let call: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.clone());
        }

        let failure = self
            .failures
            .iter()
            .find(|(prefix, _)| call.starts_with(prefix));

        match failure {
            Some((_, reason)) => Err(ReleaseError::GitCommand {
                command: format!("git {}", args.first().copied().unwrap_or_default()),
                reason: reason.clone(),
            }),
            None => Ok(GitOutput::default()),
        }
    }
}
