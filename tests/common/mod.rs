// Helpers for building throwaway repositories with the system git binary
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

pub const ORIGINAL_ORIGIN: &str = "https://github.com/foo/bar.git";

/// Run git in `dir` and return trimmed stdout, panicking on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=Fixture", "-c", "user.email=fixture@example.com"])
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A source repository with a single commit on `initial-branch`
pub fn source_repository() -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "--quiet"]);
    git(dir.path(), &["checkout", "--quiet", "-b", "initial-branch"]);
    git(dir.path(), &["commit", "--quiet", "--allow-empty", "-m", "initial"]);
    dir
}

/// Clone `source` and point the clone's origin somewhere else, the way a CI
/// checkout looks before the authenticated fetch
pub fn destination_clone(source: &Path) -> TempDir {
    let dir = TempDir::new().unwrap();
    let source = source.to_str().unwrap();
    let target = dir.path().to_str().unwrap();
    git(dir.path(), &["clone", "--quiet", source, target]);
    git(dir.path(), &["remote", "set-url", "origin", ORIGINAL_ORIGIN]);
    dir
}

/// Add a branch with one commit on top of the current HEAD, then go back
pub fn add_branch(repo: &Path, name: &str) {
    let current = git(repo, &["rev-parse", "--abbrev-ref", "HEAD"]);
    git(repo, &["checkout", "--quiet", "-b", name]);
    git(repo, &["commit", "--quiet", "--allow-empty", "-m", name]);
    git(repo, &["checkout", "--quiet", current.as_str()]);
}

pub fn local_config(repo: &Path, key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--local", key])
        .current_dir(repo)
        .output()
        .expect("failed to spawn git");
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}
