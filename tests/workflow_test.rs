// tests/workflow_test.rs
mod common;

use std::cell::RefCell;
use std::process::Command;

use common::{add_branch, destination_clone, git, source_repository, ORIGINAL_ORIGIN};
use milestone_release::cli::{run_release_workflow, FetchSource, ReleaseWorkflowArgs};
use milestone_release::config::Config;
use milestone_release::domain::RepositoryName;
use milestone_release::git::AuthorIdentity;
use milestone_release::planner::{BranchAction, ReleaseKind, ReleasePlan};
use milestone_release::publish::ReleasePublisher;
use milestone_release::Result;

#[derive(Default)]
struct RecordingPublisher {
    published: RefCell<Vec<(String, String, String)>>,
}

impl ReleasePublisher for RecordingPublisher {
    fn publish(&self, repository: &RepositoryName, plan: &ReleasePlan, changelog: &str) -> Result<()> {
        self.published.borrow_mut().push((
            repository.full_name(),
            plan.tag_name(),
            changelog.to_string(),
        ));
        Ok(())
    }
}

fn workflow_args(milestone: &str, source: &std::path::Path, destination: &std::path::Path) -> ReleaseWorkflowArgs {
    ReleaseWorkflowArgs {
        milestone: milestone.to_string(),
        repository: "foo/bar".to_string(),
        source: FetchSource::Raw(source.to_str().unwrap().to_string()),
        destination: destination.to_path_buf(),
        author: AuthorIdentity::new("Release Bot", "bot@example.com"),
        changelog: "- Fixed things".to_string(),
        dry_run: false,
    }
}

#[test]
fn test_release_on_branch_fetched_during_workflow() {
    let source = source_repository();
    let destination = destination_clone(source.path());
    add_branch(source.path(), "1.1.x");

    let publisher = RecordingPublisher::default();
    let result = run_release_workflow(
        workflow_args("1.1.3", source.path(), destination.path()),
        &Config::default(),
        &publisher,
    )
    .unwrap();

    assert_eq!(result.plan.kind, ReleaseKind::Patch);
    assert_eq!(result.plan.target_branch.name(), "1.1.x");
    assert_eq!(result.plan.branch_action, BranchAction::UseExisting);
    assert_eq!(result.fetch.restored_origin.as_deref(), Some(ORIGINAL_ORIGIN));
    assert!(result.published);
    assert_eq!(
        publisher.published.borrow().as_slice(),
        &[(
            "foo/bar".to_string(),
            "1.1.3".to_string(),
            "- Fixed things".to_string()
        )]
    );
}

#[test]
fn test_dry_run_plans_new_minor_without_publishing() {
    let source = source_repository();
    let destination = destination_clone(source.path());

    let mut args = workflow_args("2.1.0", source.path(), destination.path());
    args.dry_run = true;
    let publisher = RecordingPublisher::default();
    let result = run_release_workflow(args, &Config::default(), &publisher).unwrap();

    assert_eq!(result.plan.kind, ReleaseKind::Minor);
    assert_eq!(result.plan.branch_action, BranchAction::CreateFromDefault);
    assert!(!result.published);
    assert!(publisher.published.borrow().is_empty());
}

#[test]
fn test_workflow_compares_with_latest_tag() {
    let source = source_repository();
    let destination = destination_clone(source.path());
    git(source.path(), &["tag", "1.9.0"]);
    git(source.path(), &["tag", "1.10.0"]);

    let mut args = workflow_args("1.9.1", source.path(), destination.path());
    args.dry_run = true;
    let result = run_release_workflow(args, &Config::default(), &RecordingPublisher::default()).unwrap();

    let ordering = result.ordering.expect("version tags were fetched");
    assert_eq!(ordering.latest.full_release_name(), "1.10.0");
    assert!(ordering.not_newer);
    assert!(ordering.lexicographic_mismatch);
}

#[test]
fn test_cli_plan_prints_release_plan() {
    let output = Command::new(env!("CARGO_BIN_EXE_milestone-release"))
        .args(["plan", "2.0.0"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Kind:       major"), "{}", stdout);
    assert!(stdout.contains("2.0.x"), "{}", stdout);
}

#[test]
fn test_cli_rejects_invalid_milestone() {
    let output = Command::new(env!("CARGO_BIN_EXE_milestone-release"))
        .args(["plan", "not-a-version"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not-a-version"), "{}", stderr);
}

#[test]
fn test_cli_rejects_milestone_without_follow_ups() {
    let output = Command::new(env!("CARGO_BIN_EXE_milestone-release"))
        .args(["plan", "0.0.18446744073709551615"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid version format"), "{}", stderr);
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_milestone-release"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("fetch"));
    assert!(stdout.contains("release"));
}
