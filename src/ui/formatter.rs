//! Pure formatting functions for UI output.
//!
//! Rendering is split from printing so the text can be tested; the `display_*`
//! functions only print what the `format_*` functions build.

use console::style;

use crate::domain::RepositoryName;
use crate::git::RemoteFetchOutcome;
use crate::domain::SemVerVersion;
use crate::planner::{BranchAction, ReleaseOrdering, ReleasePlan};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Render a release plan as an indented block.
pub fn format_plan(plan: &ReleasePlan) -> String {
    let branch_note = match plan.branch_action {
        BranchAction::UseExisting => "existing",
        BranchAction::CreateFromDefault => "to be created from the default branch",
    };
    let follow_ups: Vec<String> = plan
        .follow_up_milestones
        .iter()
        .map(|v| v.full_release_name())
        .collect();

    format!(
        "Release plan:\n  Version:    {}\n  Kind:       {}\n  Branch:     {} ({})\n  Follow-ups: {}",
        plan.version,
        plan.kind,
        plan.target_branch,
        branch_note,
        follow_ups.join(", ")
    )
}

/// Display a release plan.
pub fn display_plan(plan: &ReleasePlan) {
    println!("\n{}", style(format_plan(plan)).bold());
}

/// Render how `version` relates to the newest release tag.
pub fn format_ordering(version: &SemVerVersion, ordering: &ReleaseOrdering) -> Vec<String> {
    let mut lines = vec![format!("Latest release: {}", ordering.latest)];
    if ordering.not_newer {
        lines.push(format!(
            "{} does not come after the latest release {}",
            version, ordering.latest
        ));
    }
    if ordering.lexicographic_mismatch {
        lines.push(format!(
            "string ordering of {} and {} disagrees with version precedence",
            version, ordering.latest
        ));
    }
    lines
}

/// Display the ordering check, warnings in yellow.
pub fn display_ordering(version: &SemVerVersion, ordering: &ReleaseOrdering) {
    let mut lines = format_ordering(version, ordering).into_iter();
    if let Some(first) = lines.next() {
        display_status(&first);
    }
    for warning in lines {
        println!("{} {}", style("WARNING:").yellow(), warning);
    }
}

/// Render what a fetch brought in.
pub fn format_fetch_outcome(outcome: &RemoteFetchOutcome) -> String {
    let mut lines = vec![format!(
        "Fetched {} branches and {} tags",
        outcome.remote_branches.len(),
        outcome.tags.len()
    )];
    for branch in &outcome.remote_branches {
        lines.push(format!("  origin/{}", branch));
    }
    match &outcome.restored_origin {
        Some(url) => lines.push(format!("origin restored to {}", url)),
        None => lines.push("temporary origin removed".to_string()),
    }
    lines.join("\n")
}

/// Display a fetch outcome.
pub fn display_fetch_outcome(outcome: &RemoteFetchOutcome) {
    display_success(&format_fetch_outcome(outcome));
}

/// Display a release handed to the console sink.
///
/// # Arguments
/// * `repository` - Repository the release belongs to
/// * `plan` - The computed plan
/// * `changelog` - Release notes body, may be empty
pub fn display_release(repository: &RepositoryName, plan: &ReleasePlan, changelog: &str) {
    println!(
        "\n{} {} {}",
        style("Release").bold(),
        style(plan.tag_name()).green(),
        style(format!("({} on {})", repository, plan.target_branch)).dim()
    );
    if changelog.trim().is_empty() {
        println!("  (no changelog)");
    } else {
        for line in changelog.lines() {
            println!("  {}", line);
        }
    }
}
