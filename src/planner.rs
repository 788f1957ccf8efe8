//! Release planning: from a milestone title to the version, kind and target branch

use crate::domain::{BranchName, SemVerVersion};
use crate::error::Result;
use crate::git::{WorkingCopy, ORIGIN};
use std::cmp::Ordering;
use std::fmt;

/// Answers whether a branch already exists where the release will be cut
pub trait BranchLookup {
    fn branch_exists(&self, branch: &BranchName) -> Result<bool>;
}

/// A branch counts as existing locally or as `origin/<branch>`
impl BranchLookup for WorkingCopy {
    fn branch_exists(&self, branch: &BranchName) -> Result<bool> {
        Ok(self.has_local_branch(branch.name())?
            || self.has_remote_branch(ORIGIN, branch.name())?)
    }
}

/// Fixed list of branch names, for planning without a working copy
impl<S: AsRef<str>> BranchLookup for [S] {
    fn branch_exists(&self, branch: &BranchName) -> Result<bool> {
        Ok(self.iter().any(|b| b.as_ref() == branch.name()))
    }
}

/// Which part of the version this release moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    Major,
    Minor,
    Patch,
}

impl ReleaseKind {
    pub fn of(version: &SemVerVersion) -> Self {
        if version.is_new_major_release() {
            ReleaseKind::Major
        } else if version.is_new_minor_release() {
            ReleaseKind::Minor
        } else {
            ReleaseKind::Patch
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseKind::Major => write!(f, "major"),
            ReleaseKind::Minor => write!(f, "minor"),
            ReleaseKind::Patch => write!(f, "patch"),
        }
    }
}

/// What has to happen to the target branch before tagging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchAction {
    /// The release branch is already there
    UseExisting,
    /// The release branch must be created from the nearest default branch
    CreateFromDefault,
}

/// Decision record handed to the fetch and publish collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub version: SemVerVersion,
    pub kind: ReleaseKind,
    pub target_branch: BranchName,
    pub branch_action: BranchAction,
    /// Milestones to open once this release is out: next patch, minor and major
    pub follow_up_milestones: Vec<SemVerVersion>,
}

impl ReleasePlan {
    /// Tag and release name, e.g. `1.4.0`
    pub fn tag_name(&self) -> String {
        self.version.full_release_name()
    }
}

/// Turns milestone titles into release plans. Never touches the repository
/// beyond the read-only branch lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleasePlanner;

impl ReleasePlanner {
    pub fn new() -> Self {
        ReleasePlanner
    }

    /// Plan the release for a milestone
    ///
    /// # Returns
    /// * `Ok(ReleasePlan)` - Version, kind and target branch
    /// * `Err(InvalidVersionFormat)` - The title is not a semantic version, or a
    ///   follow-up milestone cannot be derived from it
    pub fn plan<B: BranchLookup + ?Sized>(
        &self,
        milestone_title: &str,
        branches: &B,
    ) -> Result<ReleasePlan> {
        let version = SemVerVersion::parse(milestone_title)?;
        let target_branch = version.target_release_branch_name();

        let branch_action = if branches.branch_exists(&target_branch)? {
            BranchAction::UseExisting
        } else {
            BranchAction::CreateFromDefault
        };

        Ok(ReleasePlan {
            kind: ReleaseKind::of(&version),
            follow_up_milestones: vec![
                version.next_patch()?,
                version.next_minor()?,
                version.next_major()?,
            ],
            version,
            target_branch,
            branch_action,
        })
    }
}

/// Where a planned version sits relative to the newest tagged release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOrdering {
    /// Highest tag by semantic-version precedence
    pub latest: SemVerVersion,
    /// The planned version does not come after `latest`
    pub not_newer: bool,
    /// `less_than_equal` disagrees with precedence for this pair
    pub lexicographic_mismatch: bool,
}

impl ReleaseOrdering {
    /// Compare `version` with the tags that parse as versions. `None` if no tag does.
    pub fn against_tags<S: AsRef<str>>(version: &SemVerVersion, tags: &[S]) -> Result<Option<Self>> {
        let mut latest: Option<SemVerVersion> = None;
        for tag in tags {
            let Ok(candidate) = SemVerVersion::parse(tag.as_ref()) else {
                continue;
            };
            let replace = match &latest {
                Some(current) => current.cmp_precedence(&candidate)? == Ordering::Less,
                None => true,
            };
            if replace {
                latest = Some(candidate);
            }
        }

        let Some(latest) = latest else {
            return Ok(None);
        };
        let not_newer = version.cmp_precedence(&latest)? != Ordering::Greater;
        Ok(Some(ReleaseOrdering {
            lexicographic_mismatch: version.less_than_equal(&latest) != not_newer,
            not_newer,
            latest,
        }))
    }
}
