use crate::error::{ReleaseError, Result};
use git2::{BranchType, ConfigLevel, ErrorCode, Repository};
use std::path::{Path, PathBuf};

/// Upstream settings of one local branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingBranch {
    pub branch: String,
    /// `branch.<name>.merge`, e.g. `refs/heads/main`
    pub merge: Option<String>,
}

/// Read-only view of a local git working copy.
///
/// The repository is reopened for every query so that changes made by
/// external git processes in between are always visible.
#[derive(Debug, Clone)]
pub struct WorkingCopy {
    path: PathBuf,
}

impl WorkingCopy {
    /// Open an existing non-bare repository at exactly `path`
    ///
    /// # Returns
    /// * `Ok(WorkingCopy)` - `path` is the root of a working copy
    /// * `Err(NotAGitWorkingCopy)` - Path missing, not a repository, or bare
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let not_a_working_copy = || ReleaseError::NotAGitWorkingCopy { path: path.clone() };

        let repo = Repository::open(&path).map_err(|_| not_a_working_copy())?;
        if repo.is_bare() {
            return Err(not_a_working_copy());
        }

        Ok(WorkingCopy { path })
    }

    fn repo(&self) -> Result<Repository> {
        Repository::open(&self.path).map_err(|_| ReleaseError::NotAGitWorkingCopy {
            path: self.path.clone(),
        })
    }

    /// URL of a remote, `None` if the remote is not configured
    pub fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let repo = self.repo()?;
        let url = match repo.find_remote(remote) {
            Ok(found) => found.url().map(|u| u.to_string()),
            Err(e) if e.code() == ErrorCode::NotFound => None,
            Err(e) if e.code() == ErrorCode::InvalidSpec => None,
            Err(e) => return Err(e.into()),
        };
        Ok(url)
    }

    /// Value of a key in the repository-local config (`.git/config`) only
    pub fn local_config(&self, key: &str) -> Result<Option<String>> {
        let repo = self.repo()?;
        let config = repo.config()?;
        let local = match config.open_level(ConfigLevel::Local) {
            Ok(local) => local,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match local.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remote-tracking branches of `remote`, without the `remote/` prefix and
    /// without the symbolic `HEAD`, sorted
    pub fn remote_branches(&self, remote: &str) -> Result<Vec<String>> {
        let repo = self.repo()?;
        let prefix = format!("{}/", remote);
        let mut branches = Vec::new();

        for entry in repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                if let Some(short) = name.strip_prefix(&prefix) {
                    if short != "HEAD" {
                        branches.push(short.to_string());
                    }
                }
            }
        }

        branches.sort();
        Ok(branches)
    }

    /// All tag names, sorted
    pub fn tags(&self) -> Result<Vec<String>> {
        let repo = self.repo()?;
        let names = repo.tag_names(None)?;
        let mut tags: Vec<String> = names.iter().flatten().map(|s| s.to_string()).collect();
        tags.sort();
        Ok(tags)
    }

    pub fn has_local_branch(&self, name: &str) -> Result<bool> {
        self.has_branch(name, BranchType::Local)
    }

    /// Whether `remote/name` exists as a remote-tracking branch
    pub fn has_remote_branch(&self, remote: &str, name: &str) -> Result<bool> {
        self.has_branch(&format!("{}/{}", remote, name), BranchType::Remote)
    }

    fn has_branch(&self, name: &str, branch_type: BranchType) -> Result<bool> {
        let repo = self.repo()?;
        let found = match repo.find_branch(name, branch_type) {
            Ok(_) => true,
            Err(e) if e.code() == ErrorCode::NotFound => false,
            Err(e) if e.code() == ErrorCode::InvalidSpec => false,
            Err(e) => return Err(e.into()),
        };
        Ok(found)
    }

    /// Local branches whose upstream is on `remote`, read from the local config
    pub fn tracking_branches(&self, remote: &str) -> Result<Vec<TrackingBranch>> {
        let repo = self.repo()?;
        let mut names = Vec::new();
        for entry in repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        let mut tracking = Vec::new();
        for branch in names {
            if self.local_config(&format!("branch.{}.remote", branch))?.as_deref() != Some(remote) {
                continue;
            }
            let merge = self.local_config(&format!("branch.{}.merge", branch))?;
            tracking.push(TrackingBranch { branch, merge });
        }
        Ok(tracking)
    }
}
