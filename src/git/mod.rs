//! Git operations abstraction layer
//!
//! Mutations of a working copy go through the [GitRunner] trait, which runs
//! `git` subcommands with a timeout and captured output. Reads go through
//! [WorkingCopy], backed by the `git2` crate.
//!
//! - [runner::SystemGit]: runs the system `git` binary
//! - [mock::MockGit]: records invocations and replays scripted failures for tests
//! - [fetcher::AuthenticatedRemoteFetcher]: swaps `origin` for an authenticated
//!   source, fetches everything and puts `origin` back

pub mod fetcher;
pub mod mock;
pub mod runner;
pub mod working_copy;

pub use fetcher::{AuthenticatedRemoteFetcher, RemoteFetchOutcome};
pub use mock::MockGit;
pub use runner::SystemGit;
pub use working_copy::{TrackingBranch, WorkingCopy};

use crate::error::Result;
use std::path::Path;
use std::time::Duration;

/// Name of the remote the release tooling rewires
pub const ORIGIN: &str = "origin";

/// Captured output of a successful git invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs git subcommands inside a working directory.
///
/// ## Error Handling
///
/// A non-zero exit, a failure to start the process and an expired timeout are
/// all reported as [crate::error::ReleaseError::GitCommand]. Callers decide how
/// to classify them further. Argument lists may contain credentials, so
/// implementations must not log them verbatim.
pub trait GitRunner {
    /// Run `git <args>` with `working_dir` as the process working directory
    ///
    /// # Returns
    /// * `Ok(GitOutput)` - Process exited with status 0 within `timeout`
    /// * `Err` - Process could not start, exited non-zero, or timed out
    fn run(&self, working_dir: &Path, args: &[&str], timeout: Duration) -> Result<GitOutput>;
}

impl<R: GitRunner + ?Sized> GitRunner for &R {
    fn run(&self, working_dir: &Path, args: &[&str], timeout: Duration) -> Result<GitOutput> {
        (**self).run(working_dir, args, timeout)
    }
}

/// Commit author identity written to the working copy's local config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorIdentity {
    pub name: String,
    pub email: String,
}

impl AuthorIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        AuthorIdentity {
            name: name.into(),
            email: email.into(),
        }
    }
}
