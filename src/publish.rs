//! Sink for the hosting-side release object.
//!
//! Creating the release on the hosting platform is an external concern; the
//! core only hands over the computed tag name and changelog body.

use crate::domain::RepositoryName;
use crate::error::Result;
use crate::planner::ReleasePlan;
use crate::ui;

/// Receives a finished release plan together with its changelog
pub trait ReleasePublisher {
    fn publish(&self, repository: &RepositoryName, plan: &ReleasePlan, changelog: &str)
        -> Result<()>;
}

/// Prints the release instead of creating it remotely
#[derive(Debug, Default)]
pub struct ConsolePublisher;

impl ReleasePublisher for ConsolePublisher {
    fn publish(
        &self,
        repository: &RepositoryName,
        plan: &ReleasePlan,
        changelog: &str,
    ) -> Result<()> {
        ui::display_release(repository, plan, changelog);
        Ok(())
    }
}
