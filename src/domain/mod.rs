//! Domain logic - pure value types independent of git operations

pub mod branch;
pub mod repository;
pub mod version;

pub use branch::BranchName;
pub use repository::{AuthenticatedUri, RepositoryName};
pub use version::SemVerVersion;
