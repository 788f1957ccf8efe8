//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{run_release_workflow, FetchSource, ReleaseWorkflowArgs, WorkflowResult};
