//! Core pipeline orchestration for RepoSnap.
//!
//! Ties acquisition, tree rendering, content scanning, and document
//! assembly into the end-to-end snapshot workflow.

pub mod pipeline;

pub use pipeline::{ProgressReporter, SilentProgress, SnapshotConfig, SnapshotResult, run};
