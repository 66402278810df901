//! Drivers for side effects outside the descriptor files
//!
//! - fs: collision-safe renames and path helpers
//! - GitDriver: optional snapshot commits of the project tree

pub mod fs;
mod git;

pub use git::{CommitOutcome, GitDriver, DEFAULT_COMMIT_MESSAGE};
