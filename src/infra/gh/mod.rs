//! GitHub CLI integration.

pub mod client;
pub mod error;

pub use client::{GhCli, IssueTracker};
pub use error::{GhError, Result};
