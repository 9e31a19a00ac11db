//! Issue tracker operations backed by the `gh` CLI.

use tokio::process::Command;
use tracing::{debug, warn};

use super::error::{GhError, Result};
use crate::analysis::models::Issue;

/// Fields requested from `gh issue view --json`.
const ISSUE_JSON_FIELDS: &str = "title,body,labels,state,number,createdAt";

/// Tracker operations the analysis pipeline needs.
#[async_trait::async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch one issue.
    async fn fetch_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue>;

    /// Attach labels to an issue. An empty set is a no-op success.
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<()>;
}

/// Production tracker shelling out to the `gh` binary.
///
/// Every invocation passes arguments as an array; no shell is involved, so
/// label text cannot be interpreted as command syntax.
pub struct GhCli {
    program: String,
}

impl GhCli {
    pub fn new() -> Self {
        Self::with_program("gh")
    }

    /// Use a specific binary, for tests or a non-PATH install.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!(program = %self.program, ?args, "running tracker command");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|source| GhError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, %stderr, "tracker command failed");
            return Err(GhError::CommandFailed {
                status: output.status,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IssueTracker for GhCli {
    async fn fetch_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue> {
        let number_arg = number.to_string();
        let repo_arg = format!("{owner}/{repo}");

        let stdout = self
            .run(&[
                "issue",
                "view",
                &number_arg,
                "--repo",
                &repo_arg,
                "--json",
                ISSUE_JSON_FIELDS,
            ])
            .await?;

        Ok(serde_json::from_str(&stdout)?)
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<()> {
        if labels.is_empty() {
            return Ok(());
        }

        let number_arg = number.to_string();
        let repo_arg = format!("{owner}/{repo}");

        let mut args = vec!["issue", "edit", number_arg.as_str(), "--repo", repo_arg.as_str()];
        for label in labels {
            args.push("--add-label");
            args.push(label);
        }

        self.run(&args).await?;
        Ok(())
    }
}
