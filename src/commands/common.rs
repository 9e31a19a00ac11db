//! Helpers shared across commands.

use std::io::IsTerminal;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

use crate::shared::config::Config;

/// Parse "owner/repo" into (owner, repo) tuple.
pub fn parse_repo(repo: &str) -> anyhow::Result<(String, String)> {
    if let Some((owner, repo_name)) = repo.split_once('/') {
        if owner.is_empty() || repo_name.is_empty() {
            anyhow::bail!("Invalid repository format: {repo}. Expected owner/repo");
        }
        Ok((owner.to_string(), repo_name.to_string()))
    } else {
        anyhow::bail!("Invalid repository format: {repo}. Expected owner/repo")
    }
}

/// Pick the repository to work on: the --repo argument if given,
/// otherwise default_repo from the config file.
pub fn resolve_repo(repo_arg: Option<&str>, config: &Config) -> anyhow::Result<(String, String)> {
    let repo = repo_arg
        .or(config.default_repo.as_deref())
        .context("No repository specified. Use --repo or set default_repo in the config file.")?;
    parse_repo(repo)
}

/// Spinner on stderr while a model call is in flight.
/// Hidden when stderr is not a terminal.
pub fn model_spinner() -> ProgressBar {
    if std::io::stderr().is_terminal() {
        let s = ProgressBar::new_spinner();
        #[allow(clippy::expect_used)] // static template string
        s.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .template("{spinner} {msg}")
                .expect("valid template"),
        );
        s.set_message("Waiting for the model response...");
        s.enable_steady_tick(std::time::Duration::from_millis(80));
        s
    } else {
        ProgressBar::hidden()
    }
}
