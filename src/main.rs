mod analysis;
mod chat;
mod cli;
mod commands;
mod infra;
mod report;
mod shared;
mod storage;

use clap::Parser;

use analysis::analyzer::Analyzer;
use cli::Cli;
use commands::analyze::AnalyzeRequest;
use commands::common::resolve_repo;
use infra::anthropic::{AnthropicClient, AnthropicConfig};
use infra::gh::GhCli;
use shared::{config, env, logging};

fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = config::load_config()?;
    let api_key = env::api_key_from_env()?;

    let client = AnthropicClient::new(&AnthropicConfig {
        api_key,
        api_base: config.api_base.clone(),
    })?;
    let tracker = GhCli::new();

    match cli.issue {
        // --interactive wins even when an issue number is given.
        Some(issue_number) if !cli.interactive => {
            let (owner, repo) = resolve_repo(cli.repo.as_deref(), &config)?;
            let analyzer = Analyzer::new(&client, &config.model);
            let request = AnalyzeRequest {
                owner: &owner,
                repo: &repo,
                issue_number,
                apply_labels: cli.apply_labels,
                output_dir: &config.output_dir,
            };
            commands::analyze::run(&tracker, &analyzer, &request)
        }
        _ => commands::interactive::run(&tracker, &client, &config.model, &config.output_dir),
    }
}
