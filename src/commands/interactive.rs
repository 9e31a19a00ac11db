use std::path::Path;

use anyhow::anyhow;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

use super::common::{model_spinner, parse_repo};
use crate::analysis::analyzer::Analyzer;
use crate::analysis::models::IssueAnalysis;
use crate::analysis::prompt::CHAT_SYSTEM_PROMPT;
use crate::chat::ChatSession;
use crate::infra::anthropic::{AnthropicClient, MessagesRequest};
use crate::infra::gh::IssueTracker;
use crate::report::format_report;
use crate::storage::{AnalysisEnvelope, save_envelope};

/// Completion budget for one chat reply.
const CHAT_MAX_TOKENS: u32 = 512;

/// What one line of REPL input means.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Analyze {
        owner: String,
        repo: String,
        issue_number: u64,
    },
    List,
    Exit,
    Chat(String),
    Usage,
    Empty,
}

/// Classify one line of input. Anything that is not a recognized
/// command becomes a chat message.
fn parse_command(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }

    let lower = trimmed.to_lowercase();
    if lower == "exit" {
        return ReplCommand::Exit;
    }

    if lower.starts_with("analyze") {
        let Some(parts) = shlex::split(trimmed) else {
            return ReplCommand::Usage;
        };
        if parts.len() < 3 {
            return ReplCommand::Usage;
        }
        let Ok((owner, repo)) = parse_repo(&parts[1]) else {
            return ReplCommand::Usage;
        };
        let Ok(issue_number) = parts[2].parse::<u64>() else {
            return ReplCommand::Usage;
        };
        if issue_number == 0 {
            return ReplCommand::Usage;
        }
        return ReplCommand::Analyze {
            owner,
            repo,
            issue_number,
        };
    }

    if lower.starts_with("list") {
        return ReplCommand::List;
    }

    ReplCommand::Chat(trimmed.to_string())
}

#[tokio::main]
pub async fn run(
    tracker: &dyn IssueTracker,
    client: &AnthropicClient,
    model: &str,
    output_dir: &Path,
) -> anyhow::Result<()> {
    print_banner();

    let mut editor = DefaultEditor::new()?;
    let mut session = ChatSession::new();
    let analyzer = Analyzer::new(client, model);

    loop {
        println!();
        let readline = tokio::task::block_in_place(|| editor.readline("> "));
        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(anyhow!("failed to read interactive input: {e}")),
        };

        let _ = editor.add_history_entry(line.as_str());

        match parse_command(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Exit => {
                println!("Goodbye!");
                break;
            }
            ReplCommand::List => println!("Feature coming soon!"),
            ReplCommand::Usage => println!("Usage: analyze <owner>/<repo> <issue-num>"),
            ReplCommand::Analyze {
                owner,
                repo,
                issue_number,
            } => analyze_one(tracker, &analyzer, &owner, &repo, issue_number, output_dir).await,
            ReplCommand::Chat(input) => chat_turn(client, model, &mut session, input).await,
        }
    }

    Ok(())
}

fn print_banner() {
    let rule = "=".repeat(50);
    println!("GitHub Issue Analyzer - Interactive Mode");
    println!("{rule}");
    println!("Commands:");
    println!("  analyze <owner>/<repo> <issue-num>  - Analyze a specific issue");
    println!("  list <owner>/<repo>                 - List recent issues");
    println!("  exit                                - Exit the program");
    println!("{rule}");
}

/// Analyze one issue from the REPL. Failures are reported inline and
/// never end the session.
async fn analyze_one(
    tracker: &dyn IssueTracker,
    analyzer: &Analyzer<'_>,
    owner: &str,
    repo: &str,
    issue_number: u64,
    output_dir: &Path,
) {
    println!("\nAnalyzing issue #{issue_number} in {owner}/{repo}...");

    let issue = match tracker.fetch_issue(owner, repo, issue_number).await {
        Ok(issue) => issue,
        Err(e) => {
            warn!(error = %e, issue = issue_number, "fetch failed");
            println!("Could not fetch issue details");
            return;
        }
    };

    let spinner = model_spinner();
    let analysis = match analyzer.analyze(&issue).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(error = %e, issue = issue.number, "analysis failed, falling back");
            IssueAnalysis::fallback(e.to_string())
        }
    };
    spinner.finish_and_clear();

    println!("{}", format_report(&issue, &analysis));

    let envelope = AnalysisEnvelope::new(issue, analysis);
    match save_envelope(output_dir, &envelope) {
        Ok(path) => println!("Analysis saved to {}", path.display()),
        Err(e) => {
            warn!(error = %e, "saving analysis failed");
            eprintln!("Failed to save analysis: {e}");
        }
    }
}

/// One chat exchange. The user message stays in the transcript even
/// when the model call fails.
async fn chat_turn(
    client: &AnthropicClient,
    model: &str,
    session: &mut ChatSession,
    input: String,
) {
    session.push_user(input);

    let request = MessagesRequest {
        model,
        max_tokens: CHAT_MAX_TOKENS,
        messages: session.messages(),
        system: Some(CHAT_SYSTEM_PROMPT),
    };

    match client.complete(&request).await {
        Ok(reply) => {
            println!("\nAssistant: {reply}");
            session.push_assistant(reply);
        }
        Err(e) => eprintln!("Error: {e}"),
    }
}
