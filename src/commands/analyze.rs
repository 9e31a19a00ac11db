use std::path::Path;

use anyhow::Context;
use tracing::warn;

use super::common::model_spinner;
use crate::analysis::analyzer::Analyzer;
use crate::analysis::models::IssueAnalysis;
use crate::infra::gh::IssueTracker;
use crate::report::format_report;
use crate::storage::{AnalysisEnvelope, save_envelope};

/// Everything one batch run needs, resolved from CLI flags and config.
pub struct AnalyzeRequest<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub issue_number: u64,
    pub apply_labels: bool,
    pub output_dir: &'a Path,
}

#[tokio::main]
pub async fn run(
    tracker: &dyn IssueTracker,
    analyzer: &Analyzer<'_>,
    request: &AnalyzeRequest<'_>,
) -> anyhow::Result<()> {
    println!(
        "Analyzing issue #{} in {}/{}...\n",
        request.issue_number, request.owner, request.repo
    );

    let output = run_pipeline(tracker, analyzer, request).await?;
    print!("{output}");
    Ok(())
}

/// Fetch, analyze, label, persist. Returns the accumulated output
/// instead of printing so tests can assert on it.
pub(crate) async fn run_pipeline(
    tracker: &dyn IssueTracker,
    analyzer: &Analyzer<'_>,
    request: &AnalyzeRequest<'_>,
) -> anyhow::Result<String> {
    let issue = tracker
        .fetch_issue(request.owner, request.repo, request.issue_number)
        .await
        .with_context(|| {
            format!(
                "Could not fetch issue #{} from {}/{}",
                request.issue_number, request.owner, request.repo
            )
        })?;

    let spinner = model_spinner();
    let analysis = match analyzer.analyze(&issue).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(error = %e, issue = issue.number, "analysis failed, falling back");
            IssueAnalysis::fallback(e.to_string())
        }
    };
    spinner.finish_and_clear();

    let mut output = format_report(&issue, &analysis);
    output.push('\n');

    if request.apply_labels {
        match tracker
            .add_labels(
                request.owner,
                request.repo,
                request.issue_number,
                &analysis.suggested_labels,
            )
            .await
        {
            Ok(()) => {
                output.push_str(&format!(
                    "✓ Applied {} labels to issue #{}\n",
                    analysis.suggested_labels.len(),
                    request.issue_number
                ));
            }
            Err(e) => {
                warn!(error = %e, issue = request.issue_number, "applying labels failed");
                output.push_str("✗ Failed to apply labels\n");
            }
        }
    }

    let envelope = AnalysisEnvelope::new(issue, analysis);
    let path = save_envelope(request.output_dir, &envelope).with_context(|| {
        format!(
            "Could not save analysis to {}",
            request.output_dir.display()
        )
    })?;
    output.push_str(&format!("\n✓ Analysis saved to {}\n", path.display()));

    Ok(output)
}
