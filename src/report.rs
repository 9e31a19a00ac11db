//! Human-readable rendering of an issue analysis.

use chrono::{DateTime, Local, TimeZone};
use indoc::formatdoc;

use crate::analysis::models::{Effort, Issue, IssueAnalysis};

const BANNER: &str = "═══════════════════════════════════════════════════════════════";
const RULE: &str = "─────────────────────────────────────────────────────────────";

/// Render the analysis report stamped with the current wall-clock time.
pub fn format_report(issue: &Issue, analysis: &IssueAnalysis) -> String {
    format_report_at(issue, analysis, Local::now())
}

/// Testable variant with an injected timestamp.
///
/// Scalar values are aligned to a fixed column; list sections render one
/// bullet per entry in input order.
pub fn format_report_at<Tz: TimeZone>(
    issue: &Issue,
    analysis: &IssueAnalysis,
    analyzed_at: DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let number = issue.number;
    let title = &issue.title;
    let analyzed = analyzed_at.format("%Y-%m-%d %H:%M:%S");

    let phase = analysis.phase.as_str();
    let priority = analysis.priority.as_str();
    let issue_type = analysis.issue_type.as_str();
    let effort = analysis.estimated_effort.map_or("N/A", Effort::as_str);
    let confidence = format!("{:.0}%", analysis.confidence * 100.0);
    let reasoning = analysis.reasoning.as_deref().unwrap_or("No reasoning provided");
    let should_assign = analysis.should_assign;

    let labels_block = bullet_lines(&analysis.suggested_labels);
    let requirements_block = if analysis.related_requirements.is_empty() {
        "  None identified".to_string()
    } else {
        bullet_lines(&analysis.related_requirements)
    };

    formatdoc! {"

        {BANNER}
        GitHub Issue Analysis Report
        {BANNER}

        Issue: #{number} - {title}
        Analyzed: {analyzed}

        ANALYSIS RESULTS
        {RULE}

        Phase:           {phase}
        Priority:        {priority}
        Type:            {issue_type}
        Effort:          {effort}
        Confidence:      {confidence}

        Reasoning:
        {reasoning}

        RECOMMENDATIONS
        {RULE}

        Suggested Labels:
        {labels_block}

        Should Assign: {should_assign}

        Related Requirements:
        {requirements_block}

        NEXT STEPS
        {RULE}

        1. Review the suggested labels above
        2. If you agree with the analysis:
           - Labels will be automatically applied
           - Issue will be added to the project board
        3. If confidence is low, review manually and adjust labels
        4. Assign the issue when ready to start work

        {BANNER}
    "}
}

fn bullet_lines(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| format!("  • {entry}"))
        .collect::<Vec<_>>()
        .join("\n")
}
