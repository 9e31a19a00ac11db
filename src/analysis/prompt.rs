//! Prompt templates sent to the model endpoint.

use indoc::{formatdoc, indoc};

use super::models::Issue;

/// System instruction for the interactive chat fallback.
pub const CHAT_SYSTEM_PROMPT: &str = indoc! {"
    You are a GitHub Project Management assistant. Help users with:
    - Understanding how to organize GitHub issues
    - Best practices for project management with GitHub
    - Analyzing and categorizing issues
    - Suggesting labels and priorities
    Keep responses concise and actionable."};

/// Build the classification prompt for one issue.
///
/// The response contract is strict: a single JSON object and nothing else.
pub fn analysis_prompt(issue: &Issue) -> String {
    formatdoc! {r#"
        Analyze this GitHub issue and provide recommendations for project management.

        Issue #{number}: {title}

        Body:
        {body}

        Based on the issue content, provide a JSON response with:
        {{
            "phase": "1-mvp" | "2-important" | "3-nice-to-have" (based on requirement type),
            "priority": "critical" | "high" | "medium" | "low",
            "type": "feature" | "documentation" | "testing" | "bug",
            "confidence": 0.0-1.0 (how confident you are in this assessment),
            "reasoning": "brief explanation of why these labels make sense",
            "suggested_labels": ["label1", "label2"],
            "should_assign": true | false (should this be assigned to someone?),
            "estimated_effort": "Low" | "Medium" | "High",
            "related_requirements": ["REQ-001", "REQ-002"] (if any)
        }}

        Respond with ONLY valid JSON, no additional text."#,
        number = issue.number,
        title = issue.title,
        body = issue.body,
    }
}
