//! Data model for issues and their triage classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An issue as returned by `gh issue view --json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

/// A label attached to an issue. The tracker emits richer objects; only the
/// name matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Delivery phase the issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "1-mvp")]
    Mvp,
    #[serde(rename = "2-important")]
    Important,
    #[serde(rename = "3-nice-to-have")]
    NiceToHave,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Mvp => "1-mvp",
            Phase::Important => "2-important",
            Phase::NiceToHave => "3-nice-to-have",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Feature,
    Documentation,
    Testing,
    Bug,
}

impl IssueType {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Feature => "feature",
            IssueType::Documentation => "documentation",
            IssueType::Testing => "testing",
            IssueType::Bug => "bug",
        }
    }
}

/// Effort estimate. Serialized capitalized ("Low", "Medium", "High").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl Effort {
    pub fn as_str(self) -> &'static str {
        match self {
            Effort::Low => "Low",
            Effort::Medium => "Medium",
            Effort::High => "High",
        }
    }
}

/// The model's triage classification for one issue.
///
/// The three classification enums and `confidence` are mandatory in the
/// model's response; everything else defaults when omitted. A value outside
/// an enum's domain fails deserialization, which callers treat as a parse
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueAnalysis {
    pub phase: Phase,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Model's confidence in [0, 1].
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_labels: Vec<String>,
    #[serde(default)]
    pub should_assign: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_effort: Option<Effort>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_requirements: Vec<String>,
    /// Set when this analysis is a stand-in for a failed model call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IssueAnalysis {
    /// Synthetic analysis substituted when the model call or response
    /// parsing fails: MVP phase, medium priority, feature type, zero
    /// confidence, with the failure preserved in `error`.
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            phase: Phase::Mvp,
            priority: Priority::Medium,
            issue_type: IssueType::Feature,
            confidence: 0.0,
            reasoning: None,
            suggested_labels: Vec::new(),
            should_assign: false,
            estimated_effort: None,
            related_requirements: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn issue_parses_tracker_json() {
        // Shape emitted by `gh issue view --json`; label objects carry
        // fields beyond `name` that must be ignored.
        let raw = json!({
            "number": 7,
            "title": "Add login",
            "body": "Users need to log in",
            "labels": [
                {"id": "LA_abc", "name": "bug", "color": "d73a4a", "description": ""}
            ],
            "state": "OPEN",
            "createdAt": "2025-01-01T00:00:00Z"
        });

        let issue: Issue = serde_json::from_value(raw).unwrap();
        assert_eq!(issue.number, 7);
        assert_eq!(issue.title, "Add login");
        assert_eq!(issue.body, "Users need to log in");
        assert_eq!(issue.labels, vec![Label { name: "bug".to_string() }]);
        assert_eq!(issue.state, "OPEN");
        assert_eq!(issue.created_at.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn issue_serializes_camel_case() {
        let issue = Issue {
            number: 1,
            title: "t".to_string(),
            body: String::new(),
            labels: vec![],
            state: "OPEN".to_string(),
            created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&issue).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[rstest]
    #[case::mvp(Phase::Mvp, "1-mvp")]
    #[case::important(Phase::Important, "2-important")]
    #[case::nice_to_have(Phase::NiceToHave, "3-nice-to-have")]
    fn phase_wire_names(#[case] phase: Phase, #[case] expected: &str) {
        assert_eq!(phase.as_str(), expected);
        assert_eq!(serde_json::to_value(phase).unwrap(), json!(expected));
        assert_eq!(
            serde_json::from_value::<Phase>(json!(expected)).unwrap(),
            phase
        );
    }

    #[rstest]
    #[case::critical(Priority::Critical, "critical")]
    #[case::high(Priority::High, "high")]
    #[case::medium(Priority::Medium, "medium")]
    #[case::low(Priority::Low, "low")]
    fn priority_wire_names(#[case] priority: Priority, #[case] expected: &str) {
        assert_eq!(priority.as_str(), expected);
        assert_eq!(serde_json::to_value(priority).unwrap(), json!(expected));
    }

    #[rstest]
    #[case::feature(IssueType::Feature, "feature")]
    #[case::documentation(IssueType::Documentation, "documentation")]
    #[case::testing(IssueType::Testing, "testing")]
    #[case::bug(IssueType::Bug, "bug")]
    fn issue_type_wire_names(#[case] issue_type: IssueType, #[case] expected: &str) {
        assert_eq!(issue_type.as_str(), expected);
        assert_eq!(serde_json::to_value(issue_type).unwrap(), json!(expected));
    }

    #[test]
    fn effort_keeps_capitalized_names() {
        assert_eq!(serde_json::to_value(Effort::Medium).unwrap(), json!("Medium"));
        assert_eq!(
            serde_json::from_value::<Effort>(json!("High")).unwrap(),
            Effort::High
        );
    }

    #[test]
    fn analysis_parses_full_object() {
        let raw = json!({
            "phase": "1-mvp",
            "priority": "high",
            "type": "feature",
            "confidence": 0.9,
            "reasoning": "core auth",
            "suggested_labels": ["feature", "1-mvp"],
            "should_assign": true,
            "estimated_effort": "Medium",
            "related_requirements": ["REQ-001"]
        });

        let analysis: IssueAnalysis = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(analysis.phase, Phase::Mvp);
        assert_eq!(analysis.priority, Priority::High);
        assert_eq!(analysis.issue_type, IssueType::Feature);
        assert_eq!(analysis.confidence, 0.9);
        assert_eq!(analysis.reasoning.as_deref(), Some("core auth"));
        assert!(analysis.should_assign);
        assert_eq!(analysis.estimated_effort, Some(Effort::Medium));

        // Serializing back yields the same object.
        assert_eq!(serde_json::to_value(&analysis).unwrap(), raw);
    }

    #[test]
    fn analysis_defaults_optional_fields() {
        let raw = json!({
            "phase": "2-important",
            "priority": "low",
            "type": "bug",
            "confidence": 0.4
        });

        let analysis: IssueAnalysis = serde_json::from_value(raw).unwrap();
        assert_eq!(analysis.reasoning, None);
        assert!(analysis.suggested_labels.is_empty());
        assert!(!analysis.should_assign);
        assert_eq!(analysis.estimated_effort, None);
        assert!(analysis.related_requirements.is_empty());
        assert_eq!(analysis.error, None);
    }

    #[rstest]
    #[case::unknown_phase(json!({"phase": "4-later", "priority": "low", "type": "bug", "confidence": 0.4}))]
    #[case::wrong_confidence_type(json!({"phase": "1-mvp", "priority": "low", "type": "bug", "confidence": "high"}))]
    #[case::missing_priority(json!({"phase": "1-mvp", "type": "bug", "confidence": 0.4}))]
    fn analysis_rejects_schema_mismatch(#[case] raw: serde_json::Value) {
        assert!(serde_json::from_value::<IssueAnalysis>(raw).is_err());
    }

    #[test]
    fn fallback_has_zero_confidence_and_error() {
        let analysis = IssueAnalysis::fallback("model call failed: timeout");

        assert_eq!(analysis.phase, Phase::Mvp);
        assert_eq!(analysis.priority, Priority::Medium);
        assert_eq!(analysis.issue_type, IssueType::Feature);
        assert_eq!(analysis.confidence, 0.0);
        assert_eq!(analysis.error.as_deref(), Some("model call failed: timeout"));
        assert!(analysis.suggested_labels.is_empty());
    }

    #[test]
    fn fallback_serializes_error_field() {
        let value = serde_json::to_value(IssueAnalysis::fallback("boom")).unwrap();

        assert_eq!(value["error"], "boom");
        assert_eq!(value["confidence"], 0.0);
        // Empty optional sequences stay off the wire.
        assert!(value.get("suggested_labels").is_none());
        assert!(value.get("related_requirements").is_none());
    }
}
