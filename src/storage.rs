use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::analysis::models::{Issue, IssueAnalysis};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Everything worth keeping from one analysis run: the issue as fetched,
/// the verdict, and when it happened.
#[derive(Debug, Serialize)]
pub struct AnalysisEnvelope {
    pub issue: Issue,
    pub analysis: IssueAnalysis,
    pub timestamp: String,
}

impl AnalysisEnvelope {
    pub fn new(issue: Issue, analysis: IssueAnalysis) -> Self {
        Self {
            issue,
            analysis,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Where the envelope for an issue lands inside the output directory.
pub fn envelope_path(dir: &Path, issue_number: u64) -> PathBuf {
    dir.join(format!("issue-analysis-{issue_number}.json"))
}

/// Save the envelope as pretty-printed JSON, creating the output
/// directory if needed. Re-saving the same issue overwrites.
pub fn save_envelope(dir: &Path, envelope: &AnalysisEnvelope) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = envelope_path(dir, envelope.issue.number);
    let json = serde_json::to_string_pretty(envelope)?;
    fs::write(&path, json)?;
    Ok(path)
}
