//! Issue classification via the model endpoint.

use thiserror::Error;
use tracing::debug;

use super::models::{Issue, IssueAnalysis};
use super::prompt;
use crate::infra::anthropic::{AnthropicClient, AnthropicError, Message, MessagesRequest};

/// Output budget for one classification call.
const ANALYSIS_MAX_TOKENS: u32 = 1024;

/// Failure of a single analysis attempt. Endpoint failures and unparseable
/// model output stay distinct so callers can report them differently.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("model call failed: {0}")]
    Api(#[from] AnthropicError),

    /// The model answered, but not with a single valid analysis object.
    #[error("model response is not a valid analysis: {message}")]
    InvalidResponse { message: String, raw: String },
}

/// Classifies issues with a model client injected at construction.
pub struct Analyzer<'a> {
    client: &'a AnthropicClient,
    model: &'a str,
}

impl<'a> Analyzer<'a> {
    pub fn new(client: &'a AnthropicClient, model: &'a str) -> Self {
        Self { client, model }
    }

    /// Ask the model to classify one issue.
    ///
    /// Returns the parsed analysis or a typed error; the caller decides
    /// whether a fallback is appropriate.
    pub async fn analyze(&self, issue: &Issue) -> Result<IssueAnalysis, AnalyzeError> {
        let prompt = prompt::analysis_prompt(issue);
        let messages = [Message::user(prompt)];
        let request = MessagesRequest {
            model: self.model,
            max_tokens: ANALYSIS_MAX_TOKENS,
            messages: &messages,
            system: None,
        };

        let text = self.client.complete(&request).await?;
        debug!(
            issue = issue.number,
            response_len = text.len(),
            "model response received"
        );

        serde_json::from_str(text.trim()).map_err(|e| AnalyzeError::InvalidResponse {
            message: e.to_string(),
            raw: text,
        })
    }
}
