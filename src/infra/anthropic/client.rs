//! Minimal client for an Anthropic-style Messages endpoint.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{AnthropicError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Connection settings for the Messages endpoint.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub api_base: String,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of one Messages call.
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Client for the Messages endpoint.
///
/// Construct once and share by reference; the API key is baked into the
/// default headers at construction time. Requests have no timeout: a call
/// blocks its caller until the endpoint responds or the connection drops.
#[derive(Debug)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_base: String,
}

impl AnthropicClient {
    pub fn new(config: &AnthropicConfig) -> Result<Self> {
        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| AnthropicError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.api_base)
    }

    /// Send one Messages call and return the first text segment of the
    /// reply.
    pub async fn complete(&self, request: &MessagesRequest<'_>) -> Result<String> {
        debug!(
            model = request.model,
            max_tokens = request.max_tokens,
            messages = request.messages.len(),
            "calling model endpoint"
        );

        let response = self
            .http
            .post(self.messages_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnthropicError::Status { status, body });
        }

        let body: MessagesResponse = response.json().await?;
        body.content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or(AnthropicError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> AnthropicClient {
        AnthropicClient::new(&AnthropicConfig {
            api_key: "test-key".to_string(),
            api_base: server.uri(),
        })
        .unwrap()
    }

    fn request<'a>(messages: &'a [Message]) -> MessagesRequest<'a> {
        MessagesRequest {
            model: "claude-opus-4-6",
            max_tokens: 64,
            messages,
            system: None,
        }
    }

    #[tokio::test]
    async fn complete_returns_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(
                json!({"model": "claude-opus-4-6", "max_tokens": 64}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "hello"}],
                "stop_reason": "end_turn"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let messages = [Message::user("hi")];
        let text = client_for(&server).complete(&request(&messages)).await.unwrap();

        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn complete_skips_non_text_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                    {"type": "text", "text": "after the tool"}
                ]
            })))
            .mount(&server)
            .await;

        let messages = [Message::user("hi")];
        let text = client_for(&server).complete(&request(&messages)).await.unwrap();

        assert_eq!(text, "after the tool");
    }

    #[tokio::test]
    async fn complete_fails_on_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let messages = [Message::user("hi")];
        let err = client_for(&server).complete(&request(&messages)).await.unwrap_err();

        assert!(matches!(err, AnthropicError::EmptyResponse));
    }

    #[tokio::test]
    async fn complete_surfaces_error_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({"error": {"type": "rate_limit_error"}})),
            )
            .mount(&server)
            .await;

        let messages = [Message::user("hi")];
        let err = client_for(&server).complete(&request(&messages)).await.unwrap_err();

        match err {
            AnthropicError::Status { status, body } => {
                assert_eq!(status.as_u16(), 429);
                assert!(body.contains("rate_limit_error"));
            }
            other => panic!("expected Status error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn system_field_stays_off_the_wire_when_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "ok"}]
            })))
            .mount(&server)
            .await;

        let messages = [Message::user("hi")];
        client_for(&server).complete(&request(&messages)).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("system").is_none());
    }

    #[tokio::test]
    async fn system_field_is_sent_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_partial_json(json!({"system": "be terse"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "ok"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let messages = [Message::user("hi")];
        let request = MessagesRequest {
            model: "claude-opus-4-6",
            max_tokens: 64,
            messages: &messages,
            system: Some("be terse"),
        };

        client_for(&server).complete(&request).await.unwrap();
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let client = AnthropicClient::new(&AnthropicConfig {
            api_key: "k".to_string(),
            api_base: "https://example.test/v1/".to_string(),
        })
        .unwrap();

        assert_eq!(client.messages_url(), "https://example.test/v1/messages");
    }

    #[test]
    fn invalid_api_key_is_rejected_at_construction() {
        let err = AnthropicClient::new(&AnthropicConfig {
            api_key: "bad\nkey".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
        .unwrap_err();

        assert!(matches!(err, AnthropicError::InvalidApiKey));
    }

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(Message::user("a").role, Role::User);
        assert_eq!(Message::assistant("b").role, Role::Assistant);
    }
}
