//! OpenAI chat-completions adapter for the live reply port.
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! Each `complete` call issues exactly one POST. Failures are returned as-is;
//! the orchestrator falls back to its scripts instead of retrying.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Seconds to wait after a 429 when the body gives no hint.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Connection settings for the OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Per-request HTTP timeout; the orchestrator's own budget is usually tighter.
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Live reply provider backed by OpenAI.
#[derive(Debug)]
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Builds the provider and its HTTP client.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_wire(&self, request: &CompletionRequest) -> ChatRequest {
        let system = request
            .system_prompt
            .iter()
            .map(|prompt| WireMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });

        let history = request.messages.iter().map(|msg| WireMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        });

        ChatRequest {
            model: self.config.model.clone(),
            messages: system.chain(history).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_wire(request))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = check_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("failed to parse response: {e}")))?;

        into_completion(body)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            AIError::network(format!("connection failed: {e}"))
        } else {
            AIError::network(e.to_string())
        }
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.attempt(&request).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

/// Maps a non-2xx response onto a typed error.
async fn check_status(response: Response) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(&body)),
        400 if body.contains("context_length_exceeded")
            || body.contains("maximum context length") =>
        {
            AIError::ContextTooLong(body)
        }
        400 => AIError::InvalidRequest(body),
        500..=599 => AIError::unavailable(format!("server error {status}: {body}")),
        _ => AIError::network(format!("unexpected status {status}: {body}")),
    }
}

/// Extracts "try again in Ns" from an error body.
fn parse_retry_after(body: &str) -> u32 {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| {
            let message = envelope.error.message;
            let rest = message.split("try again in ").nth(1)?;
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn into_completion(body: ChatResponse) -> Result<CompletionResponse, AIError> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("no choices in response"))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    let content = choice.message.content.unwrap_or_default();
    if content.trim().is_empty() {
        return Err(if finish_reason == FinishReason::ContentFilter {
            AIError::content_filtered("completion withheld by provider")
        } else {
            AIError::EmptyCompletion
        });
    }

    Ok(CompletionResponse {
        content,
        usage: body
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default(),
        model: body.model,
        finish_reason,
    })
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Message, MessageRole, RequestMetadata};

    fn provider() -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("sk-test")).unwrap()
    }

    #[test]
    fn config_defaults_suit_a_short_budget() {
        let config = OpenAIConfig::new("sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key(), "sk-test");
    }

    #[test]
    fn config_builder_overrides() {
        let config = OpenAIConfig::new("k")
            .with_model("gpt-4o")
            .with_base_url("http://localhost:8080/v1/")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.timeout, Duration::from_secs(3));

        let provider = OpenAIProvider::new(config).unwrap();
        assert_eq!(provider.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let rendered = format!("{:?}", OpenAIConfig::new("sk-very-secret"));
        assert!(!rendered.contains("sk-very-secret"));
    }

    #[test]
    fn wire_request_puts_system_prompt_first() {
        let request = CompletionRequest::new(RequestMetadata::new("t"))
            .with_system_prompt("You are a coach")
            .with_messages(vec![Message::user("START"), Message::assistant("Hi!")])
            .with_max_tokens(200);

        let wire = provider().to_wire(&request);
        let roles: Vec<_> = wire.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["system", "user", "assistant"]);
        assert_eq!(wire.messages[0].content, "You are a coach");
        assert_eq!(wire.max_tokens, Some(200));

        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn wire_request_without_system_prompt() {
        let request = CompletionRequest::default().with_message(MessageRole::User, "hello");
        let wire = provider().to_wire(&request);
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
    }

    #[test]
    fn statuses_map_to_typed_errors() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, String::new()),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            AIError::RateLimited { retry_after_secs: 30 }
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "context_length_exceeded".into()),
            AIError::ContextTooLong(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "bad field".into()),
            AIError::InvalidRequest(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, String::new()),
            AIError::Unavailable { .. }
        ));
    }

    #[test]
    fn retry_after_is_read_from_message() {
        let body = r#"{"error":{"message":"Rate limit reached. Please try again in 7s."}}"#;
        assert_eq!(parse_retry_after(body), 7);
        assert_eq!(parse_retry_after("not json"), DEFAULT_RETRY_AFTER_SECS);
    }

    #[test]
    fn completion_is_parsed_from_first_choice() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"model":"gpt-4o-mini","choices":[{"message":{"role":"assistant","content":"Hi Mina!"},"finish_reason":"stop"}],"usage":{"prompt_tokens":50,"completion_tokens":4}}"#,
        )
        .unwrap();

        let completion = into_completion(body).unwrap();
        assert_eq!(completion.content, "Hi Mina!");
        assert_eq!(completion.usage.total_tokens, 54);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn blank_completion_is_an_error() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"model":"m","choices":[{"message":{"content":"  "},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert!(matches!(into_completion(body), Err(AIError::EmptyCompletion)));

        let body: ChatResponse = serde_json::from_str(r#"{"model":"m","choices":[]}"#).unwrap();
        assert!(matches!(into_completion(body), Err(AIError::Parse(_))));
    }

    #[test]
    fn provider_info_names_the_model() {
        let info = provider().provider_info();
        assert_eq!(info, ProviderInfo::new("openai", DEFAULT_MODEL));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Against a local stand-in server
    // ════════════════════════════════════════════════════════════════════════

    mod outbound {
        use super::*;
        use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        /// Serves `/v1/chat/completions` with a fixed reply and counts hits.
        async fn serve(status: AxumStatus, body: serde_json::Value) -> (String, Arc<AtomicUsize>) {
            let hits = Arc::new(AtomicUsize::new(0));
            let counter = hits.clone();
            let app = Router::new().route(
                "/v1/chat/completions",
                post(move || {
                    let counter = counter.clone();
                    let body = body.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        (status, Json(body))
                    }
                }),
            );

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            (format!("http://{addr}/v1"), hits)
        }

        fn request() -> CompletionRequest {
            CompletionRequest::new(RequestMetadata::new("trace-1"))
                .with_message(MessageRole::User, "START")
        }

        #[tokio::test]
        async fn server_error_is_returned_after_a_single_call() {
            let (base_url, hits) = serve(
                AxumStatus::SERVICE_UNAVAILABLE,
                serde_json::json!({"error": {"message": "overloaded"}}),
            )
            .await;
            let provider =
                OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(base_url)).unwrap();

            let err = provider.complete(request()).await.unwrap_err();
            assert!(matches!(err, AIError::Unavailable { .. }));
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn rate_limit_is_returned_after_a_single_call() {
            let (base_url, hits) = serve(
                AxumStatus::TOO_MANY_REQUESTS,
                serde_json::json!({"error": {"message": "Please try again in 2s."}}),
            )
            .await;
            let provider =
                OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(base_url)).unwrap();

            let err = provider.complete(request()).await.unwrap_err();
            assert!(matches!(err, AIError::RateLimited { retry_after_secs: 2 }));
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn success_reads_content_and_usage() {
            let (base_url, hits) = serve(
                AxumStatus::OK,
                serde_json::json!({
                    "model": "gpt-4o-mini",
                    "choices": [{"message": {"content": "Hi Mina!"}, "finish_reason": "stop"}],
                    "usage": {"prompt_tokens": 12, "completion_tokens": 3}
                }),
            )
            .await;
            let provider =
                OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(base_url)).unwrap();

            let completion = provider.complete(request()).await.unwrap();
            assert_eq!(completion.content, "Hi Mina!");
            assert_eq!(completion.usage.total_tokens, 15);
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }
    }
}
