//! Scriptable stand-in for the live reply provider.
//!
//! Lets orchestrator and HTTP tests drive the live path deterministically:
//! queue replies or failures, make the provider slow or hang outright, and
//! inspect the requests it received.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Hi Mina! What made you pick Statistics?")
//!     .with_error(MockError::Unavailable);
//!
//! let hung = MockAIProvider::hanging();
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Reply used once the queue is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "Mock response";

/// Long enough that any orchestrator budget expires first.
const HANG: Duration = Duration::from_secs(3600);

/// Queued outcome for one call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Reply(String),
    Error(MockError),
}

/// Failures the mock can inject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    RateLimited,
    Unavailable,
    AuthenticationFailed,
    Network,
    Timeout,
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited => AIError::rate_limited(1),
            MockError::Unavailable => AIError::unavailable("mock provider down"),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network => AIError::network("mock connection reset"),
            MockError::Timeout => AIError::Timeout { timeout_ms: 1 },
        }
    }
}

/// In-memory provider with queued outcomes.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    queue: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
    info: ProviderInfo,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            queue: Arc::default(),
            calls: Arc::default(),
            delay: Duration::ZERO,
            info: ProviderInfo::new("mock", "mock-model"),
        }
    }

    /// A provider that never answers within any realistic budget.
    pub fn hanging() -> Self {
        Self::new().with_delay(HANG)
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.queue).push_back(MockResponse::Reply(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.queue).push_back(MockResponse::Error(error));
        self
    }

    /// Sleeps this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns the requests received so far.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.queue)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Reply(DEFAULT_MOCK_REPLY.to_string()))
    }
}

// A panicking test thread must not wedge every later assertion.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Reply(content) => Ok(CompletionResponse {
                usage: TokenUsage::new(10, content.len() as u32 / 4),
                content,
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
