//! Live reply provider adapters.
//!
//! - `OpenAIProvider` - OpenAI chat completions
//! - `MockAIProvider` - Scriptable provider for tests

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse, DEFAULT_MOCK_REPLY};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
