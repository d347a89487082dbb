//! HybridOrchestrator - answer one chat turn, live if possible, scripted otherwise.
//!
//! Per request, strictly in order:
//!
//! 1. validate the student context (the only error a caller ever sees)
//! 2. try the live provider under a hard timeout, unless it is missing or off
//! 3. fall back to the scripted matcher, attaching a warning
//! 4. if the matcher fails or panics, return a fixed apology
//!
//! The orchestrator holds no per-request state; the caller resubmits the
//! history and current turn every time.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::system_prompt::build_system_prompt;
use crate::domain::dialogue::{
    DialogueMatcher, LanguagePack, Language, MatchOutcome, Phase, Scenario, UserContext,
    START_SENTINEL,
};
use crate::ports::{AIProvider, CompletionRequest, Message, MessageRole, RequestMetadata};

/// Default live-call budget.
pub const DEFAULT_LIVE_TIMEOUT: Duration = Duration::from_secs(5);

const LIVE_MAX_TOKENS: u32 = 300;
const LIVE_TEMPERATURE: f32 = 0.7;

/// Command to answer one chat turn.
#[derive(Debug, Clone)]
pub struct RespondCommand {
    /// Conversation so far, oldest first.
    pub messages: Vec<Message>,
    pub user_context: UserContext,
    pub current_turn: usize,
    pub scenario: Scenario,
    pub language: Language,
    /// `Some(true)` forces a live attempt, `Some(false)` skips it.
    pub force_real_api: Option<bool>,
}

impl RespondCommand {
    /// The most recent thing the student said, or the start sentinel.
    pub fn latest_user_message(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or(START_SENTINEL)
    }
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    #[serde(rename = "openai")]
    OpenAI,
    Fallback,
    Emergency,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Fallback => "fallback",
            Self::Emergency => "emergency",
        }
    }
}

/// Result of answering one chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondResult {
    pub message: String,
    pub source: ResponseSource,
    pub current_turn: usize,
    /// Present for scripted replies only.
    pub phase: Option<Phase>,
    pub warning: Option<String>,
}

/// Request problems reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RespondError {
    #[error("userContext.name is required")]
    MissingName,

    #[error("userContext.courses must list at least one course and no blank entries")]
    MissingCourses,
}

/// Why the scripted path answered instead of the live provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallbackReason {
    Unconfigured,
    Disabled,
    Timeout(Duration),
    LiveError,
}

impl FallbackReason {
    fn warning(&self) -> String {
        match self {
            Self::Unconfigured => "Live replies are not configured; using a scripted reply.".to_string(),
            Self::Disabled => "Live replies are turned off for this request; using a scripted reply.".to_string(),
            Self::Timeout(budget) => format!(
                "Live reply took longer than {}ms; using a scripted reply.",
                budget.as_millis()
            ),
            Self::LiveError => "Live reply failed; using a scripted reply.".to_string(),
        }
    }
}

/// Layered reply policy over a live provider and the scripted matcher.
pub struct HybridOrchestrator {
    live: Option<Arc<dyn AIProvider>>,
    matcher: DialogueMatcher,
    live_timeout: Duration,
    live_enabled: bool,
}

impl HybridOrchestrator {
    /// Creates a fallback-only orchestrator.
    pub fn new(matcher: DialogueMatcher) -> Self {
        Self {
            live: None,
            matcher,
            live_timeout: DEFAULT_LIVE_TIMEOUT,
            live_enabled: true,
        }
    }

    pub fn with_live_provider(mut self, provider: Arc<dyn AIProvider>) -> Self {
        self.live = Some(provider);
        self
    }

    /// Sets the hard budget for one live call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.live_timeout = timeout;
        self
    }

    /// Sets whether live replies are attempted when a request does not say.
    pub fn with_live_enabled(mut self, enabled: bool) -> Self {
        self.live_enabled = enabled;
        self
    }

    /// True if a live provider is wired in.
    pub fn is_live_configured(&self) -> bool {
        self.live.is_some()
    }

    pub async fn respond(&self, cmd: RespondCommand) -> Result<RespondResult, RespondError> {
        validate(&cmd.user_context)?;

        let reason = match (&self.live, cmd.force_real_api.unwrap_or(self.live_enabled)) {
            (None, _) => FallbackReason::Unconfigured,
            (Some(_), false) => FallbackReason::Disabled,
            (Some(provider), true) => match self.try_live(provider.as_ref(), &cmd).await {
                Ok(message) => {
                    let next_turn = cmd.current_turn.saturating_add(1);
                    tracing::info!(source = "openai", turn = next_turn, "live reply");
                    return Ok(RespondResult {
                        message,
                        source: ResponseSource::OpenAI,
                        current_turn: next_turn,
                        phase: None,
                        warning: None,
                    });
                }
                Err(reason) => reason,
            },
        };

        Ok(self.fallback(&cmd, reason))
    }

    async fn try_live(
        &self,
        provider: &dyn AIProvider,
        cmd: &RespondCommand,
    ) -> Result<String, FallbackReason> {
        let trace_id = uuid::Uuid::new_v4().to_string();

        let mut history = cmd.messages.clone();
        if history.is_empty() {
            history.push(Message::user(START_SENTINEL));
        }

        let request = CompletionRequest::new(RequestMetadata::new(trace_id.clone()))
            .with_system_prompt(build_system_prompt(
                &cmd.user_context,
                cmd.scenario,
                cmd.language,
            ))
            .with_messages(history)
            .with_max_tokens(LIVE_MAX_TOKENS)
            .with_temperature(LIVE_TEMPERATURE);

        // Dropping the future on timeout cancels the in-flight request.
        match tokio::time::timeout(self.live_timeout, provider.complete(request)).await {
            Err(_) => {
                tracing::warn!(
                    %trace_id,
                    timeout_ms = self.live_timeout.as_millis() as u64,
                    "live reply timed out"
                );
                Err(FallbackReason::Timeout(self.live_timeout))
            }
            Ok(Err(e)) => {
                tracing::warn!(%trace_id, kind = e.kind(), error = %e, "live reply failed");
                Err(FallbackReason::LiveError)
            }
            Ok(Ok(response)) if response.content.trim().is_empty() => {
                tracing::warn!(%trace_id, "live reply was empty");
                Err(FallbackReason::LiveError)
            }
            Ok(Ok(response)) => {
                tracing::debug!(
                    %trace_id,
                    provider = %provider.provider_info().name,
                    model = %response.model,
                    finish_reason = ?response.finish_reason,
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    "live reply received"
                );
                Ok(response.content)
            }
        }
    }

    fn fallback(&self, cmd: &RespondCommand, reason: FallbackReason) -> RespondResult {
        let utterance = cmd.latest_user_message();

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.matcher.next(
                utterance,
                cmd.current_turn,
                &cmd.user_context,
                cmd.scenario,
                cmd.language,
            )
        }));

        match outcome {
            Ok(Ok(MatchOutcome {
                message,
                next_turn,
                phase,
                step,
            })) => {
                tracing::info!(
                    source = "fallback",
                    step = step.as_str(),
                    turn = next_turn,
                    phase = phase.as_str(),
                    "scripted reply"
                );
                RespondResult {
                    message,
                    source: ResponseSource::Fallback,
                    current_turn: next_turn,
                    phase: Some(phase),
                    warning: Some(reason.warning()),
                }
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "scripted reply failed");
                emergency(cmd)
            }
            Err(_) => {
                tracing::error!("scripted reply panicked");
                emergency(cmd)
            }
        }
    }
}

fn validate(ctx: &UserContext) -> Result<(), RespondError> {
    if ctx.name.trim().is_empty() {
        return Err(RespondError::MissingName);
    }
    if ctx.courses.is_empty() || ctx.courses.iter().any(|c| c.trim().is_empty()) {
        return Err(RespondError::MissingCourses);
    }
    Ok(())
}

fn emergency(cmd: &RespondCommand) -> RespondResult {
    RespondResult {
        message: LanguagePack::for_language(cmd.language).apology.to_string(),
        source: ResponseSource::Emergency,
        current_turn: cmd.current_turn,
        phase: None,
        warning: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::dialogue::{
        ConversationScript, ConversationTurn, Motivation, MotivationClassifier, ScriptRegistry,
    };
    use std::time::Instant;

    fn matcher() -> DialogueMatcher {
        DialogueMatcher::new(Arc::new(ScriptRegistry::builtin().unwrap()))
    }

    fn mina() -> UserContext {
        UserContext::new(
            "Mina",
            vec!["Design Thinking".to_string(), "Statistics".to_string()],
        )
    }

    fn command(utterance: &str, current_turn: usize) -> RespondCommand {
        RespondCommand {
            messages: vec![Message::user(utterance)],
            user_context: mina(),
            current_turn,
            scenario: Scenario::PostSelection,
            language: Language::En,
            force_real_api: None,
        }
    }

    fn with_mock(provider: &MockAIProvider) -> HybridOrchestrator {
        HybridOrchestrator::new(matcher()).with_live_provider(Arc::new(provider.clone()))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Validation
    // ════════════════════════════════════════════════════════════════════════

    mod validation {
        use super::*;

        #[tokio::test]
        async fn missing_name_is_rejected() {
            let mut cmd = command("START", 0);
            cmd.user_context.name = "  ".to_string();
            let err = HybridOrchestrator::new(matcher()).respond(cmd).await.unwrap_err();
            assert_eq!(err, RespondError::MissingName);
        }

        #[tokio::test]
        async fn missing_courses_are_rejected() {
            let mut cmd = command("START", 0);
            cmd.user_context.courses.clear();
            let err = HybridOrchestrator::new(matcher()).respond(cmd).await.unwrap_err();
            assert_eq!(err, RespondError::MissingCourses);
        }

        #[tokio::test]
        async fn blank_course_entry_is_rejected() {
            for courses in [vec!["", "Statistics"], vec!["Design Thinking", "   "]] {
                let mut cmd = command("START", 0);
                cmd.user_context.courses = courses.into_iter().map(String::from).collect();
                let err = HybridOrchestrator::new(matcher()).respond(cmd).await.unwrap_err();
                assert_eq!(err, RespondError::MissingCourses);
            }
        }

        #[tokio::test]
        async fn validation_happens_before_any_live_call() {
            let provider = MockAIProvider::new();
            let mut cmd = command("START", 0);
            cmd.user_context.name.clear();

            assert!(with_mock(&provider).respond(cmd).await.is_err());
            assert_eq!(provider.call_count(), 0);
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Live path
    // ════════════════════════════════════════════════════════════════════════

    mod live {
        use super::*;

        #[tokio::test]
        async fn live_reply_is_returned_verbatim_and_advances_turn() {
            let provider = MockAIProvider::new().with_response("  Hi Mina! Tell me more.  ");
            let result = with_mock(&provider).respond(command("I like art", 2)).await.unwrap();

            assert_eq!(result.source, ResponseSource::OpenAI);
            assert_eq!(result.message, "  Hi Mina! Tell me more.  ");
            assert_eq!(result.current_turn, 3);
            assert_eq!(result.phase, None);
            assert_eq!(result.warning, None);
            assert_eq!(provider.call_count(), 1);
        }

        #[tokio::test]
        async fn live_reply_at_largest_turn_does_not_overflow() {
            let provider = MockAIProvider::new().with_response("hi");
            let result = with_mock(&provider)
                .respond(command("I like art", usize::MAX))
                .await
                .unwrap();

            assert_eq!(result.source, ResponseSource::OpenAI);
            assert_eq!(result.current_turn, usize::MAX);
        }

        #[tokio::test]
        async fn live_request_carries_prompt_and_history() {
            let provider = MockAIProvider::new();
            let mut cmd = command("because I like it", 1);
            cmd.messages.insert(0, Message::assistant("What made you pick these?"));

            with_mock(&provider).respond(cmd).await.unwrap();

            let request = &provider.calls()[0];
            assert!(request.system_prompt.as_deref().unwrap().contains("Mina"));
            assert_eq!(request.messages.len(), 2);
            assert_eq!(request.messages[1].content, "because I like it");
            assert!(!request.metadata.trace_id.is_empty());
        }

        #[tokio::test]
        async fn empty_history_is_sent_as_start() {
            let provider = MockAIProvider::new();
            let mut cmd = command("", 0);
            cmd.messages.clear();

            with_mock(&provider).respond(cmd).await.unwrap();
            assert_eq!(provider.calls()[0].messages, vec![Message::user(START_SENTINEL)]);
        }

        #[tokio::test]
        async fn forced_live_call_overrides_disabled_default() {
            let provider = MockAIProvider::new().with_response("live");
            let orchestrator = with_mock(&provider).with_live_enabled(false);

            let mut cmd = command("START", 0);
            cmd.force_real_api = Some(true);
            let result = orchestrator.respond(cmd).await.unwrap();
            assert_eq!(result.source, ResponseSource::OpenAI);
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Fallback path
    // ════════════════════════════════════════════════════════════════════════

    mod fallback {
        use super::*;

        #[tokio::test]
        async fn unconfigured_provider_always_falls_back() {
            let orchestrator = HybridOrchestrator::new(matcher());
            assert!(!orchestrator.is_live_configured());

            for (utterance, turn) in [("START", 0), ("because I like it", 1), ("zzz", 2)] {
                let mut cmd = command(utterance, turn);
                cmd.force_real_api = Some(true);
                let result = orchestrator.respond(cmd).await.unwrap();
                assert_eq!(result.source, ResponseSource::Fallback);
                assert!(result.warning.unwrap().contains("not configured"));
            }
        }

        #[tokio::test]
        async fn scenario_a_start_mentions_courses() {
            let result = HybridOrchestrator::new(matcher())
                .respond(command("START", 0))
                .await
                .unwrap();

            assert_eq!(result.current_turn, 1);
            assert_eq!(result.phase, Some(Phase::Recap));
            assert!(result.message.contains("Design Thinking"));
            assert!(result.message.contains("Statistics"));
            assert!(result.message.trim_end().ends_with('?'));
        }

        #[tokio::test]
        async fn request_can_opt_out_of_live_call() {
            let provider = MockAIProvider::new();
            let mut cmd = command("START", 0);
            cmd.force_real_api = Some(false);

            let result = with_mock(&provider).respond(cmd).await.unwrap();
            assert_eq!(result.source, ResponseSource::Fallback);
            assert!(result.warning.unwrap().contains("turned off"));
            assert_eq!(provider.call_count(), 0);
        }

        #[tokio::test]
        async fn config_can_disable_live_calls() {
            let provider = MockAIProvider::new();
            let orchestrator = with_mock(&provider).with_live_enabled(false);

            let result = orchestrator.respond(command("START", 0)).await.unwrap();
            assert_eq!(result.source, ResponseSource::Fallback);
            assert_eq!(provider.call_count(), 0);
        }

        #[tokio::test]
        async fn live_error_falls_back_with_warning() {
            let provider = MockAIProvider::new().with_error(MockError::Unavailable);
            let result = with_mock(&provider).respond(command("START", 0)).await.unwrap();

            assert_eq!(result.source, ResponseSource::Fallback);
            assert_eq!(result.current_turn, 1);
            let warning = result.warning.unwrap();
            assert!(warning.contains("failed"));
            assert!(!warning.contains("mock provider down"));
            assert_eq!(provider.call_count(), 1);
        }

        #[tokio::test]
        async fn blank_live_reply_falls_back() {
            let provider = MockAIProvider::new().with_response("   ");
            let result = with_mock(&provider).respond(command("START", 0)).await.unwrap();
            assert_eq!(result.source, ResponseSource::Fallback);
        }

        #[tokio::test]
        async fn hung_provider_resolves_within_budget() {
            let provider = MockAIProvider::hanging();
            let orchestrator = with_mock(&provider).with_timeout(Duration::from_millis(100));

            let started = Instant::now();
            let result = orchestrator.respond(command("START", 0)).await.unwrap();

            assert!(started.elapsed() < Duration::from_secs(2));
            assert_eq!(result.source, ResponseSource::Fallback);
            assert!(result.warning.unwrap().contains("100ms"));
        }

        #[tokio::test]
        async fn latest_user_message_drives_the_matcher() {
            let mut cmd = command("ignored", 1);
            cmd.messages = vec![
                Message::user("START"),
                Message::assistant("What made you pick these courses?"),
                Message::user("because they sound fun"),
                Message::assistant("(typing)"),
            ];
            assert_eq!(cmd.latest_user_message(), "because they sound fun");

            let result = HybridOrchestrator::new(matcher()).respond(cmd).await.unwrap();
            assert_eq!(result.current_turn, 2);
            assert_eq!(result.phase, Some(Phase::Articulation));
        }

        #[tokio::test]
        async fn no_user_message_means_start() {
            let mut cmd = command("", 3);
            cmd.messages = vec![Message::assistant("hello")];
            assert_eq!(cmd.latest_user_message(), START_SENTINEL);

            let result = HybridOrchestrator::new(matcher()).respond(cmd).await.unwrap();
            assert_eq!(result.current_turn, 1);
        }

        #[tokio::test]
        async fn scenario_b_interest_reaches_fit_variant() {
            let classifier = MotivationClassifier::new().with_ambiguous_default(Motivation::Fear);
            let orchestrator = HybridOrchestrator::new(matcher().with_classifier(classifier));

            let result = orchestrator
                .respond(command("I'm really interested in this", 3))
                .await
                .unwrap();

            let fit = (LanguagePack::for_language(Language::En).motivation.fit)(&mina());
            assert_eq!(result.current_turn, 4);
            assert_eq!(result.message, fit);
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Emergency path
    // ════════════════════════════════════════════════════════════════════════

    mod emergency {
        use super::*;

        /// A script whose opening template panics when rendered.
        fn panicking_matcher() -> DialogueMatcher {
            let script = ConversationScript::new(vec![
                ConversationTurn::new(1, Phase::Recap, |_| panic!("template bug"))
                    .with_triggers(&[START_SENTINEL])
                    .expecting(&["yes"]),
                ConversationTurn::new(2, Phase::FitFear, |_| "why?".to_string())
                    .expecting(&["ok"])
                    .as_decision_point(),
                ConversationTurn::new(3, Phase::Closing, |_| "bye".to_string()),
            ])
            .unwrap();
            DialogueMatcher::new(Arc::new(ScriptRegistry::new(Scenario::PostSelection, script)))
        }

        #[tokio::test]
        async fn matcher_panic_becomes_apology() {
            let mut cmd = command("START", 2);
            cmd.language = Language::Ko;
            let result = HybridOrchestrator::new(panicking_matcher())
                .respond(cmd)
                .await
                .unwrap();

            assert_eq!(result.source, ResponseSource::Emergency);
            assert_eq!(result.message, LanguagePack::for_language(Language::Ko).apology);
            assert_eq!(result.current_turn, 2);
            assert_eq!(result.phase, None);
        }

        #[tokio::test]
        async fn apology_follows_request_language() {
            let result = HybridOrchestrator::new(panicking_matcher())
                .respond(command("START", 0))
                .await
                .unwrap();

            assert_eq!(result.source, ResponseSource::Emergency);
            assert_eq!(result.message, LanguagePack::for_language(Language::En).apology);
            assert_ne!(
                LanguagePack::for_language(Language::En).apology,
                LanguagePack::for_language(Language::Ko).apology
            );
        }

        #[tokio::test]
        async fn matcher_keeps_working_after_a_panic() {
            let orchestrator = HybridOrchestrator::new(panicking_matcher());
            orchestrator.respond(command("START", 0)).await.unwrap();

            let result = orchestrator.respond(command("yes", 1)).await.unwrap();
            assert_eq!(result.source, ResponseSource::Fallback);
            assert_eq!(result.current_turn, 2);
        }
    }
}
