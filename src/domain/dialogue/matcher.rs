//! Deterministic scripted dialogue matcher.
//!
//! Maps a student's reply and the current turn to the next bot message.
//! The steps below are tried in a fixed order and the first one that
//! applies wins:
//!
//! 1. start sentinel or turn 0 restarts at turn 1
//! 2. a turn past the end of the script gets a generic reply
//! 3. an expected pattern advances to the next turn
//! 4. a hedged reply gets the turn's vague alternative
//! 5. a question gets the turn's question alternative
//! 6. a pattern of one of the next three turns jumps to that turn
//! 7. anything else gets a generic reply
//!
//! The matcher is pure apart from the random choice in step 7.

use std::sync::Arc;

use rand::seq::SliceRandom;

use super::classifier::MotivationClassifier;
use super::context::UserContext;
use super::language::{Language, Scenario};
use super::lexicon::{normalize, Lexicon};
use super::phase::Phase;
use super::registry::ScriptRegistry;
use super::script::{ConversationScript, ConversationTurn, MessageFn, START_SENTINEL};
use super::scripts::LanguagePack;

/// How many turns past the next one the lookahead scans.
const LOOKAHEAD_SPAN: usize = 3;

/// Which matching step produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    Start,
    OutOfBounds,
    Advance,
    Vague,
    Question,
    Lookahead,
    Generic,
}

impl MatchStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::OutOfBounds => "out_of_bounds",
            Self::Advance => "advance",
            Self::Vague => "vague",
            Self::Question => "question",
            Self::Lookahead => "lookahead",
            Self::Generic => "generic",
        }
    }
}

/// The matcher's answer for one student reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub message: String,
    pub next_turn: usize,
    pub phase: Phase,
    pub step: MatchStep,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    #[error("generic reply pool for {0} is empty")]
    EmptyReplyPool(Language),
}

/// Scripted fallback dialogue driver.
#[derive(Debug, Clone)]
pub struct DialogueMatcher {
    registry: Arc<ScriptRegistry>,
    classifier: MotivationClassifier,
}

impl DialogueMatcher {
    pub fn new(registry: Arc<ScriptRegistry>) -> Self {
        Self {
            registry,
            classifier: MotivationClassifier::default(),
        }
    }

    /// Replaces the motivation classifier.
    pub fn with_classifier(mut self, classifier: MotivationClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    /// Computes the next bot message.
    pub fn next(
        &self,
        utterance: &str,
        current_turn: usize,
        ctx: &UserContext,
        scenario: Scenario,
        language: Language,
    ) -> Result<MatchOutcome, MatcherError> {
        let script = self.registry.lookup(scenario, language);

        // 1. Start
        let first = script.first();
        if current_turn == 0 || utterance.trim() == START_SENTINEL || first.is_triggered_by(utterance)
        {
            return Ok(self.land_on(first, utterance, ctx, language, MatchStep::Start));
        }

        // 2. Bounds
        let Some(turn) = script.turn(current_turn) else {
            return Ok(MatchOutcome {
                message: generic_reply(language)?,
                next_turn: current_turn,
                phase: Phase::Closing,
                step: MatchStep::OutOfBounds,
            });
        };

        let normalized = normalize(utterance);
        let lexicon = Lexicon::for_language(language);

        // 3. Exact advance
        if turn.expects(&normalized) {
            if let Some(target) = script.turn(current_turn + 1) {
                return Ok(self.land_on(target, utterance, ctx, language, MatchStep::Advance));
            }
        }

        // 4. Vague
        if let Some(vague) = turn.alternatives.vague {
            if lexicon.is_vague(&normalized) {
                return Ok(stay(turn, vague, ctx, MatchStep::Vague));
            }
        }

        // 5. Question
        if let Some(question) = turn.alternatives.question {
            if lexicon.is_question(&normalized) {
                return Ok(stay(turn, question, ctx, MatchStep::Question));
            }
        }

        // 6. Lookahead
        if let Some(target) = lookahead(script, current_turn, &normalized) {
            return Ok(self.land_on(target, utterance, ctx, language, MatchStep::Lookahead));
        }

        // 7. Generic
        Ok(MatchOutcome {
            message: generic_reply(language)?,
            next_turn: current_turn,
            phase: turn.phase,
            step: MatchStep::Generic,
        })
    }

    /// Moves the conversation onto `target` and renders its message.
    ///
    /// The decision-point turn is always voiced by the classifier.
    fn land_on(
        &self,
        target: &ConversationTurn,
        utterance: &str,
        ctx: &UserContext,
        language: Language,
        step: MatchStep,
    ) -> MatchOutcome {
        let message = if target.decision_point {
            self.classifier.classify(utterance, ctx, language)
        } else {
            target.render(ctx)
        };

        MatchOutcome {
            message,
            next_turn: target.turn_number,
            phase: target.phase,
            step,
        }
    }
}

fn stay(turn: &ConversationTurn, render: MessageFn, ctx: &UserContext, step: MatchStep) -> MatchOutcome {
    MatchOutcome {
        message: render(ctx),
        next_turn: turn.turn_number,
        phase: turn.phase,
        step,
    }
}

fn lookahead<'a>(
    script: &'a ConversationScript,
    current_turn: usize,
    normalized: &str,
) -> Option<&'a ConversationTurn> {
    (current_turn + 1..=current_turn + LOOKAHEAD_SPAN)
        .map_while(|n| script.turn(n))
        .find(|turn| turn.expects(normalized))
}

fn generic_reply(language: Language) -> Result<String, MatcherError> {
    LanguagePack::for_language(language)
        .generic_replies
        .choose(&mut rand::thread_rng())
        .map(|reply| reply.to_string())
        .ok_or(MatcherError::EmptyReplyPool(language))
}
