//! Scripted conversation turns.
//!
//! A script is the happy-path sequence of bot messages for one scenario and
//! language. Messages are plain functions of the student context; a constant
//! message is simply a function that ignores its argument.

use std::fmt;

use super::context::UserContext;
use super::phase::Phase;

/// Canonical sentinel a client sends to start a conversation.
pub const START_SENTINEL: &str = "START";

/// Renders a bot message for a given student.
pub type MessageFn = fn(&UserContext) -> String;

/// Optional overrides used when the student does not answer directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnAlternatives {
    /// Shown instead of advancing when the reply is vague.
    pub vague: Option<MessageFn>,
    /// Shown when the student asks a question back.
    pub question: Option<MessageFn>,
}

/// One scripted exchange step.
#[derive(Clone)]
pub struct ConversationTurn {
    /// 1-based position within the script.
    pub turn_number: usize,
    pub phase: Phase,
    /// Sentinels that start this turn directly (turn 1 only).
    pub triggers: Vec<&'static str>,
    pub message: MessageFn,
    /// Lowercase substrings anticipated in the reply to this turn.
    pub expected_user_patterns: Vec<&'static str>,
    pub alternatives: TurnAlternatives,
    /// Message for this turn comes from the motivation classifier.
    pub decision_point: bool,
}

impl ConversationTurn {
    /// Creates a turn with no triggers, patterns or alternatives.
    pub fn new(turn_number: usize, phase: Phase, message: MessageFn) -> Self {
        Self {
            turn_number,
            phase,
            triggers: Vec::new(),
            message,
            expected_user_patterns: Vec::new(),
            alternatives: TurnAlternatives::default(),
            decision_point: false,
        }
    }

    /// Sets the start triggers.
    pub fn with_triggers(mut self, triggers: &[&'static str]) -> Self {
        self.triggers = triggers.to_vec();
        self
    }

    /// Sets the expected reply patterns.
    pub fn expecting(mut self, patterns: &[&'static str]) -> Self {
        self.expected_user_patterns = patterns.to_vec();
        self
    }

    /// Sets the vague-reply override.
    pub fn on_vague(mut self, message: MessageFn) -> Self {
        self.alternatives.vague = Some(message);
        self
    }

    /// Sets the question-reply override.
    pub fn on_question(mut self, message: MessageFn) -> Self {
        self.alternatives.question = Some(message);
        self
    }

    /// Flags this turn as the fit/fear decision point.
    pub fn as_decision_point(mut self) -> Self {
        self.decision_point = true;
        self
    }

    /// Renders the template message.
    pub fn render(&self, ctx: &UserContext) -> String {
        (self.message)(ctx)
    }

    /// Returns true if any expected pattern occurs in the normalized reply.
    pub fn expects(&self, normalized: &str) -> bool {
        self.expected_user_patterns
            .iter()
            .any(|pattern| normalized.contains(pattern))
    }

    /// Returns true if the utterance is one of this turn's start triggers.
    pub fn is_triggered_by(&self, utterance: &str) -> bool {
        let trimmed = utterance.trim();
        self.triggers.iter().any(|t| *t == trimmed)
    }
}

impl fmt::Debug for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationTurn")
            .field("turn_number", &self.turn_number)
            .field("phase", &self.phase)
            .field("triggers", &self.triggers)
            .field("expected_user_patterns", &self.expected_user_patterns)
            .field("has_vague", &self.alternatives.vague.is_some())
            .field("has_question", &self.alternatives.question.is_some())
            .field("decision_point", &self.decision_point)
            .finish()
    }
}

/// Ways a script can break its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("script has no turns")]
    Empty,

    #[error("turn 1 is not triggered by the start sentinel")]
    MissingStartTrigger,

    #[error("turn numbers must be contiguous from 1: expected {expected}, found {found}")]
    NonContiguous { expected: usize, found: usize },

    #[error("last turn must be in the closing phase, found {0:?}")]
    TerminalNotClosing(Phase),

    #[error("turn {0} is not terminal but has no expected patterns")]
    MissingPatterns(usize),

    #[error("turn {turn} has a pattern that is not lowercase: {pattern}")]
    PatternNotLowercase { turn: usize, pattern: String },

    #[error("script must have exactly one decision point, found {0}")]
    DecisionPointCount(usize),
}

/// The ordered happy-path turns for one scenario and language.
#[derive(Debug, Clone)]
pub struct ConversationScript {
    turns: Vec<ConversationTurn>,
}

impl ConversationScript {
    /// Creates a script and checks its invariants.
    pub fn new(turns: Vec<ConversationTurn>) -> Result<Self, ScriptError> {
        let script = Self { turns };
        script.validate()?;
        Ok(script)
    }

    /// Checks the structural invariants every script must hold.
    pub fn validate(&self) -> Result<(), ScriptError> {
        let first = self.turns.first().ok_or(ScriptError::Empty)?;
        if !first.is_triggered_by(START_SENTINEL) {
            return Err(ScriptError::MissingStartTrigger);
        }

        for (index, turn) in self.turns.iter().enumerate() {
            let expected = index + 1;
            if turn.turn_number != expected {
                return Err(ScriptError::NonContiguous {
                    expected,
                    found: turn.turn_number,
                });
            }

            let is_last = expected == self.turns.len();
            if !is_last && turn.expected_user_patterns.is_empty() {
                return Err(ScriptError::MissingPatterns(expected));
            }

            if let Some(pattern) = turn
                .expected_user_patterns
                .iter()
                .find(|p| p.to_lowercase() != **p)
            {
                return Err(ScriptError::PatternNotLowercase {
                    turn: expected,
                    pattern: pattern.to_string(),
                });
            }
        }

        if let Some(last) = self.turns.last() {
            if last.phase != Phase::Closing {
                return Err(ScriptError::TerminalNotClosing(last.phase));
            }
        }

        let decision_points = self.turns.iter().filter(|t| t.decision_point).count();
        if decision_points != 1 {
            return Err(ScriptError::DecisionPointCount(decision_points));
        }

        Ok(())
    }

    /// Returns the turn with the given 1-based number.
    pub fn turn(&self, turn_number: usize) -> Option<&ConversationTurn> {
        turn_number
            .checked_sub(1)
            .and_then(|index| self.turns.get(index))
    }

    /// Returns the first turn.
    pub fn first(&self) -> &ConversationTurn {
        // Non-empty is guaranteed by construction.
        &self.turns[0]
    }

    /// Returns all turns in order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false for a validated script.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
