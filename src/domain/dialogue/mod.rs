//! Scripted dialogue engine.
//!
//! Pure, synchronous building blocks of the fallback conversation: the
//! script data and registry, the keyword lexicon, the motivation classifier
//! and the matcher that drives a conversation one reply at a time.

mod classifier;
mod context;
mod language;
mod lexicon;
mod matcher;
mod phase;
mod registry;
mod script;
mod scripts;

pub use classifier::{
    Motivation, MotivationClassifier, MotivationReplies, DEFAULT_AMBIGUOUS_MOTIVATION,
};
pub use context::{Strengths, UserContext};
pub use language::{Language, Scenario, UnknownLanguage, UnknownScenario};
pub use lexicon::{normalize, Lexicon, WhMatch};
pub use matcher::{DialogueMatcher, MatchOutcome, MatchStep, MatcherError};
pub use phase::Phase;
pub use registry::{RegistryError, ScriptRegistry};
pub use script::{
    ConversationScript, ConversationTurn, MessageFn, ScriptError, TurnAlternatives,
    START_SENTINEL,
};
pub use scripts::{builtin_scripts, LanguagePack, ScriptEntry};
