//! Fit-versus-fear motivation classifier.
//!
//! Decides whether a stated motivation reads as intrinsic interest ("fit"),
//! extrinsic pressure ("fear"), or both, and renders the matching reply.
//! Detection is by keyword presence, not exclusivity.

use serde::{Deserialize, Serialize};

use super::context::UserContext;
use super::language::Language;
use super::lexicon::{normalize, Lexicon};
use super::script::MessageFn;
use super::scripts::LanguagePack;

/// Which kind of motivation an utterance expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motivation {
    Fit,
    Fear,
    Both,
}

/// Variant used when an utterance carries neither fit nor fear keywords.
pub const DEFAULT_AMBIGUOUS_MOTIVATION: Motivation = Motivation::Fit;

/// Context-parameterized replies, one per motivation variant.
#[derive(Debug, Clone, Copy)]
pub struct MotivationReplies {
    pub fit: MessageFn,
    pub fear: MessageFn,
    pub both: MessageFn,
}

impl MotivationReplies {
    /// Returns the reply renderer for a variant.
    pub fn for_motivation(&self, motivation: Motivation) -> MessageFn {
        match motivation {
            Motivation::Fit => self.fit,
            Motivation::Fear => self.fear,
            Motivation::Both => self.both,
        }
    }
}

/// Classifies motivations using the language's keyword table.
#[derive(Debug, Clone, Copy)]
pub struct MotivationClassifier {
    ambiguous_default: Motivation,
}

impl Default for MotivationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MotivationClassifier {
    /// Creates a classifier with the default ambiguous policy.
    pub fn new() -> Self {
        Self {
            ambiguous_default: DEFAULT_AMBIGUOUS_MOTIVATION,
        }
    }

    /// Overrides the variant used when no keyword matches.
    pub fn with_ambiguous_default(mut self, motivation: Motivation) -> Self {
        self.ambiguous_default = motivation;
        self
    }

    /// Returns the variant used when no keyword matches.
    pub fn ambiguous_default(&self) -> Motivation {
        self.ambiguous_default
    }

    /// Reads the raw keyword signal, `None` when neither family is present.
    pub fn signal(&self, utterance: &str, language: Language) -> Option<Motivation> {
        let lexicon = Lexicon::for_language(language);
        let normalized = normalize(utterance);

        match (lexicon.has_fit(&normalized), lexicon.has_fear(&normalized)) {
            (true, true) => Some(Motivation::Both),
            (true, false) => Some(Motivation::Fit),
            (false, true) => Some(Motivation::Fear),
            (false, false) => None,
        }
    }

    /// Classifies the utterance, applying the ambiguous default.
    pub fn detect(&self, utterance: &str, language: Language) -> Motivation {
        self.signal(utterance, language)
            .unwrap_or(self.ambiguous_default)
    }

    /// Classifies the utterance and renders the matching reply.
    pub fn classify(&self, utterance: &str, ctx: &UserContext, language: Language) -> String {
        let motivation = self.detect(utterance, language);
        let render = LanguagePack::for_language(language)
            .motivation
            .for_motivation(motivation);
        render(ctx)
    }
}
