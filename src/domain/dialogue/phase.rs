//! Coarse stages of a reflection conversation.

use serde::{Deserialize, Serialize};

/// The stage a scripted turn belongs to.
///
/// Phases flow in a fixed order:
/// - `Recap` → `Articulation` → `Patterns` → `FitFear` → `Closing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Restating what the student picked.
    #[default]
    Recap,

    /// Putting reasons for a choice into words.
    Articulation,

    /// Noticing what connects the choices.
    Patterns,

    /// Deciding whether a motivation is interest or pressure.
    FitFear,

    /// Wrapping up the conversation.
    Closing,
}

impl Phase {
    /// Returns the wire name of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recap => "recap",
            Self::Articulation => "articulation",
            Self::Patterns => "patterns",
            Self::FitFear => "fit-fear",
            Self::Closing => "closing",
        }
    }

    /// Returns a short label suitable for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recap => "Recap",
            Self::Articulation => "Putting it into words",
            Self::Patterns => "Finding patterns",
            Self::FitFear => "Fit or fear",
            Self::Closing => "Wrapping up",
        }
    }

    /// Returns true if this is the final phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closing)
    }
}
