//! Scripted dialogue configuration

use serde::Deserialize;

use crate::domain::dialogue::{Motivation, DEFAULT_AMBIGUOUS_MOTIVATION};

/// Scripted dialogue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Motivation assumed when a decision-point reply shows no clear signal
    #[serde(default = "default_ambiguous_motivation")]
    pub ambiguous_motivation: Motivation,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            ambiguous_motivation: default_ambiguous_motivation(),
        }
    }
}

fn default_ambiguous_motivation() -> Motivation {
    DEFAULT_AMBIGUOUS_MOTIVATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fit() {
        assert_eq!(DialogueConfig::default().ambiguous_motivation, Motivation::Fit);
    }
}
