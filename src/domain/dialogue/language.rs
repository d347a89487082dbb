//! Conversation language and scenario keys.
//!
//! Together these two values select which scripted conversation applies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the conversation is held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    #[default]
    En,
}

impl Language {
    /// Returns all supported languages.
    pub fn all() -> &'static [Language] {
        &[Language::Ko, Language::En]
    }

    /// Returns the wire code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a language code is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0} (expected \"ko\" or \"en\")")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" => Ok(Self::Ko),
            "en" => Ok(Self::En),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Named conversational context selecting which script applies.
///
/// Post-selection is the general scenario every language must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Student is still choosing courses.
    PreSelection,
    /// Student has already picked their courses.
    #[default]
    PostSelection,
    /// Student is thinking about changing a course they picked.
    Reconsidering,
}

impl Scenario {
    /// Returns all known scenarios.
    pub fn all() -> &'static [Scenario] {
        &[
            Scenario::PreSelection,
            Scenario::PostSelection,
            Scenario::Reconsidering,
        ]
    }

    /// Resolves an optional, loosely formatted scenario name.
    ///
    /// Missing or unrecognised names resolve to the general scenario.
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PreSelection => "pre-selection",
            Self::PostSelection => "post-selection",
            Self::Reconsidering => "reconsidering",
        };
        f.write_str(name)
    }
}

/// Error returned when a scenario name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept kebab, snake and camel spellings alike.
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "preselection" | "pre" => Ok(Self::PreSelection),
            "postselection" | "post" | "general" | "default" => Ok(Self::PostSelection),
            "reconsidering" | "reconsider" => Ok(Self::Reconsidering),
            _ => Err(UnknownScenario(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Ko).unwrap(), "\"ko\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(serde_json::from_str::<Language>("\"fr\"").is_err());
        assert_eq!(
            "fr".parse::<Language>().unwrap_err(),
            UnknownLanguage("fr".to_string())
        );
    }

    #[test]
    fn language_parses_codes_case_insensitively() {
        assert_eq!(" KO ".parse::<Language>().unwrap(), Language::Ko);
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
    }

    #[test]
    fn scenario_parses_common_spellings() {
        assert_eq!("pre-selection".parse::<Scenario>().unwrap(), Scenario::PreSelection);
        assert_eq!("pre_selection".parse::<Scenario>().unwrap(), Scenario::PreSelection);
        assert_eq!("postSelection".parse::<Scenario>().unwrap(), Scenario::PostSelection);
        assert_eq!("Reconsidering".parse::<Scenario>().unwrap(), Scenario::Reconsidering);
    }

    #[test]
    fn scenario_resolve_defaults_to_general() {
        assert_eq!(Scenario::resolve(None), Scenario::PostSelection);
        assert_eq!(Scenario::resolve(Some("mystery")), Scenario::PostSelection);
        assert_eq!(Scenario::resolve(Some("reconsidering")), Scenario::Reconsidering);
    }

    #[test]
    fn scenario_display_round_trips_through_parse() {
        for scenario in Scenario::all() {
            assert_eq!(scenario.to_string().parse::<Scenario>().unwrap(), *scenario);
        }
    }
}
