//! Script registry keyed by (scenario, language).
//!
//! Lookups never fail: a missing scenario falls back to the language's
//! general script, and a missing language falls back to the last-resort
//! script the registry was built with.

use std::collections::HashMap;

use super::language::{Language, Scenario};
use super::script::{ConversationScript, ScriptError};
use super::scripts::builtin_scripts;

/// Errors raised while assembling a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid script: {0}")]
    Script(#[from] ScriptError),

    #[error("no {scenario} script registered for {language}")]
    MissingDefault {
        scenario: Scenario,
        language: Language,
    },
}

/// Two-key lookup table of conversation scripts.
#[derive(Debug, Clone)]
pub struct ScriptRegistry {
    scripts: HashMap<(Scenario, Language), ConversationScript>,
    default_scenario: Scenario,
    last_resort: ConversationScript,
}

impl ScriptRegistry {
    /// Creates an empty registry.
    ///
    /// `last_resort` answers lookups for languages that have no general
    /// script registered.
    pub fn new(default_scenario: Scenario, last_resort: ConversationScript) -> Self {
        Self {
            scripts: HashMap::new(),
            default_scenario,
            last_resort,
        }
    }

    /// Builds the registry from the built-in script data.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut scripts = HashMap::new();
        for (scenario, language, script) in builtin_scripts()? {
            scripts.insert((scenario, language), script);
        }

        let default_scenario = Scenario::default();
        for language in Language::all() {
            if !scripts.contains_key(&(default_scenario, *language)) {
                return Err(RegistryError::MissingDefault {
                    scenario: default_scenario,
                    language: *language,
                });
            }
        }

        let last_resort = scripts
            .get(&(default_scenario, Language::default()))
            .cloned()
            .ok_or(RegistryError::MissingDefault {
                scenario: default_scenario,
                language: Language::default(),
            })?;

        Ok(Self {
            scripts,
            default_scenario,
            last_resort,
        })
    }

    /// Registers a script, replacing any existing one under the same key.
    ///
    /// Scripts are validated when they are constructed, so registration
    /// itself cannot fail.
    pub fn register(&mut self, scenario: Scenario, language: Language, script: ConversationScript) {
        self.scripts.insert((scenario, language), script);
    }

    /// Returns the script for a scenario and language.
    pub fn lookup(&self, scenario: Scenario, language: Language) -> &ConversationScript {
        self.scripts
            .get(&(scenario, language))
            .or_else(|| self.scripts.get(&(self.default_scenario, language)))
            .unwrap_or(&self.last_resort)
    }

    /// True if a script is registered under exactly this key.
    pub fn has_script(&self, scenario: Scenario, language: Language) -> bool {
        self.scripts.contains_key(&(scenario, language))
    }

    /// Returns the scenario used when a language lacks the requested one.
    pub fn default_scenario(&self) -> Scenario {
        self.default_scenario
    }

    /// Returns the number of registered scripts.
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}
