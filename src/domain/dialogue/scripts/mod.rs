//! Built-in conversation scripts and per-language reply packs.
//!
//! Each language module contributes its scripts keyed by scenario plus one
//! `LanguagePack`. Adding a scenario or language is a data change here.

mod en;
mod ko;

use super::classifier::MotivationReplies;
use super::language::{Language, Scenario};
use super::script::{ConversationScript, ScriptError};

/// Per-language replies that sit outside any one script.
#[derive(Debug)]
pub struct LanguagePack {
    /// Closing-phase replies for the fit/fear decision point.
    pub motivation: MotivationReplies,
    /// Pool for replies that match nothing scripted.
    pub generic_replies: &'static [&'static str],
    /// Last-resort apology when even the scripted path fails.
    pub apology: &'static str,
}

impl LanguagePack {
    /// Returns the pack for a language.
    pub fn for_language(language: Language) -> &'static LanguagePack {
        match language {
            Language::Ko => &ko::PACK,
            Language::En => &en::PACK,
        }
    }
}

/// A script together with the key it is registered under.
pub type ScriptEntry = (Scenario, Language, ConversationScript);

/// Builds every built-in script.
pub fn builtin_scripts() -> Result<Vec<ScriptEntry>, ScriptError> {
    let mut entries = Vec::new();
    for (scenario, script) in en::scripts()? {
        entries.push((scenario, Language::En, script));
    }
    for (scenario, script) in ko::scripts()? {
        entries.push((scenario, Language::Ko, script));
    }
    Ok(entries)
}
