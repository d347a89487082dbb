//! Per-language keyword tables.
//!
//! One row per language; every keyword-driven decision in the engine reads
//! from here instead of branching on language inline.

use super::language::Language;

/// Keyword families for one language.
#[derive(Debug)]
pub struct Lexicon {
    /// Interest, curiosity, enjoyment, wanting to learn.
    pub fit_words: &'static [&'static str],
    /// Necessity, anxiety, obligation, falling behind.
    pub fear_words: &'static [&'static str],
    /// Markers of an uncertain reply.
    pub hedge_words: &'static [&'static str],
    /// Question words.
    pub wh_words: &'static [&'static str],
    /// How a token is compared against `wh_words`.
    pub wh_match: WhMatch,
}

/// Token comparison for question words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhMatch {
    /// The token must equal the question word ("what" but not "whatever").
    WholeToken,
    /// The token must start with the question word, leaving room for
    /// attached particles and endings ("왜요", "뭐예요").
    Prefix,
}

impl WhMatch {
    fn matches(self, token: &str, wh: &str) -> bool {
        match self {
            WhMatch::WholeToken => token == wh,
            WhMatch::Prefix => token.starts_with(wh),
        }
    }
}

static EN: Lexicon = Lexicon {
    fit_words: &[
        "interest",
        "curious",
        "fun",
        "enjoy",
        "love",
        "like",
        "excit",
        "passion",
        "fascinat",
        "want to learn",
        "cool",
    ],
    fear_words: &[
        "need",
        "have to",
        "must",
        "required",
        "requirement",
        "worry",
        "worried",
        "afraid",
        "anxious",
        "scared",
        "behind",
        "pressure",
        "should",
        "supposed to",
        "parents",
    ],
    hedge_words: &[
        "not sure",
        "don't know",
        "dont know",
        "maybe",
        "no idea",
        "i guess",
        "kind of",
        "kinda",
        "unsure",
        "idk",
        "hard to say",
    ],
    wh_words: &["what", "why", "how", "which", "who", "when", "where"],
    wh_match: WhMatch::WholeToken,
};

static KO: Lexicon = Lexicon {
    fit_words: &[
        "재미",
        "흥미",
        "관심",
        "좋아",
        "궁금",
        "배우고 싶",
        "즐거",
        "신나",
        "설레",
    ],
    fear_words: &[
        "필요",
        "해야",
        "걱정",
        "불안",
        "뒤처",
        "의무",
        "압박",
        "무서",
        "필수",
        "부모님",
    ],
    hedge_words: &[
        "모르겠",
        "글쎄",
        "아마",
        "잘 모르",
        "확실하지",
        "그냥",
        "애매",
    ],
    wh_words: &["뭐", "무엇", "왜", "어떻게", "어떤", "언제", "어디", "누구"],
    wh_match: WhMatch::Prefix,
};

impl Lexicon {
    /// Returns the table row for a language.
    pub fn for_language(language: Language) -> &'static Lexicon {
        match language {
            Language::Ko => &KO,
            Language::En => &EN,
        }
    }

    /// True if the normalized text contains a fit keyword.
    pub fn has_fit(&self, normalized: &str) -> bool {
        contains_any(normalized, self.fit_words)
    }

    /// True if the normalized text contains a fear keyword.
    pub fn has_fear(&self, normalized: &str) -> bool {
        contains_any(normalized, self.fear_words)
    }

    /// True if the normalized text hedges.
    pub fn is_vague(&self, normalized: &str) -> bool {
        contains_any(normalized, self.hedge_words)
    }

    /// True if the text asks a question back.
    pub fn is_question(&self, normalized: &str) -> bool {
        if normalized.contains(&['?', '？'][..]) {
            return true;
        }
        normalized
            .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation() || c == '’')
            .filter(|token| !token.is_empty())
            .any(|token| self.wh_words.iter().any(|wh| self.wh_match.matches(token, wh)))
    }
}

/// Lowercases and trims an utterance for matching.
pub fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
