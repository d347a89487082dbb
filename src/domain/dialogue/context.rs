//! Student context supplied fresh with every request.

use serde::{Deserialize, Serialize};

use super::language::Language;

/// What the student told the onboarding flow about themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    #[serde(default)]
    pub name: String,
    /// Selected courses, in the order the student listed them.
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Strengths>,
}

/// Strength-finder answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strengths {
    #[serde(default)]
    pub energizers: Vec<String>,
    #[serde(default)]
    pub joys: Vec<String>,
}

impl UserContext {
    /// Creates a context with just a name and course list.
    pub fn new(name: impl Into<String>, courses: Vec<String>) -> Self {
        Self {
            name: name.into(),
            courses,
            ..Default::default()
        }
    }

    /// Sets the interests.
    pub fn with_interests(mut self, interests: Vec<String>) -> Self {
        self.interests = Some(interests);
        self
    }

    /// Sets the keywords.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Sets the strengths.
    pub fn with_strengths(mut self, strengths: Strengths) -> Self {
        self.strengths = Some(strengths);
        self
    }

    /// Returns the first course, or an empty string.
    pub fn first_course(&self) -> &str {
        self.courses.first().map(String::as_str).unwrap_or_default()
    }

    /// Returns the last course, or an empty string.
    pub fn last_course(&self) -> &str {
        self.courses.last().map(String::as_str).unwrap_or_default()
    }

    /// Joins the courses into a natural-language list.
    pub fn course_list(&self, language: Language) -> String {
        join_natural(&self.courses, language)
    }

    /// Returns what the student is interested in.
    ///
    /// Interests win over keywords, keywords over strength joys.
    pub fn interest_terms(&self) -> &[String] {
        [self.interests.as_deref(), self.keywords.as_deref()]
            .into_iter()
            .flatten()
            .find(|terms| !terms.is_empty())
            .or_else(|| self.strengths.as_ref().map(|s| s.joys.as_slice()))
            .unwrap_or_default()
    }

    /// Joins the interest terms into a natural-language list.
    pub fn interest_list(&self, language: Language) -> Option<String> {
        let terms = self.interest_terms();
        (!terms.is_empty()).then(|| join_natural(terms, language))
    }
}

fn join_natural(items: &[String], language: Language) -> String {
    match language {
        Language::Ko => items.join(", "),
        Language::En => match items {
            [] => String::new(),
            [only] => only.clone(),
            [init @ .., last] => format!("{} and {}", init.join(", "), last),
        },
    }
}
