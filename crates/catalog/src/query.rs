//! Search queries
//!
//! A query is what the search box holds: free text plus an optional
//! `grade:<n>` token that narrows results to one school grade.

use std::fmt;

/// A parsed search-box value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free text, trimmed, words separated by single spaces
    pub text: String,
    pub grade: Option<u8>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, grade: Option<u8>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            grade,
        }
    }

    /// Parse raw search-box input
    ///
    /// `grade:<n>` sets the grade filter when `<n>` is a number; otherwise the
    /// token is kept as text. The last valid grade token wins.
    pub fn parse(input: &str) -> Self {
        let mut words = Vec::new();
        let mut grade = None;

        for token in input.split_whitespace() {
            match token
                .strip_prefix("grade:")
                .and_then(|value| value.parse::<u8>().ok())
            {
                Some(value) => grade = Some(value),
                None => words.push(token),
            }
        }

        Self {
            text: words.join(" "),
            grade,
        }
    }

    /// Apply a default grade when the input did not name one
    pub fn with_default_grade(mut self, grade: Option<u8>) -> Self {
        if self.grade.is_none() {
            self.grade = grade;
        }
        self
    }

    /// Lowercased text used for matching
    pub fn needle(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.grade.is_none()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.text.is_empty(), self.grade) {
            (true, None) => write!(f, "<all>"),
            (true, Some(grade)) => write!(f, "grade:{}", grade),
            (false, None) => write!(f, "{}", self.text),
            (false, Some(grade)) => write!(f, "{} grade:{}", self.text, grade),
        }
    }
}
