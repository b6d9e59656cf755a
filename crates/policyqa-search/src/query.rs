//! Query normalisation shared by every scoring signal.

use std::sync::LazyLock;

use regex::Regex;

use crate::SearchError;

static RE_INTEGER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[0-9]+").ok());

/// A user question prepared for scoring.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    lower: String,
    tokens: Vec<String>,
    numbers: Vec<u64>,
}

impl Query {
    /// Normalise `raw`. Blank input is rejected.
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let lower = trimmed.to_lowercase();
        let tokens = lower
            .split_whitespace()
            .filter(|w| w.chars().count() > 1)
            .map(str::to_string)
            .collect();

        let re = RE_INTEGER
            .as_ref()
            .ok_or(SearchError::PatternUnavailable("integer"))?;
        // Digit runs too long for u64 cannot equal any section amount.
        let numbers = re
            .find_iter(raw)
            .filter_map(|m| m.as_str().parse::<u64>().ok())
            .collect();

        Ok(Self {
            raw: raw.to_string(),
            lower,
            tokens,
            numbers,
        })
    }

    /// The question as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed, lowercased question.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Whitespace-separated words longer than one character.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Integer literals in the raw question, in order of appearance.
    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.lower.contains(p))
    }
}
