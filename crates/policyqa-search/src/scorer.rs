//! Five-signal lexical scorer for a (query, section) pair.
//!
//! Signals: exact phrase, keyword, amount, procedure, category. Each is
//! computed independently and the total is their sum, so a breakdown can
//! always be audited against its total.

use policyqa_core::{PolicyDocument, Section};
use serde::Serialize;

use crate::config::{ScoringWeights, SearchConfig};
use crate::query::Query;

/// Words that mark a question as asking how to do something.
pub const PROCEDURE_TRIGGERS: &[&str] = &[
    "apply",
    "application",
    "approval",
    "approve",
    "procedure",
    "method",
    "process",
    "신청",
    "승인",
    "절차",
    "방법",
    "과정",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub exact_match: u32,
    pub keyword_match: u32,
    pub amount_match: u32,
    pub procedure_match: u32,
    pub category_bonus: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.exact_match
            + self.keyword_match
            + self.amount_match
            + self.procedure_match
            + self.category_bonus
    }
}

/// Scores sections against a query. Holds only configuration.
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringWeights,
    amount_tolerance: f64,
}

impl Scorer {
    pub fn new(weights: ScoringWeights, amount_tolerance: f64) -> Self {
        Self {
            weights,
            amount_tolerance,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.weights.clone(), config.amount_tolerance)
    }

    pub fn score(
        &self,
        section: &Section,
        document: &PolicyDocument,
        query: &Query,
    ) -> ScoreBreakdown {
        let title = section.title.to_lowercase();
        let content = section.content.to_lowercase();

        ScoreBreakdown {
            exact_match: self.exact_match(&title, &content, query),
            keyword_match: self.keyword_match(section, &title, &content, query),
            amount_match: self.amount_match(&section.amounts, query),
            procedure_match: self.procedure_match(section, query),
            category_bonus: self.category_bonus(document, query),
        }
    }

    fn exact_match(&self, title: &str, content: &str, query: &Query) -> u32 {
        let phrase = query.lower();
        if content.contains(phrase) || title.contains(phrase) {
            self.weights.exact_match
        } else {
            0
        }
    }

    fn keyword_match(&self, section: &Section, title: &str, content: &str, query: &Query) -> u32 {
        let mut points = 0;
        for token in query.tokens() {
            if title.contains(token.as_str()) {
                points += self.weights.title_keyword;
            }
            if content.contains(token.as_str()) {
                points += self.weights.content_keyword;
            }
        }

        // One bonus per tag, however many tokens it contains.
        for tag in &section.keywords {
            let tag = tag.to_lowercase();
            if query.tokens().iter().any(|t| tag.contains(t.as_str())) {
                points += self.weights.keyword_tag;
            }
        }
        points
    }

    fn amount_match(&self, amounts: &[u64], query: &Query) -> u32 {
        if amounts.is_empty() {
            return 0;
        }

        let mut points = 0;
        for &n in query.numbers() {
            if amounts.contains(&n) {
                points += self.weights.exact_amount;
            } else if amounts.iter().any(|&a| self.is_near(a, n)) {
                points += self.weights.near_amount;
            }
        }
        points
    }

    /// Relative difference measured against the section amount. A zero
    /// amount only ever matches exactly.
    fn is_near(&self, amount: u64, n: u64) -> bool {
        if amount == 0 {
            return false;
        }
        let diff = (amount as f64 - n as f64).abs();
        diff / (amount as f64) < self.amount_tolerance
    }

    fn procedure_match(&self, section: &Section, query: &Query) -> u32 {
        if section.has_procedures() && query.contains_any(PROCEDURE_TRIGGERS) {
            self.weights.procedure
        } else {
            0
        }
    }

    fn category_bonus(&self, document: &PolicyDocument, query: &Query) -> u32 {
        let category = document.category.trim().to_lowercase();
        if !category.is_empty() && query.lower().contains(&category) {
            self.weights.category
        } else {
            0
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
