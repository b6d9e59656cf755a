//! Picks the answer template from fixed trigger phrases in the question.
//!
//! Rules are evaluated top to bottom and the first hit wins, so a question
//! like "what is the approval process for the cost limit" is answered as a
//! limit question.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerTemplate {
    /// State the cap that applies.
    Limit,
    /// Walk through the procedure steps.
    Procedure,
    /// State the amounts that apply.
    Amount,
    /// Quote the section with its important parts emphasised.
    Highlight,
}

/// One entry of the ordered classification chain.
pub struct IntentRule {
    pub template: AnswerTemplate,
    /// Phrases matched anywhere in the question.
    pub triggers: &'static [&'static str],
    /// Words matched only as whole words.
    pub words: &'static [&'static str],
}

impl IntentRule {
    /// `query_lower` must already be lowercased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.triggers.iter().any(|t| query_lower.contains(t))
            || query_lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|w| self.words.contains(&w))
    }
}

pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        template: AnswerTemplate::Limit,
        triggers: &["limit", "maximum", "ceiling", "상한", "한도"],
        words: &["cap", "caps", "capped"],
    },
    IntentRule {
        template: AnswerTemplate::Procedure,
        triggers: &[
            "procedure",
            "process",
            "method",
            "how do i",
            "how to",
            "steps",
            "절차",
            "방법",
        ],
        words: &[],
    },
    IntentRule {
        template: AnswerTemplate::Amount,
        triggers: &["how much", "amount", "cost", "price", "얼마", "금액"],
        words: &[],
    },
];

pub fn classify(query: &str) -> AnswerTemplate {
    let lower = query.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.template)
        .unwrap_or(AnswerTemplate::Highlight)
}
