//! Tunable constants for scoring and answer synthesis.

/// Points awarded per scoring signal.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    /// Whole query found verbatim in the section title or content.
    pub exact_match: u32,
    pub title_keyword: u32,
    pub content_keyword: u32,
    /// Per keyword tag containing a query token.
    pub keyword_tag: u32,
    pub exact_amount: u32,
    /// Query number within the tolerance band of a section amount.
    pub near_amount: u32,
    pub procedure: u32,
    pub category: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_match: 15,
            title_keyword: 8,
            content_keyword: 5,
            keyword_tag: 6,
            exact_amount: 10,
            near_amount: 5,
            procedure: 8,
            category: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub weights: ScoringWeights,
    /// Sections scoring below this are dropped.
    pub min_score: u32,
    pub max_results: usize,
    /// Relative difference (exclusive) that still counts as a near amount.
    pub amount_tolerance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            min_score: 5,
            max_results: 10,
            amount_tolerance: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerConfig {
    /// Score treated as 100% confidence.
    pub max_expected_score: u32,
    /// Lowest confidence reported for a result-backed answer.
    pub confidence_floor: u8,
    pub currency_unit: String,
    pub day_unit: String,
    /// How many runner-up results to attach to an answer.
    pub supplementary_results: usize,
    /// Who to escalate to when no regulation matches.
    pub escalation_contact: String,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            max_expected_score: 50,
            confidence_floor: 30,
            currency_unit: "won".to_string(),
            day_unit: "days".to_string(),
            supplementary_results: 2,
            escalation_contact: "HR team".to_string(),
        }
    }
}
