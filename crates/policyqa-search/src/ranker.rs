//! Category filter, score cutoff, ordering, and truncation.

use policyqa_core::{CategoryFilter, Corpus, PolicyDocument, Section};
use tracing::debug;

use crate::config::SearchConfig;
use crate::query::Query;
use crate::scorer::{ScoreBreakdown, Scorer};

/// A scored section, borrowed from the corpus it was found in.
#[derive(Debug, Clone)]
pub struct SearchResult<'c> {
    pub document: &'c PolicyDocument,
    pub section: &'c Section,
    pub breakdown: ScoreBreakdown,
    pub query: String,
}

impl SearchResult<'_> {
    pub fn total(&self) -> u32 {
        self.breakdown.total()
    }
}

#[derive(Debug, Clone)]
pub struct Ranker {
    scorer: Scorer,
    min_score: u32,
    max_results: usize,
}

impl Ranker {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            scorer: Scorer::from_config(config),
            min_score: config.min_score,
            max_results: config.max_results,
        }
    }

    /// Score every section admitted by `filter` and return the best matches.
    ///
    /// Output is sorted by descending total, holds at most `max_results`
    /// entries, and every entry scores at least `min_score`. Equal totals
    /// keep corpus order (document, then section).
    pub fn rank<'c>(
        &self,
        corpus: &'c Corpus,
        query: &Query,
        filter: &CategoryFilter,
    ) -> Vec<SearchResult<'c>> {
        let mut results = Vec::new();

        for document in corpus.documents(filter) {
            for section in &document.sections {
                let breakdown = self.scorer.score(section, document, query);
                if breakdown.total() < self.min_score {
                    continue;
                }
                debug!(
                    document = %document.title,
                    section = %section.id,
                    total = breakdown.total(),
                    exact = breakdown.exact_match,
                    keyword = breakdown.keyword_match,
                    amount = breakdown.amount_match,
                    procedure = breakdown.procedure_match,
                    category = breakdown.category_bonus,
                    "section scored"
                );
                results.push(SearchResult {
                    document,
                    section,
                    breakdown,
                    query: query.raw().to_string(),
                });
            }
        }

        // `sort_by` is stable, which gives the corpus-order tie-break.
        results.sort_by(|a, b| b.total().cmp(&a.total()));
        results.truncate(self.max_results);
        results
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}
