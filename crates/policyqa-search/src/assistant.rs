//! The query boundary: validate, rank, synthesize.

use policyqa_core::{CategoryFilter, Corpus};
use tracing::{error, info};

use crate::SearchError;
use crate::answer::{StructuredAnswer, Synthesizer};
use crate::config::{AnswerConfig, SearchConfig};
use crate::query::Query;
use crate::ranker::{Ranker, SearchResult};

/// An answer plus the ranking facts callers log alongside it.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub answer: StructuredAnswer,
    pub result_count: usize,
    pub top_score: u32,
}

/// Answers questions against a corpus. Holds configuration only; the corpus
/// and category filter are supplied per call.
#[derive(Debug, Clone, Default)]
pub struct Assistant {
    ranker: Ranker,
    synthesizer: Synthesizer,
}

impl Assistant {
    pub fn new(search: SearchConfig, answer: AnswerConfig) -> Self {
        Self {
            ranker: Ranker::new(&search),
            synthesizer: Synthesizer::new(answer),
        }
    }

    /// Ranked matches for `query`, without building an answer.
    pub fn search<'c>(
        &self,
        corpus: &'c Corpus,
        query: &str,
        filter: &CategoryFilter,
    ) -> Result<Vec<SearchResult<'c>>, SearchError> {
        let query = Query::parse(query)?;
        Ok(self.ranker.rank(corpus, &query, filter))
    }

    pub fn ask(
        &self,
        corpus: &Corpus,
        query: &str,
        filter: &CategoryFilter,
    ) -> Result<StructuredAnswer, SearchError> {
        self.ask_detailed(corpus, query, filter).map(|o| o.answer)
    }

    /// Answer `query`.
    ///
    /// A blank query is the only error. Any failure past that point is
    /// logged and reported as the "search failed" answer.
    pub fn ask_detailed(
        &self,
        corpus: &Corpus,
        query: &str,
        filter: &CategoryFilter,
    ) -> Result<QueryOutcome, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        Ok(self.settle(query, filter, self.run(corpus, query, filter)))
    }

    /// Log the pipeline result; a failure becomes the "search failed" answer.
    fn settle(
        &self,
        query: &str,
        filter: &CategoryFilter,
        result: Result<QueryOutcome, SearchError>,
    ) -> QueryOutcome {
        match result {
            Ok(outcome) => {
                info!(
                    query,
                    results = outcome.result_count,
                    category = %filter,
                    top_score = outcome.top_score,
                    confidence = outcome.answer.confidence,
                    "query answered"
                );
                outcome
            }
            Err(err) => {
                error!(query, category = %filter, error = %err, "search failed");
                QueryOutcome {
                    answer: StructuredAnswer::search_failed(query, self.synthesizer.config()),
                    result_count: 0,
                    top_score: 0,
                }
            }
        }
    }

    fn run(
        &self,
        corpus: &Corpus,
        raw: &str,
        filter: &CategoryFilter,
    ) -> Result<QueryOutcome, SearchError> {
        let query = Query::parse(raw)?;
        let results = self.ranker.rank(corpus, &query, filter);
        let answer = self.synthesizer.synthesize(&results, raw)?;
        Ok(QueryOutcome {
            result_count: results.len(),
            top_score: results.first().map(SearchResult::total).unwrap_or(0),
            answer,
        })
    }
}
