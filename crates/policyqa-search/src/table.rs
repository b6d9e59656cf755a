//! Ranked results as an Arrow `RecordBatch` for tabular display.

use std::sync::Arc;

use arrow::array::{StringArray, UInt32Array};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use policyqa_core::results::ranked_results_schema;

use crate::ranker::SearchResult;

/// One row per result, rank 1 first, with the full score breakdown.
pub fn results_to_batch(results: &[SearchResult<'_>]) -> Result<RecordBatch, ArrowError> {
    let rank = UInt32Array::from_iter_values(1..=results.len() as u32);
    let document: StringArray = results
        .iter()
        .map(|r| Some(r.document.title.as_str()))
        .collect();
    let category: StringArray = results
        .iter()
        .map(|r| Some(r.document.category.as_str()))
        .collect();
    let section: StringArray = results
        .iter()
        .map(|r| Some(r.section.id.as_str()))
        .collect();
    let section_title: StringArray = results
        .iter()
        .map(|r| Some(r.section.title.as_str()))
        .collect();

    RecordBatch::try_new(
        Arc::new(ranked_results_schema()),
        vec![
            Arc::new(rank),
            Arc::new(document),
            Arc::new(category),
            Arc::new(section),
            Arc::new(section_title),
            Arc::new(column(results, |r| r.breakdown.exact_match)),
            Arc::new(column(results, |r| r.breakdown.keyword_match)),
            Arc::new(column(results, |r| r.breakdown.amount_match)),
            Arc::new(column(results, |r| r.breakdown.procedure_match)),
            Arc::new(column(results, |r| r.breakdown.category_bonus)),
            Arc::new(column(results, |r| r.total())),
        ],
    )
}

fn column(results: &[SearchResult<'_>], f: impl Fn(&SearchResult<'_>) -> u32) -> UInt32Array {
    UInt32Array::from_iter_values(results.iter().map(f))
}
